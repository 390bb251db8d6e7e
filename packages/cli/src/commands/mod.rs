pub mod edit;
pub mod object;
pub mod resolve;
pub mod style;
pub mod view;

pub use edit::{edit, EditCommand};
pub use object::{object, ObjectCommand};
pub use resolve::{resolve, ResolveArgs};
pub use style::{style, StyleCommand};
pub use view::{list, outline, ListArgs, OutlineArgs};

use crate::config::Config;
use crate::input::load_model;
use crate::report::ExpressionError;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use docsel_compiler::{compile_target, preview, DiffIntent, DiffPreview, EditIntent, Request};
use docsel_model::DocumentModel;
use docsel_parser::{normalize_guard, normalize_selector, parse_guard, parse_selector};
use docsel_resolver::{build_guard_expression, format_target_summary, resolve_target, ResolveOptions, ResolvedTarget};
use serde::Serialize;
use std::path::PathBuf;

/// Settings shared by every command
pub struct Context {
    pub config: Config,
    pub json: bool,
    pub document: Option<PathBuf>,
}

impl Context {
    pub fn load_model(&self) -> Result<DocumentModel> {
        load_model(self.document.as_deref())
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{}", rendered);
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    /// Selector expression, e.g. `heading("Install")`
    #[arg(short, long)]
    pub select: String,

    /// Guard expression checked against the resolved target
    #[arg(short, long)]
    pub guard: Option<String>,

    /// Fail unless the document is at this revision
    #[arg(long)]
    pub if_revision: Option<String>,

    /// Fail unless the document contains this text
    #[arg(long)]
    pub expect: Option<String>,

    /// Take the first candidate instead of failing when several match
    #[arg(long)]
    pub allow_ambiguous: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Print selector, guard, target and requests instead of the bare request body
    #[arg(long)]
    pub explain: bool,

    /// Include a before/after text preview (implies --explain)
    #[arg(long)]
    pub diff: bool,
}

/// A resolved selection with the canonical expressions that produced it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub selector: String,
    pub guard: Option<String>,
    pub target: ResolvedTarget,
    pub target_summary: String,
}

pub fn resolve_selection(ctx: &Context, model: &DocumentModel, args: &SelectArgs) -> Result<Resolution> {
    let selector = parse_selector(&args.select).map_err(|error| ExpressionError {
        name: "selector",
        source_text: args.select.clone(),
        error,
    })?;

    let guard_text = build_guard_expression(args.guard.as_deref(), args.if_revision.as_deref(), args.expect.as_deref());
    let guard = match &guard_text {
        Some(text) => Some(parse_guard(text).map_err(|error| ExpressionError {
            name: "guard",
            source_text: text.clone(),
            error,
        })?),
        None => None,
    };

    let options = ResolveOptions {
        allow_ambiguous: args.allow_ambiguous || ctx.config.allow_ambiguous,
    };
    let target = resolve_target(model, &selector, guard.as_ref(), options)?;
    Ok(Resolution {
        selector: normalize_selector(&selector),
        guard: guard.as_ref().map(normalize_guard),
        target_summary: format_target_summary(&target),
        target,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Explain<'a> {
    command: &'a str,
    selector: &'a str,
    guard: Option<&'a str>,
    target: &'a ResolvedTarget,
    target_summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    diff: Option<DiffPreview>,
    requests: &'a [Request],
    request_count: usize,
}

#[derive(Debug, Serialize)]
struct RequestBody<'a> {
    requests: &'a [Request],
}

/// Resolve, compile and print the batch-update body (or the explanation)
pub fn run_edit(
    ctx: &Context,
    command: &str,
    select: &SelectArgs,
    plan: &PlanArgs,
    intent: EditIntent,
    diff: Option<DiffIntent>,
) -> Result<()> {
    let model = ctx.load_model()?;
    let resolution = resolve_selection(ctx, &model, select)?;
    let compiled = compile_target(&resolution.target, &intent)?;

    if !ctx.json {
        eprintln!("{} {}", "Resolved target:".dimmed(), resolution.target_summary);
    }

    if plan.explain || plan.diff {
        let diff = if plan.diff {
            diff.map(|diff| preview(&resolution.target, &diff))
        } else {
            None
        };
        return ctx.print_json(&Explain {
            command,
            selector: &resolution.selector,
            guard: resolution.guard.as_deref(),
            target: &resolution.target,
            target_summary: &resolution.target_summary,
            diff,
            requests: &compiled.requests,
            request_count: compiled.len(),
        });
    }

    ctx.print_json(&RequestBody {
        requests: &compiled.requests,
    })
}
