use super::{run_edit, Context, PlanArgs, SelectArgs};
use crate::input::{parse_toggle, text_or_file};
use crate::report::usage;
use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use docsel_compiler::{EditIntent, TextStyleUpdate};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum StyleCommand {
    /// Set bold, italic or underline on a text range
    Set(SetArgs),

    /// Link a text range to a URL
    Link(LinkArgs),

    /// Apply a heading level to the selected paragraphs
    Heading(HeadingArgs),

    /// Insert a code paragraph, or format the selected paragraphs as code
    Code(CodeArgs),
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    #[command(flatten)]
    pub plan: PlanArgs,

    /// on|off
    #[arg(long)]
    pub bold: Option<String>,

    /// on|off
    #[arg(long)]
    pub italic: Option<String>,

    /// on|off
    #[arg(long)]
    pub underline: Option<String>,
}

#[derive(Args, Debug)]
pub struct LinkArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    #[command(flatten)]
    pub plan: PlanArgs,

    #[arg(long)]
    pub url: String,
}

#[derive(Args, Debug)]
pub struct HeadingArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    #[command(flatten)]
    pub plan: PlanArgs,

    /// Heading level, 1 to 6
    #[arg(long, default_value_t = 2.0)]
    pub level: f64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeAction {
    Insert,
    Format,
}

#[derive(Args, Debug)]
pub struct CodeArgs {
    #[arg(value_enum)]
    pub action: CodeAction,

    #[command(flatten)]
    pub select: SelectArgs,

    #[command(flatten)]
    pub plan: PlanArgs,

    /// Source file for `code insert`
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub fn style(command: StyleCommand, ctx: &Context) -> Result<()> {
    match command {
        StyleCommand::Set(args) => {
            let style = text_style(&args)?;
            run_edit(ctx, "styleSet", &args.select, &args.plan, EditIntent::StyleSet { style }, None)
        }
        StyleCommand::Link(args) => run_edit(
            ctx,
            "styleLink",
            &args.select,
            &args.plan,
            EditIntent::StyleLink { url: args.url.clone() },
            None,
        ),
        StyleCommand::Heading(args) => {
            let intent = EditIntent::heading(args.level)?;
            run_edit(ctx, "styleHeading", &args.select, &args.plan, intent, None)
        }
        StyleCommand::Code(args) => {
            let intent = match args.action {
                CodeAction::Insert => {
                    if args.file.is_none() {
                        return Err(usage("Provide --file for code insert."));
                    }
                    EditIntent::CodeInsert {
                        text: text_or_file(None, args.file.as_deref(), "file")?,
                    }
                }
                CodeAction::Format => EditIntent::CodeFormat,
            };
            run_edit(ctx, "styleCode", &args.select, &args.plan, intent, None)
        }
    }
}

fn text_style(args: &SetArgs) -> Result<TextStyleUpdate> {
    let style = TextStyleUpdate {
        bold: parse_toggle(args.bold.as_deref())?,
        italic: parse_toggle(args.italic.as_deref())?,
        underline: parse_toggle(args.underline.as_deref())?,
        ..TextStyleUpdate::default()
    };
    if style.is_empty() {
        return Err(usage("No style flags provided."));
    }
    Ok(style)
}
