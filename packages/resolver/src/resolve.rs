use crate::conflicts::detect_conflicts;
use crate::error::{ResolveError, ResolveResult};
use crate::guard::evaluate_guard;
use crate::selector::{apply_terminal, Candidate, SelectorEvaluator, Terminal};
use crate::target::{ResolvedTarget, TargetContext, TargetSelection};
use docsel_model::{Block, DocumentModel};
use docsel_parser::{normalize_selector, parse_guard, parse_selector, Guard, Selector};
use serde_json::json;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Let `one()` pick the first of several candidates and enable `first()`
    pub allow_ambiguous: bool,
}

/// Evaluate a selector against the model, then check the guard if one is given
#[instrument(skip_all, fields(selector = %normalize_selector(selector), blocks = model.blocks.len()))]
pub fn resolve_target(
    model: &DocumentModel,
    selector: &Selector,
    guard: Option<&Guard>,
    options: ResolveOptions,
) -> ResolveResult<ResolvedTarget> {
    info!("Resolving selector");

    let chain = &selector.call_chain;
    let evaluator = SelectorEvaluator::new(model);
    let mut candidates = evaluator.evaluate_call(&[], &chain.head)?;
    let mut terminal = None;

    for (position, call) in chain.chain.iter().enumerate() {
        let Some(parsed) = Terminal::parse(call)? else {
            candidates = evaluator.evaluate_call(&candidates, call)?;
            continue;
        };
        if terminal.is_some() {
            return Err(ResolveError::unsupported(
                format!("{}() follows another terminal", call.name),
                json!({ "terminal": call.name }),
            ));
        }
        if position != chain.chain.len() - 1 {
            return Err(ResolveError::unsupported(
                format!("{}() must be the last call in the chain", call.name),
                json!({ "terminal": call.name, "position": "not-last" }),
            ));
        }
        terminal = Some(parsed);
    }

    debug!(candidates = candidates.len(), terminal = ?terminal, "Applying terminal");
    let selected = apply_terminal(candidates, terminal.unwrap_or(Terminal::One), options.allow_ambiguous)?;
    let mut target = build_target(selected);
    target.context.conflicts = detect_conflicts(&target).tags();

    if let Some(guard) = guard {
        evaluate_guard(model, &target, guard)?;
    }

    info!(
        kind = %target.kind(),
        conflicts = target.context.conflicts.len(),
        "Selector resolved"
    );
    Ok(target)
}

/// Parse and resolve expression text in one step
pub fn resolve_str(
    model: &DocumentModel,
    selector: &str,
    guard: Option<&str>,
    options: ResolveOptions,
) -> ResolveResult<ResolvedTarget> {
    let selector = parse_selector(selector)?;
    let guard = guard.map(parse_guard).transpose()?;
    resolve_target(model, &selector, guard.as_ref(), options)
}

fn build_target(candidate: Candidate<'_>) -> ResolvedTarget {
    match candidate {
        Candidate::Block(block) => {
            let block = block.into_owned();
            let context = TargetContext {
                heading_path: block.heading_path_texts(),
                snippet: block_label(&block),
                conflicts: Vec::new(),
            };
            ResolvedTarget {
                selection: TargetSelection::Block { block },
                context,
            }
        }
        Candidate::BlockRange(blocks) => {
            let context = TargetContext {
                heading_path: blocks.first().map(|b| b.heading_path_texts()).unwrap_or_default(),
                snippet: blocks.first().map(|b| block_label(b)).unwrap_or_default(),
                conflicts: Vec::new(),
            };
            ResolvedTarget {
                selection: TargetSelection::BlockRange {
                    blocks: blocks.into_iter().cloned().collect(),
                },
                context,
            }
        }
        Candidate::TextRange { paragraph, start, end } => {
            let snippet = paragraph
                .as_paragraph()
                .and_then(|p| p.text_slice(start, end))
                .unwrap_or_default()
                .to_string();
            ResolvedTarget {
                context: TargetContext {
                    heading_path: paragraph.heading_path_texts(),
                    snippet,
                    conflicts: Vec::new(),
                },
                selection: TargetSelection::TextRange {
                    paragraph: paragraph.clone(),
                    start_offset: start,
                    end_offset: end,
                },
            }
        }
    }
}

/// Paragraph text, or the block type for everything else
fn block_label(block: &Block) -> String {
    match block.plain_text() {
        Some(text) => text.to_string(),
        None => block.block_type().to_string(),
    }
}
