//! Guard evaluation
//!
//! Leaves normally answer `Ok(true)` or `Ok(false)`. `ifRevision` is an
//! assertion: a mismatch is an `Err` that aborts the whole guard, so
//! `not(ifRevision("x"))` fails hard instead of inverting.

use crate::args::{positional_number, positional_string, type_error, unknown_function};
use crate::error::{ResolveError, ResolveResult};
use crate::target::{ResolvedTarget, TargetSelection};
use docsel_model::{Block, DocumentModel};
use docsel_parser::{Arg, Call, Guard, Value};
use regex::Regex;
use serde_json::json;
use std::cell::OnceCell;
use tracing::{debug, instrument};

/// Evaluate `guard` against a resolved target, failing unless it holds
#[instrument(skip_all, fields(guard = %guard.call_chain.head.name))]
pub fn evaluate_guard(model: &DocumentModel, target: &ResolvedTarget, guard: &Guard) -> ResolveResult<()> {
    if !guard.call_chain.chain.is_empty() {
        return Err(ResolveError::unsupported(
            "guard chaining is not supported; use all(), any() or not()",
            json!({ "chain": guard.call_chain.chain.iter().map(|c| c.name.clone()).collect::<Vec<_>>() }),
        ));
    }

    let evaluator = GuardEvaluator::new(model, target);
    let head = &guard.call_chain.head;
    if evaluator.eval_call(head)? {
        debug!("Guard passed");
        Ok(())
    } else {
        Err(ResolveError::expectation_failed(&head.name))
    }
}

struct GuardEvaluator<'a> {
    model: &'a DocumentModel,
    target: &'a ResolvedTarget,
    document_text: OnceCell<String>,
}

impl<'a> GuardEvaluator<'a> {
    fn new(model: &'a DocumentModel, target: &'a ResolvedTarget) -> Self {
        Self {
            model,
            target,
            document_text: OnceCell::new(),
        }
    }

    fn document_text(&self) -> &str {
        self.document_text.get_or_init(|| self.model.document_text())
    }

    fn eval_call(&self, call: &Call) -> ResolveResult<bool> {
        let result = match call.name.as_str() {
            "all" => {
                for arg in &call.args {
                    if !self.eval_arg(call, arg)? {
                        return Ok(false);
                    }
                }
                true
            }
            "any" => {
                for arg in &call.args {
                    if self.eval_arg(call, arg)? {
                        return Ok(true);
                    }
                }
                false
            }
            "not" => {
                let [arg] = call.args.as_slice() else {
                    return Err(ResolveError::unsupported(
                        "not() expects exactly one argument",
                        json!({ "function": "not", "count": call.args.len() }),
                    ));
                };
                !self.eval_arg(call, arg)?
            }
            "ifRevision" => {
                let expected = positional_string(call, 0)?;
                if self.model.revision_id != expected {
                    return Err(ResolveError::revision_mismatch(expected, &self.model.revision_id));
                }
                true
            }
            "expectContains" => self.document_text().contains(positional_string(call, 0)?),
            "expectNotContains" => !self.document_text().contains(positional_string(call, 0)?),
            "expectRegex" => {
                let pattern = positional_string(call, 0)?;
                let regex = Regex::new(pattern).map_err(|err| ResolveError::invalid_pattern(pattern, &err))?;
                regex.is_match(self.document_text())
            }
            "expectRangeTextEquals" => {
                let expected = positional_string(call, 0)?;
                if !matches!(self.target.selection, TargetSelection::TextRange { .. }) {
                    return Err(ResolveError::unsupported(
                        "expectRangeTextEquals() requires a textRange target",
                        json!({ "guard": "expectRangeTextEquals", "kind": self.target.kind() }),
                    ));
                }
                self.target.text() == expected
            }
            "expectHasNoAtomicObjects" => self.block_members().iter().all(|b| !b.flags.is_atomic),
            "expectHasNoInlineAtomic" => match &self.target.selection {
                TargetSelection::TextRange { paragraph, .. } => !paragraph.flags.contains_inline_atomic,
                _ => self
                    .block_members()
                    .iter()
                    .all(|b| !b.flags.contains_inline_atomic),
            },
            "expectNextHeadingIs" => {
                let expected = positional_string(call, 0)?;
                self.next_heading_text() == Some(expected)
            }
            "expectHeadingLevelIs" => {
                let expected = positional_number(call, 0)?;
                self.heading_level().map(f64::from) == Some(expected)
            }
            name => return Err(unknown_function("guard", name)),
        };
        debug!(guard = %call.name, result, "Evaluated guard call");
        Ok(result)
    }

    fn eval_arg(&self, parent: &Call, arg: &Arg) -> ResolveResult<bool> {
        match arg {
            Arg::Named { name, .. } => Err(ResolveError::unsupported(
                format!("guard functions do not accept named arguments ({}=)", name),
                json!({ "function": parent.name, "argument": name }),
            )),
            Arg::Positional { value: Value::Call(call) } => self.eval_call(call),
            Arg::Positional { value: Value::Bool(b) } => Ok(*b),
            Arg::Positional { value } => Err(type_error(parent, "argument", "a guard call or boolean", Some(value))),
        }
    }

    /// Member blocks of block and range targets; none for text ranges
    fn block_members(&self) -> Vec<&'a Block> {
        match &self.target.selection {
            TargetSelection::TextRange { .. } => Vec::new(),
            _ => self.target.member_blocks(),
        }
    }

    fn next_heading_text(&self) -> Option<&'a str> {
        let last = self.target.last_block()?;
        self.model.next_heading_after(&last.node_id)?.plain_text()
    }

    /// Own level for a heading, else the nearest enclosing heading's level
    fn heading_level(&self) -> Option<u8> {
        let block = self.target.first_block()?;
        if block.flags.is_heading {
            return block.heading_level();
        }
        block.heading_path.last().map(|heading| heading.level)
    }
}
