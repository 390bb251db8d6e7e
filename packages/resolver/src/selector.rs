//! Selector functions over the document model
//!
//! Each call in a chain consumes the current candidate list and produces a
//! new one. Block and range candidates come out in document order; match
//! candidates come out in discovery order.

use crate::args::{
    named_bool, named_call, named_number, named_string, positional_number, positional_string,
    required_named_call, type_error, unknown_function,
};
use crate::error::{ResolveError, ResolveResult};
use docsel_model::text::byte_to_utf16;
use docsel_model::{inline_image_blocks, Block, BlockContent, DocumentModel};
use docsel_parser::{Arg, Call, Value};
use regex::Regex;
use serde_json::json;
use std::borrow::Cow;
use tracing::debug;

/// Intermediate match; collapsed into a resolved target by the terminal
#[derive(Debug, Clone)]
pub(crate) enum Candidate<'m> {
    /// Model blocks are borrowed; inline-image pseudo-blocks are owned
    Block(Cow<'m, Block>),
    BlockRange(Vec<&'m Block>),
    TextRange {
        paragraph: &'m Block,
        start: usize,
        end: usize,
    },
}

impl<'m> Candidate<'m> {
    fn block(block: &'m Block) -> Self {
        Candidate::Block(Cow::Borrowed(block))
    }

    /// The candidate's block when it is one of the model's own blocks
    fn model_block(&self) -> Option<&'m Block> {
        match self {
            Candidate::Block(Cow::Borrowed(block)) => Some(*block),
            _ => None,
        }
    }
}

/// Chain-ending call that picks one candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Terminal {
    One,
    First,
    Nth(f64),
}

impl Terminal {
    pub fn parse(call: &Call) -> ResolveResult<Option<Terminal>> {
        match call.name.as_str() {
            "one" => Ok(Some(Terminal::One)),
            "first" => Ok(Some(Terminal::First)),
            "nth" => Ok(Some(Terminal::Nth(positional_number(call, 0)?))),
            _ => Ok(None),
        }
    }
}

pub(crate) struct SelectorEvaluator<'m> {
    model: &'m DocumentModel,
}

impl<'m> SelectorEvaluator<'m> {
    pub fn new(model: &'m DocumentModel) -> Self {
        Self { model }
    }

    pub fn evaluate_call(&self, candidates: &[Candidate<'m>], call: &Call) -> ResolveResult<Vec<Candidate<'m>>> {
        let result = match call.name.as_str() {
            "heading" => {
                let title = positional_string(call, 0)?;
                let level = named_number(call, "level")?;
                self.heading(title, level)
            }
            "betweenHeadings" => {
                let from = positional_string(call, 0)?;
                let to = positional_string(call, 1)?;
                self.between_headings(from, to)
            }
            "section" => self.section(call)?,
            "under" => self.under(call)?,
            "blocks" => self.blocks(candidates, call)?,
            "paragraphs" => self.paragraphs(candidates, call)?,
            "objects" => self.objects(candidates, call)?,
            "match" => self.find_matches(candidates, call)?,
            "filter" => self.filter(candidates, call)?,
            name => return Err(unknown_function("selector", name)),
        };
        debug!(function = %call.name, candidates = result.len(), "Evaluated selector call");
        Ok(result)
    }

    fn heading(&self, title: &str, level: Option<f64>) -> Vec<Candidate<'m>> {
        self.model
            .headings_with_text(title)
            .into_iter()
            .filter(|block| block.is_paragraph())
            .filter(|block| match level {
                Some(level) if level != 0.0 => block.heading_level().map(f64::from) == Some(level),
                _ => true,
            })
            .map(Candidate::block)
            .collect()
    }

    fn between_headings(&self, from: &str, to: &str) -> Vec<Candidate<'m>> {
        let from_blocks = self.model.headings_with_text(from);
        let to_blocks = self.model.headings_with_text(to);
        self.ranges_between(&from_blocks, &to_blocks)
    }

    fn section(&self, call: &Call) -> ResolveResult<Vec<Candidate<'m>>> {
        let from_call = required_named_call(call, "from")?;
        let to_call = required_named_call(call, "to")?;
        let from_blocks = self.bound_blocks(from_call)?;
        let to_blocks = self.bound_blocks(to_call)?;
        Ok(self.ranges_between(&from_blocks, &to_blocks))
    }

    fn bound_blocks(&self, call: &Call) -> ResolveResult<Vec<&'m Block>> {
        Ok(self
            .evaluate_call(&[], call)?
            .iter()
            .filter_map(Candidate::model_block)
            .collect())
    }

    /// For each `from`, the blocks strictly between it and the nearest later `to`
    fn ranges_between(&self, from: &[&'m Block], to: &[&'m Block]) -> Vec<Candidate<'m>> {
        let mut to_positions: Vec<usize> = to
            .iter()
            .filter_map(|block| self.model.position(&block.node_id))
            .collect();
        to_positions.sort_unstable();

        from.iter()
            .filter_map(|block| self.model.position(&block.node_id))
            .filter_map(|from_pos| {
                let to_pos = to_positions.iter().copied().find(|pos| *pos > from_pos)?;
                Some(Candidate::BlockRange(
                    self.model.blocks[from_pos + 1..to_pos].iter().collect(),
                ))
            })
            .collect()
    }

    fn under(&self, call: &Call) -> ResolveResult<Vec<Candidate<'m>>> {
        let scope_value = call.positional(0).or_else(|| call.named("in"));
        let Some(Value::Call(scope_call)) = scope_value else {
            return Err(type_error(call, "scope", "a selector expression", scope_value));
        };

        let mut blocks: Vec<&'m Block> = Vec::new();
        for candidate in self.evaluate_call(&[], scope_call)? {
            match candidate {
                Candidate::Block(block) if block.flags.is_heading => {
                    blocks.extend(self.model.blocks_under(&block.node_id));
                }
                Candidate::Block(_) => {}
                Candidate::BlockRange(range) => blocks.extend(range),
                Candidate::TextRange { paragraph, .. } => blocks.push(paragraph),
            }
        }

        Ok(self
            .model
            .blocks_in_order(blocks.iter().map(|b| b.node_id.as_str()))
            .into_iter()
            .map(Candidate::block)
            .collect())
    }

    /// Constituent model blocks of a candidate list, deduplicated, in document order
    fn blocks_from(&self, candidates: &[Candidate<'m>]) -> Vec<&'m Block> {
        let mut ids: Vec<&str> = Vec::new();
        for candidate in candidates {
            match candidate {
                Candidate::Block(block) => ids.push(&block.node_id),
                Candidate::BlockRange(blocks) => ids.extend(blocks.iter().map(|b| b.node_id.as_str())),
                Candidate::TextRange { paragraph, .. } => ids.push(&paragraph.node_id),
            }
        }
        self.model.blocks_in_order(ids)
    }

    /// `in=` scope when given; otherwise the current candidates, or the
    /// whole document when there are none
    fn scoped_blocks(&self, candidates: &[Candidate<'m>], call: &Call) -> ResolveResult<Vec<&'m Block>> {
        match named_call(call, "in")? {
            Some(scope) => {
                let scoped = self.evaluate_call(&[], scope)?;
                Ok(self.blocks_from(&scoped))
            }
            None if candidates.is_empty() => Ok(self.model.blocks.iter().collect()),
            None => Ok(self.blocks_from(candidates)),
        }
    }

    fn blocks(&self, candidates: &[Candidate<'m>], call: &Call) -> ResolveResult<Vec<Candidate<'m>>> {
        Ok(self
            .scoped_blocks(candidates, call)?
            .into_iter()
            .map(Candidate::block)
            .collect())
    }

    fn paragraphs(&self, candidates: &[Candidate<'m>], call: &Call) -> ResolveResult<Vec<Candidate<'m>>> {
        Ok(self
            .scoped_blocks(candidates, call)?
            .into_iter()
            .filter(|block| block.is_paragraph())
            .map(Candidate::block)
            .collect())
    }

    fn objects(&self, candidates: &[Candidate<'m>], call: &Call) -> ResolveResult<Vec<Candidate<'m>>> {
        let kind = named_string(call, "type")?;
        let blocks = self.scoped_blocks(candidates, call)?;

        let inline_blocks: Vec<Block> = blocks
            .iter()
            .filter(|block| block.is_paragraph())
            .flat_map(|block| inline_image_blocks(block))
            .collect();

        let mut objects: Vec<Candidate<'m>> = blocks
            .into_iter()
            .filter(|block| is_object_of_kind(block, kind))
            .map(Candidate::block)
            .collect();
        objects.extend(
            inline_blocks
                .into_iter()
                .filter(|block| is_object_of_kind(block, kind))
                .map(|block| Candidate::Block(Cow::Owned(block))),
        );
        Ok(objects)
    }

    fn find_matches(&self, candidates: &[Candidate<'m>], call: &Call) -> ResolveResult<Vec<Candidate<'m>>> {
        let pattern = positional_string(call, 0)?;
        let use_regex = named_bool(call, "regex", false)?;
        let occurrence = named_number(call, "occurrence")?;

        let blocks = match named_call(call, "in")? {
            Some(scope) => {
                let scoped = self.evaluate_call(&[], scope)?;
                self.blocks_from(&scoped)
            }
            None if candidates.is_empty() => self.model.blocks.iter().collect(),
            None => self.blocks_from(candidates),
        };

        let regex = if use_regex {
            Some(Regex::new(pattern).map_err(|err| ResolveError::invalid_pattern(pattern, &err))?)
        } else {
            None
        };

        let mut matches = Vec::new();
        for paragraph in blocks.into_iter().filter(|block| block.is_paragraph()) {
            let text = paragraph.plain_text().unwrap_or_default();
            if text.is_empty() {
                continue;
            }
            let spans: Vec<(usize, usize)> = match &regex {
                Some(regex) => regex.find_iter(text).map(|m| (m.start(), m.end())).collect(),
                None if pattern.is_empty() => Vec::new(),
                None => text
                    .match_indices(pattern)
                    .map(|(start, found)| (start, start + found.len()))
                    .collect(),
            };
            matches.extend(spans.into_iter().map(|(start, end)| Candidate::TextRange {
                paragraph,
                start: byte_to_utf16(text, start),
                end: byte_to_utf16(text, end),
            }));
        }

        match occurrence {
            None => Ok(matches),
            Some(n) if n >= 1.0 && n.fract() == 0.0 && (n as usize) <= matches.len() => {
                Ok(vec![matches.swap_remove(n as usize - 1)])
            }
            Some(_) => Ok(Vec::new()),
        }
    }

    fn filter(&self, candidates: &[Candidate<'m>], call: &Call) -> ResolveResult<Vec<Candidate<'m>>> {
        let predicates = predicate_calls(call)?;
        let mut kept = Vec::new();
        for block in self.blocks_from(candidates) {
            if all_predicates(block, &predicates)? {
                kept.push(Candidate::block(block));
            }
        }
        Ok(kept)
    }
}

fn predicate_calls(call: &Call) -> ResolveResult<Vec<&Call>> {
    call.args
        .iter()
        .map(|arg| match arg {
            Arg::Positional { value: Value::Call(predicate) } => Ok(predicate),
            Arg::Positional { value } => Err(type_error(call, "predicate", "a predicate call", Some(value))),
            Arg::Named { name, .. } => Err(ResolveError::unsupported(
                format!("{}() does not accept named argument {}", call.name, name),
                json!({ "function": call.name, "argument": name }),
            )),
        })
        .collect()
}

fn all_predicates(block: &Block, predicates: &[&Call]) -> ResolveResult<bool> {
    for predicate in predicates {
        if !evaluate_predicate(block, predicate)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn evaluate_predicate(block: &Block, predicate: &Call) -> ResolveResult<bool> {
    match predicate.name.as_str() {
        "textEquals" => {
            let expected = positional_string(predicate, 0)?;
            Ok(block.plain_text() == Some(expected))
        }
        "textContains" => {
            let expected = positional_string(predicate, 0)?;
            Ok(block.plain_text().is_some_and(|text| text.contains(expected)))
        }
        "styleIs" => {
            let expected = positional_string(predicate, 0)?;
            Ok(block
                .as_paragraph()
                .and_then(|p| p.style.named_style_type.as_deref())
                == Some(expected))
        }
        "isCode" => Ok(block.flags.is_code_paragraph),
        "and" => all_predicates(block, &predicate_calls(predicate)?),
        name => Err(unknown_function("predicate", name)),
    }
}

fn is_object_of_kind(block: &Block, kind: Option<&str>) -> bool {
    if !block.flags.is_atomic {
        return false;
    }
    let Some(kind) = kind else {
        return true;
    };
    match (kind, &block.content) {
        ("table", BlockContent::Table { .. }) => true,
        ("hr" | "horizontalRule", BlockContent::HorizontalRule) => true,
        ("embed" | "object", BlockContent::Embed { .. }) => true,
        ("image", BlockContent::Embed { object_kind, inline }) => {
            let lowered = object_kind.to_lowercase();
            inline.is_some() || lowered.contains("image") || lowered.contains("img")
        }
        _ => false,
    }
}

/// Collapse the candidate list to one candidate
pub(crate) fn apply_terminal<'m>(
    mut candidates: Vec<Candidate<'m>>,
    terminal: Terminal,
    allow_ambiguous: bool,
) -> ResolveResult<Candidate<'m>> {
    match terminal {
        Terminal::First => {
            if !allow_ambiguous {
                return Err(ResolveError::unsupported(
                    "first() requires ambiguous resolution to be allowed",
                    json!({ "terminal": "first" }),
                ));
            }
            if candidates.is_empty() {
                return Err(ResolveError::no_match());
            }
            Ok(candidates.swap_remove(0))
        }
        Terminal::Nth(requested) => {
            let index = requested.floor() - 1.0;
            if !index.is_finite() || index < 0.0 || index >= candidates.len() as f64 {
                return Err(ResolveError::no_match_with(json!({
                    "terminal": "nth",
                    "requested": requested,
                    "count": candidates.len(),
                })));
            }
            Ok(candidates.swap_remove(index as usize))
        }
        Terminal::One => match candidates.len() {
            0 => Err(ResolveError::no_match()),
            1 => Ok(candidates.swap_remove(0)),
            count if !allow_ambiguous => Err(ResolveError::AmbiguousMatch {
                count,
                hints: crate::rank::rank_hints(count),
            }),
            _ => Ok(candidates.swap_remove(0)),
        },
    }
}
