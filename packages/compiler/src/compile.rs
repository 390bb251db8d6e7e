//! # Edit Compilation
//!
//! Turns a [`ResolvedTarget`] plus an [`EditIntent`] into an ordered list of
//! index-addressed [`Request`]s.
//!
//! Every precondition is checked before the first request is built, so a
//! failed compilation never yields a partial request list:
//!
//! - `insert`, `codeInsert` and `objectInsert` need a single paragraph block
//! - `replaceMatch`, `styleSet` and `styleLink` need a text range
//! - `replaceSection`, `paragraphStyle` and `codeFormat` take a block or a
//!   block range of paragraphs and refuse atomic conflicts
//! - an inline conflict refuses everything except `objectDelete`
//! - `objectDelete` needs a single atomic block
//!
//! Text offsets are translated through the paragraph range map; inserted
//! span lengths are counted in UTF-16 units.

use crate::error::{CompileError, CompileResult};
use crate::intent::{EditIntent, InsertPosition, ObjectInsert};
use crate::list::{normalize_insert_text, normalize_list_text};
use crate::requests::{ParagraphStyleUpdate, Request, TextStyleUpdate};
use docsel_model::{utf16_len, Block};
use docsel_resolver::{ResolvedTarget, TargetSelection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// The body an external submit step posts as a batch update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledEdit {
    pub requests: Vec<Request>,
}

impl CompiledEdit {
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[instrument(skip_all, fields(intent = intent.name(), target = %target.kind()))]
pub fn compile_target(target: &ResolvedTarget, intent: &EditIntent) -> CompileResult<CompiledEdit> {
    let compiler = EditCompiler::new(target, intent.name());
    let requests = compiler.compile(intent)?;
    info!(requests = requests.len(), "Compiled edit");
    Ok(CompiledEdit { requests })
}

struct EditCompiler<'t> {
    target: &'t ResolvedTarget,
    intent: &'static str,
}

impl<'t> EditCompiler<'t> {
    fn new(target: &'t ResolvedTarget, intent: &'static str) -> Self {
        Self { target, intent }
    }

    fn compile(&self, intent: &EditIntent) -> CompileResult<Vec<Request>> {
        match intent {
            EditIntent::Insert { position, text } => {
                let paragraph = self.single_paragraph()?;
                self.ensure_no_inline()?;
                let text = normalize_insert_text(text);
                if text.is_empty() {
                    return Err(CompileError::usage("Insert text is empty"));
                }
                let index = match position {
                    InsertPosition::Before => paragraph.api_range.start,
                    InsertPosition::After => paragraph.paragraph_end_index(),
                };
                Ok(vec![Request::insert_text(index, text)])
            }
            EditIntent::ReplaceMatch { text } => {
                let (start, end) = self.text_range_indexes()?;
                self.ensure_no_inline()?;
                let mut requests = vec![Request::delete_range(start, end)];
                if !text.is_empty() {
                    requests.push(Request::insert_text(start, text.clone()));
                }
                Ok(requests)
            }
            EditIntent::ReplaceSection { text } => self.replace_section(text),
            EditIntent::Delete => {
                let (start, end) = self.block_span("block|blockRange")?;
                self.ensure_no_inline()?;
                Ok(vec![Request::delete_range(start, end)])
            }
            EditIntent::StyleSet { style } => {
                if style.is_empty() {
                    return Err(CompileError::usage("No style attributes provided"));
                }
                let (start, end) = self.text_range_indexes()?;
                self.ensure_no_inline()?;
                Ok(vec![Request::update_text_style(start, end, style.clone())])
            }
            EditIntent::StyleLink { url } => {
                if url.is_empty() {
                    return Err(CompileError::usage("Link URL is empty"));
                }
                let (start, end) = self.text_range_indexes()?;
                self.ensure_no_inline()?;
                Ok(vec![Request::update_text_style(start, end, TextStyleUpdate::link(url.clone()))])
            }
            EditIntent::ParagraphStyle { style } => {
                let (start, end) = self.paragraph_span()?;
                Ok(vec![Request::update_paragraph_style(start, end, style.clone())])
            }
            EditIntent::CodeInsert { text } => {
                let paragraph = self.single_paragraph()?;
                self.ensure_no_inline()?;
                let text = normalize_insert_text(text);
                if text.is_empty() {
                    return Err(CompileError::usage("Code text is empty"));
                }
                let start = paragraph.paragraph_end_index();
                let end = start + utf16_len(&text);
                Ok(vec![
                    Request::insert_text(start, text),
                    Request::update_paragraph_style(start, end, ParagraphStyleUpdate::code()),
                    Request::update_text_style(start, end, TextStyleUpdate::code()),
                ])
            }
            EditIntent::CodeFormat => {
                let (start, end) = self.paragraph_span()?;
                Ok(vec![
                    Request::update_paragraph_style(start, end, ParagraphStyleUpdate::code()),
                    Request::update_text_style(start, end, TextStyleUpdate::code()),
                ])
            }
            EditIntent::ObjectInsert { object } => {
                let paragraph = self.single_paragraph()?;
                self.ensure_no_inline()?;
                let index = paragraph.paragraph_end_index();
                Ok(vec![object_request(index, object)?])
            }
            EditIntent::ObjectDelete => {
                let block = match &self.target.selection {
                    TargetSelection::Block { block } => block,
                    _ => return Err(self.unsupported("block")),
                };
                if !block.flags.is_atomic {
                    return Err(self.unsupported("atomic block"));
                }
                Ok(vec![Request::delete_range(block.api_range.start, block.api_range.end)])
            }
        }
    }

    fn replace_section(&self, text: &str) -> CompileResult<Vec<Request>> {
        let (start, end) = self.block_span("block|blockRange")?;
        self.ensure_no_inline()?;
        self.ensure_no_atomic()?;

        let mut requests = vec![Request::delete_range(start, end)];
        let normalized = normalize_list_text(text);
        if normalized.text.is_empty() {
            return Ok(requests);
        }

        let inserted_end = start + utf16_len(&normalized.text);
        requests.push(Request::insert_text(start, normalized.text));
        requests.push(Request::update_paragraph_style(
            start,
            inserted_end,
            ParagraphStyleUpdate::normal_text(),
        ));
        if let Some(family) = normalized.list {
            debug!(preset = family.preset(), "Replacement text is a list");
            requests.push(Request::create_paragraph_bullets(start, inserted_end, family.preset()));
        }
        Ok(requests)
    }

    fn unsupported(&self, expected: &str) -> CompileError {
        CompileError::unsupported(self.intent, expected, self.target.kind().as_str())
    }

    fn ensure_no_inline(&self) -> CompileResult<()> {
        if self.target.has_inline_conflict() {
            return Err(CompileError::inline_conflict(&self.target.context.conflicts));
        }
        Ok(())
    }

    fn ensure_no_atomic(&self) -> CompileResult<()> {
        if self.target.has_atomic_conflict() {
            return Err(CompileError::atomic_conflict(&self.target.context.conflicts));
        }
        Ok(())
    }

    fn single_paragraph(&self) -> CompileResult<&'t Block> {
        match &self.target.selection {
            TargetSelection::Block { block } if block.is_paragraph() => Ok(block),
            _ => Err(self.unsupported("block(paragraph)")),
        }
    }

    fn text_range_indexes(&self) -> CompileResult<(usize, usize)> {
        let TargetSelection::TextRange {
            paragraph,
            start_offset,
            end_offset,
        } = &self.target.selection
        else {
            return Err(self.unsupported("textRange"));
        };
        let start = paragraph.map_offset_to_index(*start_offset)?;
        let end = paragraph.map_offset_to_index(*end_offset)?;
        if end < start {
            return Err(self.unsupported("a forward text range"));
        }
        Ok((start, end))
    }

    /// First member's start to last member's end
    fn block_span(&self, expected: &str) -> CompileResult<(usize, usize)> {
        let blocks: &[Block] = match &self.target.selection {
            TargetSelection::Block { block } => std::slice::from_ref(block),
            TargetSelection::BlockRange { blocks } => blocks,
            TargetSelection::TextRange { .. } => return Err(self.unsupported(expected)),
        };
        match (blocks.first(), blocks.last()) {
            (Some(first), Some(last)) => Ok((first.api_range.start, last.api_range.end)),
            _ => Err(self.unsupported(expected)),
        }
    }

    /// Span of a block or range whose members are all paragraphs
    fn paragraph_span(&self) -> CompileResult<(usize, usize)> {
        self.ensure_no_inline()?;
        self.ensure_no_atomic()?;
        let expected = "paragraph blocks";
        let all_paragraphs = match &self.target.selection {
            TargetSelection::Block { block } => block.is_paragraph(),
            TargetSelection::BlockRange { blocks } => blocks.iter().all(Block::is_paragraph),
            TargetSelection::TextRange { .. } => false,
        };
        if !all_paragraphs {
            return Err(self.unsupported(expected));
        }
        self.block_span(expected)
    }
}

fn object_request(index: usize, object: &ObjectInsert) -> CompileResult<Request> {
    match object {
        ObjectInsert::Image { uri, alt_text } | ObjectInsert::Embed { uri, alt_text } => {
            let uri = uri.trim();
            if uri.is_empty() {
                return Err(CompileError::usage(format!(
                    "{} insert requires a non-empty uri",
                    object.type_name()
                )));
            }
            Ok(Request::insert_inline_image(index, uri, alt_text.as_deref()))
        }
        ObjectInsert::Table { rows, columns } => {
            if *rows == 0 || *columns == 0 {
                return Err(CompileError::usage("Table insert needs at least one row and one column"));
            }
            Ok(Request::insert_table(index, *rows, *columns))
        }
        ObjectInsert::HorizontalRule => Ok(Request::insert_horizontal_rule(index)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::InsertText;
    use docsel_model::fixtures::DocBuilder;
    use docsel_resolver::{resolve_str, ResolveOptions};

    fn target(doc: &docsel_model::DocumentModel, selector: &str) -> ResolvedTarget {
        resolve_str(doc, selector, None, ResolveOptions::default()).unwrap()
    }

    #[test]
    fn test_insert_after_counts_inline_content() {
        let doc = DocBuilder::new().para("Plain").build();
        let compiled = compile_target(
            &target(&doc, r#"match("Plain").nth(1)"#),
            &EditIntent::Insert {
                position: InsertPosition::After,
                text: "x".to_string(),
            },
        );
        assert!(matches!(compiled, Err(CompileError::UnsupportedSelection { .. })));

        let compiled = compile_target(
            &target(&doc, "paragraphs().nth(1)"),
            &EditIntent::Insert {
                position: InsertPosition::After,
                text: "Next".to_string(),
            },
        )
        .unwrap();
        assert_eq!(
            compiled.requests,
            vec![Request::InsertText(InsertText {
                location: crate::requests::Location { index: 7 },
                text: "Next\n".to_string()
            })]
        );
    }

    #[test]
    fn test_empty_insert_is_usage_error() {
        let doc = DocBuilder::new().para("Plain").build();
        let result = compile_target(
            &target(&doc, "paragraphs().nth(1)"),
            &EditIntent::Insert {
                position: InsertPosition::Before,
                text: String::new(),
            },
        );
        assert!(matches!(result, Err(CompileError::Usage(_))));
    }

    #[test]
    fn test_object_insert_validates_payload() {
        assert!(matches!(
            object_request(3, &ObjectInsert::Image { uri: "  ".to_string(), alt_text: None }),
            Err(CompileError::Usage(_))
        ));
        assert!(matches!(
            object_request(3, &ObjectInsert::Table { rows: 0, columns: 2 }),
            Err(CompileError::Usage(_))
        ));
        assert_eq!(
            object_request(3, &ObjectInsert::default_table()).unwrap(),
            Request::insert_table(3, 2, 2)
        );
    }
}
