use docsel_model::Block;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetKind {
    Block,
    BlockRange,
    TextRange,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Block => "block",
            TargetKind::BlockRange => "blockRange",
            TargetKind::TextRange => "textRange",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a selector resolved to. Text offsets are UTF-16 units into the
/// paragraph's plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TargetSelection {
    Block { block: Block },
    BlockRange { blocks: Vec<Block> },
    #[serde(rename_all = "camelCase")]
    TextRange {
        paragraph: Block,
        start_offset: usize,
        end_offset: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetContext {
    pub heading_path: Vec<String>,
    pub snippet: String,
    pub conflicts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTarget {
    #[serde(flatten)]
    pub selection: TargetSelection,
    pub context: TargetContext,
}

impl ResolvedTarget {
    pub fn kind(&self) -> TargetKind {
        match self.selection {
            TargetSelection::Block { .. } => TargetKind::Block,
            TargetSelection::BlockRange { .. } => TargetKind::BlockRange,
            TargetSelection::TextRange { .. } => TargetKind::TextRange,
        }
    }

    /// The single block, every block of a range, or the text range's paragraph
    pub fn member_blocks(&self) -> Vec<&Block> {
        match &self.selection {
            TargetSelection::Block { block } => vec![block],
            TargetSelection::BlockRange { blocks } => blocks.iter().collect(),
            TargetSelection::TextRange { paragraph, .. } => vec![paragraph],
        }
    }

    pub fn first_block(&self) -> Option<&Block> {
        self.member_blocks().first().copied()
    }

    pub fn last_block(&self) -> Option<&Block> {
        self.member_blocks().last().copied()
    }

    pub fn has_inline_conflict(&self) -> bool {
        self.context.conflicts.iter().any(|tag| tag.starts_with("inline:"))
    }

    pub fn has_atomic_conflict(&self) -> bool {
        self.context.conflicts.iter().any(|tag| tag.starts_with("atomic:"))
    }

    /// Plain text the target covers: the range slice, the paragraph text,
    /// or paragraph texts of a range joined with newlines
    pub fn text(&self) -> String {
        match &self.selection {
            TargetSelection::TextRange {
                paragraph,
                start_offset,
                end_offset,
            } => paragraph
                .as_paragraph()
                .and_then(|p| p.text_slice(*start_offset, *end_offset))
                .unwrap_or_default()
                .to_string(),
            TargetSelection::Block { block } => match block.plain_text() {
                Some(text) => text.to_string(),
                None => self.context.snippet.clone(),
            },
            TargetSelection::BlockRange { blocks } => {
                let texts: Vec<&str> = blocks.iter().filter_map(Block::plain_text).collect();
                if texts.is_empty() {
                    self.context.snippet.clone()
                } else {
                    texts.join("\n")
                }
            }
        }
    }
}
