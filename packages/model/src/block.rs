use crate::error::{ModelError, ModelResult};
use crate::range_map::RangeMap;
use crate::raw::RgbColor;
use crate::text::{slice_utf16, truncate_snippet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Font family applied to code paragraphs
pub const CODE_FONT_FAMILY: &str = "Courier New";

const MONOSPACE_FAMILIES: &[&str] = &[
    CODE_FONT_FAMILY,
    "Courier",
    "Consolas",
    "Cousine",
    "Fira Code",
    "Inconsolata",
    "JetBrains Mono",
    "Menlo",
    "Monaco",
    "Roboto Mono",
    "Source Code Pro",
    "Ubuntu Mono",
];

pub fn is_monospace_family(family: &str) -> bool {
    MONOSPACE_FAMILIES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(family.trim()))
}

/// Half-open `[start, end)` range in API index space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRange {
    pub start: usize,
    pub end: usize,
}

impl ApiRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingRef {
    pub node_id: String,
    pub text: String,
    pub normalized_text: String,
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockFlags {
    pub is_atomic: bool,
    pub contains_inline_atomic: bool,
    pub is_heading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
    pub is_list_item: bool,
    pub is_code_paragraph: bool,
}

impl BlockFlags {
    pub fn atomic() -> Self {
        Self {
            is_atomic: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    Paragraph,
    Table,
    HorizontalRule,
    Embed,
    SectionBreak,
    PageBreak,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Table => "table",
            BlockType::HorizontalRule => "horizontalRule",
            BlockType::Embed => "embed",
            BlockType::SectionBreak => "sectionBreak",
            BlockType::PageBreak => "pageBreak",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_style_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_end: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shading: Option<RgbColor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

/// One inline element of a paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InlineRun {
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        style: TextStyle,
        api_range: ApiRange,
    },
    #[serde(rename_all = "camelCase")]
    InlineImage {
        #[serde(skip_serializing_if = "Option::is_none")]
        object_id: Option<String>,
        api_range: ApiRange,
    },
    #[serde(rename_all = "camelCase")]
    SmartChip {
        chip_type: String,
        display_text: String,
        api_range: ApiRange,
    },
}

impl InlineRun {
    pub fn api_range(&self) -> ApiRange {
        match self {
            InlineRun::Text { api_range, .. }
            | InlineRun::InlineImage { api_range, .. }
            | InlineRun::SmartChip { api_range, .. } => *api_range,
        }
    }

    pub fn is_inline_image(&self) -> bool {
        matches!(self, InlineRun::InlineImage { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub plain_text: String,
    pub runs: Vec<InlineRun>,
    pub style: ParagraphStyle,
    pub range_map: RangeMap,
}

impl Paragraph {
    /// Slice of the plain text in UTF-16 offsets
    pub fn text_slice(&self, start: usize, end: usize) -> Option<&str> {
        slice_utf16(&self.plain_text, start, end)
    }
}

/// Marks an embed synthesized from an inline image inside a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineSource {
    pub paragraph_node_id: String,
    pub run_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockContent {
    Paragraph(Paragraph),
    Table {
        rows: usize,
        columns: usize,
    },
    HorizontalRule,
    #[serde(rename_all = "camelCase")]
    Embed {
        object_kind: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        inline: Option<InlineSource>,
    },
    SectionBreak,
    PageBreak,
}

/// One top-level structural unit of the document body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub node_id: String,
    pub parent_container_id: String,
    pub api_range: ApiRange,
    pub heading_path: Vec<HeadingRef>,
    pub flags: BlockFlags,
    #[serde(flatten)]
    pub content: BlockContent,
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        match &self.content {
            BlockContent::Paragraph(_) => BlockType::Paragraph,
            BlockContent::Table { .. } => BlockType::Table,
            BlockContent::HorizontalRule => BlockType::HorizontalRule,
            BlockContent::Embed { .. } => BlockType::Embed,
            BlockContent::SectionBreak => BlockType::SectionBreak,
            BlockContent::PageBreak => BlockType::PageBreak,
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match &self.content {
            BlockContent::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub fn is_paragraph(&self) -> bool {
        self.as_paragraph().is_some()
    }

    pub fn plain_text(&self) -> Option<&str> {
        self.as_paragraph().map(|p| p.plain_text.as_str())
    }

    pub fn heading_level(&self) -> Option<u8> {
        self.flags.heading_level
    }

    /// Heading texts from outermost to innermost
    pub fn heading_path_texts(&self) -> Vec<String> {
        self.heading_path.iter().map(|h| h.text.clone()).collect()
    }

    pub fn expect_paragraph(&self) -> ModelResult<&Paragraph> {
        self.as_paragraph()
            .ok_or_else(|| ModelError::not_a_paragraph(&self.node_id))
    }

    /// API index of a plain-text offset of this paragraph
    pub fn map_offset_to_index(&self, offset: usize) -> ModelResult<usize> {
        self.expect_paragraph()?
            .range_map
            .map_offset(offset, self.api_range.start)
    }

    /// End of the block in API space, including inline objects after the last run
    pub fn paragraph_end_index(&self) -> usize {
        match self.as_paragraph() {
            Some(paragraph) => paragraph.range_map.end_index(self.api_range.end),
            None => self.api_range.end,
        }
    }

    /// Short human-readable description used by list views
    pub fn snippet(&self) -> String {
        match &self.content {
            BlockContent::Paragraph(paragraph) => truncate_snippet(&paragraph.plain_text, 80),
            BlockContent::Table { rows, columns } => format!("Table {}x{}", rows, columns),
            BlockContent::HorizontalRule => "Horizontal rule".to_string(),
            BlockContent::Embed { object_kind, .. } => format!("Embed {}", object_kind).trim().to_string(),
            BlockContent::SectionBreak => "Section break".to_string(),
            BlockContent::PageBreak => "Page break".to_string(),
        }
    }
}
