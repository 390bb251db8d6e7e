use crate::error::{CompileError, CompileResult};
use crate::requests::{ParagraphStyleUpdate, TextStyleUpdate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsertPosition {
    Before,
    After,
}

/// Object to insert at the end of a paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "objectType", rename_all = "camelCase")]
pub enum ObjectInsert {
    #[serde(rename_all = "camelCase")]
    Image { uri: String, alt_text: Option<String> },
    #[serde(rename_all = "camelCase")]
    Embed { uri: String, alt_text: Option<String> },
    Table {
        #[serde(default = "default_table_size")]
        rows: u32,
        #[serde(default = "default_table_size")]
        columns: u32,
    },
    #[serde(rename = "hr")]
    HorizontalRule,
}

pub const DEFAULT_TABLE_SIZE: u32 = 2;

fn default_table_size() -> u32 {
    DEFAULT_TABLE_SIZE
}

impl ObjectInsert {
    pub fn default_table() -> Self {
        ObjectInsert::Table {
            rows: DEFAULT_TABLE_SIZE,
            columns: DEFAULT_TABLE_SIZE,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ObjectInsert::Image { .. } => "image",
            ObjectInsert::Embed { .. } => "embed",
            ObjectInsert::Table { .. } => "table",
            ObjectInsert::HorizontalRule => "hr",
        }
    }
}

/// A requested change, compiled against a resolved target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EditIntent {
    /// Insert a new paragraph before or after the target paragraph
    Insert { position: InsertPosition, text: String },

    /// Replace the matched text range
    ReplaceMatch { text: String },

    /// Replace every block of a section, re-detecting list markers
    ReplaceSection { text: String },

    /// Remove the target block or block range
    Delete,

    StyleSet { style: TextStyleUpdate },

    StyleLink { url: String },

    ParagraphStyle { style: ParagraphStyleUpdate },

    /// Insert a shaded monospace paragraph after the target paragraph
    CodeInsert { text: String },

    CodeFormat,

    ObjectInsert { object: ObjectInsert },

    ObjectDelete,
}

impl EditIntent {
    /// Paragraph style change to `HEADING_<level>`; the level must be an integer in 1..=6
    pub fn heading(level: f64) -> CompileResult<Self> {
        if level.fract() != 0.0 || !(1.0..=6.0).contains(&level) {
            return Err(CompileError::usage(format!(
                "Heading level must be an integer between 1 and 6, got {}",
                level
            )));
        }
        Ok(EditIntent::ParagraphStyle {
            style: ParagraphStyleUpdate::named(format!("HEADING_{}", level as u8)),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditIntent::Insert { .. } => "insert",
            EditIntent::ReplaceMatch { .. } => "replaceMatch",
            EditIntent::ReplaceSection { .. } => "replaceSection",
            EditIntent::Delete => "delete",
            EditIntent::StyleSet { .. } => "styleSet",
            EditIntent::StyleLink { .. } => "styleLink",
            EditIntent::ParagraphStyle { .. } => "paragraphStyle",
            EditIntent::CodeInsert { .. } => "codeInsert",
            EditIntent::CodeFormat => "codeFormat",
            EditIntent::ObjectInsert { .. } => "objectInsert",
            EditIntent::ObjectDelete => "objectDelete",
        }
    }
}
