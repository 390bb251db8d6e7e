use docsel_common::{Coded, ErrorCode};
use serde_json::json;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid document JSON: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("Offset {offset} out of bounds (0..{length})")]
    OffsetOutOfBounds { offset: usize, length: usize },

    #[error("Block {node_id} is not a paragraph")]
    NotAParagraph { node_id: String },
}

impl ModelError {
    pub fn offset_out_of_bounds(offset: usize, length: usize) -> Self {
        Self::OffsetOutOfBounds { offset, length }
    }

    pub fn not_a_paragraph(node_id: impl Into<String>) -> Self {
        Self::NotAParagraph {
            node_id: node_id.into(),
        }
    }
}

impl Coded for ModelError {
    fn code(&self) -> ErrorCode {
        match self {
            ModelError::InvalidDocument(_) => ErrorCode::UsageError,
            ModelError::OffsetOutOfBounds { .. } | ModelError::NotAParagraph { .. } => {
                ErrorCode::UnsupportedSelectionError
            }
        }
    }

    fn details(&self) -> serde_json::Value {
        match self {
            ModelError::InvalidDocument(err) => json!({ "line": err.line(), "column": err.column() }),
            ModelError::OffsetOutOfBounds { offset, length } => {
                json!({ "offset": offset, "textLength": length })
            }
            ModelError::NotAParagraph { node_id } => json!({ "nodeId": node_id }),
        }
    }
}
