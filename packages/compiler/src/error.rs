use docsel_common::{Coded, ErrorCode};
use docsel_model::ModelError;
use serde_json::{json, Value};
use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Target overlaps inline objects: {}", conflicts.join(", "))]
    InlineObjectConflict { conflicts: Vec<String> },

    #[error("Target overlaps atomic objects: {}", conflicts.join(", "))]
    AtomicObjectConflict { conflicts: Vec<String> },

    #[error("Unsupported selection for {intent}: expected {expected}")]
    UnsupportedSelection {
        intent: String,
        expected: String,
        actual: String,
    },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl CompileError {
    pub fn inline_conflict(conflicts: &[String]) -> Self {
        Self::InlineObjectConflict {
            conflicts: conflicts.to_vec(),
        }
    }

    pub fn atomic_conflict(conflicts: &[String]) -> Self {
        Self::AtomicObjectConflict {
            conflicts: conflicts.to_vec(),
        }
    }

    pub fn unsupported(intent: &str, expected: &str, actual: impl Into<String>) -> Self {
        Self::UnsupportedSelection {
            intent: intent.to_string(),
            expected: expected.to_string(),
            actual: actual.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}

impl Coded for CompileError {
    fn code(&self) -> ErrorCode {
        match self {
            CompileError::InlineObjectConflict { .. } => ErrorCode::InlineObjectConflictError,
            CompileError::AtomicObjectConflict { .. } => ErrorCode::AtomicObjectConflictError,
            CompileError::UnsupportedSelection { .. } => ErrorCode::UnsupportedSelectionError,
            CompileError::UnsupportedOperation(_) => ErrorCode::UnsupportedOperationError,
            CompileError::Usage(_) => ErrorCode::UsageError,
            CompileError::Model(err) => err.code(),
        }
    }

    fn details(&self) -> Value {
        match self {
            CompileError::InlineObjectConflict { conflicts } | CompileError::AtomicObjectConflict { conflicts } => {
                json!({ "conflicts": conflicts })
            }
            CompileError::UnsupportedSelection {
                intent,
                expected,
                actual,
            } => json!({ "intent": intent, "expected": expected, "actual": actual }),
            CompileError::Model(err) => err.details(),
            CompileError::UnsupportedOperation(_) | CompileError::Usage(_) => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_report_carries_tags() {
        let err = CompileError::inline_conflict(&["inline:node-3".to_string()]);
        let report = err.report();
        assert_eq!(report.code, ErrorCode::InlineObjectConflictError);
        assert_eq!(report.details, json!({ "conflicts": ["inline:node-3"] }));
        assert_eq!(report.message, "Target overlaps inline objects: inline:node-3");
    }

    #[test]
    fn test_usage_error_code() {
        assert_eq!(CompileError::usage("bad level").code(), ErrorCode::UsageError);
    }
}
