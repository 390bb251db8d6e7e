use docsel_common::{Coded, ErrorCode};
use docsel_parser::ParseError;
use serde_json::{json, Value};
use thiserror::Error;

pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] ParseError),

    #[error("No matches for selector")]
    NoMatch { details: Value },

    #[error("Selector matched {count} targets")]
    AmbiguousMatch { count: usize, hints: Vec<String> },

    #[error("Unsupported selection: {reason}")]
    UnsupportedSelection { reason: String, details: Value },

    #[error("Invalid regular expression {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Revision mismatch: expected {expected}, document is at {actual}")]
    RevisionMismatch { expected: String, actual: String },

    #[error("Expectation failed: {guard}")]
    ExpectationFailed { guard: String },
}

impl ResolveError {
    pub fn no_match() -> Self {
        Self::NoMatch { details: Value::Null }
    }

    pub fn no_match_with(details: Value) -> Self {
        Self::NoMatch { details }
    }

    pub fn unsupported(reason: impl Into<String>, details: Value) -> Self {
        Self::UnsupportedSelection {
            reason: reason.into(),
            details,
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, err: &regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: err.to_string(),
        }
    }

    pub fn revision_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::RevisionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn expectation_failed(guard: impl Into<String>) -> Self {
        Self::ExpectationFailed { guard: guard.into() }
    }
}

impl Coded for ResolveError {
    fn code(&self) -> ErrorCode {
        match self {
            ResolveError::Syntax(_) | ResolveError::InvalidPattern { .. } => ErrorCode::SyntaxError,
            ResolveError::NoMatch { .. } => ErrorCode::NoMatchError,
            ResolveError::AmbiguousMatch { .. } => ErrorCode::AmbiguousMatchError,
            ResolveError::UnsupportedSelection { .. } => ErrorCode::UnsupportedSelectionError,
            ResolveError::RevisionMismatch { .. } => ErrorCode::RevisionMismatchError,
            ResolveError::ExpectationFailed { .. } => ErrorCode::ExpectationFailedError,
        }
    }

    fn details(&self) -> Value {
        match self {
            ResolveError::Syntax(err) => err.details(),
            ResolveError::NoMatch { details } | ResolveError::UnsupportedSelection { details, .. } => details.clone(),
            ResolveError::AmbiguousMatch { count, hints } => json!({ "count": count, "hints": hints }),
            ResolveError::InvalidPattern { pattern, message } => json!({ "pattern": pattern, "message": message }),
            ResolveError::RevisionMismatch { expected, actual } => json!({ "expected": expected, "actual": actual }),
            ResolveError::ExpectationFailed { guard } => json!({ "guard": guard }),
        }
    }
}
