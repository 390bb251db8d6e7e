use docsel_parser::ParseError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

/// Stable kind tag carried by every error the core raises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    SyntaxError,
    NoMatchError,
    AmbiguousMatchError,
    UnsupportedSelectionError,
    InlineObjectConflictError,
    AtomicObjectConflictError,
    RevisionMismatchError,
    ExpectationFailedError,
    UnsupportedOperationError,
    UsageError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::SyntaxError => "SyntaxError",
            ErrorCode::NoMatchError => "NoMatchError",
            ErrorCode::AmbiguousMatchError => "AmbiguousMatchError",
            ErrorCode::UnsupportedSelectionError => "UnsupportedSelectionError",
            ErrorCode::InlineObjectConflictError => "InlineObjectConflictError",
            ErrorCode::AtomicObjectConflictError => "AtomicObjectConflictError",
            ErrorCode::RevisionMismatchError => "RevisionMismatchError",
            ErrorCode::ExpectationFailedError => "ExpectationFailedError",
            ErrorCode::UnsupportedOperationError => "UnsupportedOperationError",
            ErrorCode::UsageError => "UsageError",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can describe themselves as a stable code plus a details payload
pub trait Coded: std::error::Error {
    fn code(&self) -> ErrorCode;

    fn details(&self) -> serde_json::Value {
        serde_json::Value::Null
    }

    fn report(&self) -> ErrorReport {
        ErrorReport::new(self.code(), self.to_string(), self.details())
    }
}

impl Coded for ParseError {
    fn code(&self) -> ErrorCode {
        ErrorCode::SyntaxError
    }

    fn details(&self) -> serde_json::Value {
        json!({ "position": self.pos() })
    }
}

/// Serializable `{code, message, details}` record handed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UsageError, message, serde_json::Value::Null)
    }
}

impl From<&ParseError> for ErrorReport {
    fn from(error: &ParseError) -> Self {
        error.report()
    }
}

impl From<ParseError> for ErrorReport {
    fn from(error: ParseError) -> Self {
        error.report()
    }
}
