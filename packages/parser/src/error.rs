use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Syntax error raised while tokenizing or parsing an expression.
///
/// Positions are byte offsets into the expression source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected character '{ch}' at {pos}")]
    UnexpectedCharacter { ch: char, pos: usize },

    #[error("Expected {expected} but found {found} at {pos}")]
    UnexpectedToken {
        pos: usize,
        expected: String,
        found: String,
    },

    #[error("Expected {expected} but reached end of input at {pos}")]
    UnexpectedEof { pos: usize, expected: String },

    #[error("Invalid string literal at {pos}: {message}")]
    InvalidString { pos: usize, message: String },
}

impl ParseError {
    pub fn unexpected_character(ch: char, pos: usize) -> Self {
        Self::UnexpectedCharacter { ch, pos }
    }

    pub fn unexpected_token(pos: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            pos,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unexpected_eof(pos: usize, expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            pos,
            expected: expected.into(),
        }
    }

    pub fn invalid_string(pos: usize, message: impl Into<String>) -> Self {
        Self::InvalidString {
            pos,
            message: message.into(),
        }
    }

    /// Byte offset the error points at
    pub fn pos(&self) -> usize {
        match self {
            ParseError::UnexpectedCharacter { pos, .. }
            | ParseError::UnexpectedToken { pos, .. }
            | ParseError::UnexpectedEof { pos, .. }
            | ParseError::InvalidString { pos, .. } => *pos,
        }
    }

    /// Short label for the offending location
    pub fn label(&self) -> String {
        match self {
            ParseError::UnexpectedCharacter { ch, .. } => format!("unexpected '{}'", ch),
            ParseError::UnexpectedToken { expected, .. } | ParseError::UnexpectedEof { expected, .. } => {
                format!("expected {}", expected)
            }
            ParseError::InvalidString { message, .. } => message.clone(),
        }
    }
}

/// Pretty-print a syntax error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &ParseError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let start = error.pos().min(source.len());
    let end = source[start..]
        .chars()
        .next()
        .map(|c| start + c.len_utf8())
        .unwrap_or(start);

    let mut output = Vec::new();
    let written = Report::build(ReportKind::Error, filename, start)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, start..end))
                .with_color(Color::Red)
                .with_message(error.label()),
        )
        .finish()
        .write((filename, Source::from(source)), &mut output);

    match written {
        Ok(()) => String::from_utf8(output).unwrap_or_else(|_| error.to_string()),
        Err(_) => error.to_string(),
    }
}
