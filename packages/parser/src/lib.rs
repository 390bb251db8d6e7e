//! # Docsel expression language
//!
//! Selectors and guards share one textual syntax: a chain of function calls
//! whose arguments are literals, `name=value` pairs, or nested calls.
//!
//! ```text
//! under(heading("Intro")).match("TODO", occurrence=2).nth(1)
//! all(ifRevision("abc"), expectContains("draft"))
//! ```
//!
//! Parsing yields a [`CallChain`]; [`serialize`] renders it back to canonical
//! text, and the two round-trip.

pub mod ast;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod tokenizer;

pub use ast::{Arg, Call, CallChain, Guard, Selector, Value};
pub use error::{ParseError, ParseResult};
pub use parser::{parse_call_chain, parse_guard, parse_selector, Parser};
pub use serializer::{normalize_guard, normalize_selector, quote, serialize, Serializer};
pub use tokenizer::{tokenize, Token};

#[cfg(feature = "pretty-errors")]
pub use error::format_error;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_basic() {
        let tokens = tokenize("heading(\"Title\")").unwrap();
        assert_eq!(tokens.len(), 4);
    }
}
