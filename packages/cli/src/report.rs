//! Turning command failures into `{code, message, details}` reports

use colored::Colorize;
use docsel_common::{Coded, ErrorReport};
use docsel_compiler::CompileError;
use docsel_model::ModelError;
use docsel_parser::{format_error, ParseError};
use docsel_resolver::ResolveError;
use thiserror::Error;

/// A selector or guard that failed to parse, kept with its source text
#[derive(Error, Debug)]
#[error("Invalid {name}: {error}")]
pub struct ExpressionError {
    pub name: &'static str,
    pub source_text: String,
    pub error: ParseError,
}

/// Invalid command line input that clap cannot catch
#[derive(Error, Debug)]
#[error("{0}")]
pub struct UsageError(pub String);

pub fn usage(message: impl Into<String>) -> anyhow::Error {
    UsageError(message.into()).into()
}

pub fn error_report(err: &anyhow::Error) -> ErrorReport {
    if let Some(err) = err.downcast_ref::<ExpressionError>() {
        return err.error.report();
    }
    if let Some(err) = err.downcast_ref::<ResolveError>() {
        return err.report();
    }
    if let Some(err) = err.downcast_ref::<CompileError>() {
        return err.report();
    }
    if let Some(err) = err.downcast_ref::<ModelError>() {
        return err.report();
    }
    ErrorReport::usage(err.to_string())
}

/// Human-readable error for the terminal
pub fn render_error(err: &anyhow::Error) -> String {
    if let Some(expr) = err.downcast_ref::<ExpressionError>() {
        return format_error(&expr.source_text, expr.name, &expr.error);
    }
    let report = error_report(err);
    format!("{} {}", format!("{}:", report.code).red().bold(), report.message)
}
