//! Typed access to call arguments
//!
//! Every mismatch is an unsupported-selection error naming the function, the
//! argument and what was expected.

use crate::error::{ResolveError, ResolveResult};
use docsel_parser::{Call, Value};
use serde_json::json;

pub(crate) fn type_error(call: &Call, argument: &str, expected: &str, found: Option<&Value>) -> ResolveError {
    let found = found.map(Value::type_name).unwrap_or("nothing");
    ResolveError::unsupported(
        format!("{}() expects {} for {}, got {}", call.name, expected, argument, found),
        json!({ "function": call.name, "argument": argument, "expected": expected, "found": found }),
    )
}

pub fn positional_string<'a>(call: &'a Call, index: usize) -> ResolveResult<&'a str> {
    let value = call.positional(index);
    value
        .and_then(Value::as_str)
        .ok_or_else(|| type_error(call, &format!("argument {}", index + 1), "a string", value))
}

pub fn positional_number(call: &Call, index: usize) -> ResolveResult<f64> {
    let value = call.positional(index);
    value
        .and_then(Value::as_number)
        .ok_or_else(|| type_error(call, &format!("argument {}", index + 1), "a number", value))
}

pub fn named_string<'a>(call: &'a Call, name: &str) -> ResolveResult<Option<&'a str>> {
    match call.named(name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(type_error(call, name, "a string", Some(other))),
    }
}

pub fn named_number(call: &Call, name: &str) -> ResolveResult<Option<f64>> {
    match call.named(name) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(*n)),
        Some(other) => Err(type_error(call, name, "a number", Some(other))),
    }
}

pub fn named_bool(call: &Call, name: &str, fallback: bool) -> ResolveResult<bool> {
    match call.named(name) {
        None => Ok(fallback),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(type_error(call, name, "a boolean", Some(other))),
    }
}

pub fn named_call<'a>(call: &'a Call, name: &str) -> ResolveResult<Option<&'a Call>> {
    match call.named(name) {
        None => Ok(None),
        Some(Value::Call(inner)) => Ok(Some(inner)),
        Some(other) => Err(type_error(call, name, "a selector expression", Some(other))),
    }
}

pub fn required_named_call<'a>(call: &'a Call, name: &str) -> ResolveResult<&'a Call> {
    named_call(call, name)?.ok_or_else(|| type_error(call, name, "a selector expression", None))
}

pub fn unknown_function(kind: &str, name: &str) -> ResolveError {
    ResolveError::unsupported(
        format!("unknown {} function {}()", kind, name),
        json!({ "kind": kind, "function": name }),
    )
}
