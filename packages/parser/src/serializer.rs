use crate::ast::*;
use std::fmt::Write;

/// Serializer renders an AST back to canonical expression text.
///
/// Canonical form: strings JSON-quoted, finite numbers in shortest decimal
/// form (non-finite as `0`), booleans as `true`/`false`, arguments joined by
/// `", "`, chain links joined by `.`. Parsing the output yields an equal AST.
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    pub fn serialize_chain(mut self, chain: &CallChain) -> String {
        self.write_call(&chain.head);
        for call in &chain.chain {
            self.output.push('.');
            self.write_call(call);
        }
        self.output
    }

    pub fn serialize_call(mut self, call: &Call) -> String {
        self.write_call(call);
        self.output
    }

    fn write_call(&mut self, call: &Call) {
        self.output.push_str(&call.name);
        self.output.push('(');
        for (i, arg) in call.args.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            if let Arg::Named { name, .. } = arg {
                self.output.push_str(name);
                self.output.push('=');
            }
            self.write_value(arg.value());
        }
        self.output.push(')');
    }

    fn write_value(&mut self, value: &Value) {
        match value {
            Value::String(s) => write_quoted(&mut self.output, s),
            Value::Number(n) => self.output.push_str(&format_number(*n)),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Call(call) => self.write_call(call),
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() {
        n.to_string()
    } else {
        "0".to_string()
    }
}

/// JSON-style string quoting
pub fn write_quoted(output: &mut String, s: &str) {
    output.push('"');
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\u{8}' => output.push_str("\\b"),
            '\u{c}' => output.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write!(output, "\\u{:04x}", c as u32);
            }
            c => output.push(c),
        }
    }
    output.push('"');
}

pub fn quote(s: &str) -> String {
    let mut output = String::with_capacity(s.len() + 2);
    write_quoted(&mut output, s);
    output
}

pub fn serialize(chain: &CallChain) -> String {
    Serializer::new().serialize_chain(chain)
}

pub fn normalize_selector(selector: &Selector) -> String {
    serialize(&selector.call_chain)
}

pub fn normalize_guard(guard: &Guard) -> String {
    serialize(&guard.call_chain)
}
