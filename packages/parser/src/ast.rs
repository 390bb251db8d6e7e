use serde::{Deserialize, Serialize};

/// Argument value: a literal or a nested call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
    Call(Call),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Value::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Call(_) => "call",
        }
    }
}

/// Call argument, either positional or `name=value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Arg {
    Positional { value: Value },
    Named { name: String, value: Value },
}

impl Arg {
    pub fn value(&self) -> &Value {
        match self {
            Arg::Positional { value } | Arg::Named { value, .. } => value,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Arg::Named { .. })
    }
}

/// A single `name(args...)` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub name: String,
    pub args: Vec<Arg>,
}

impl Call {
    pub fn new(name: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Value of the `index`-th positional argument, skipping named ones
    pub fn positional(&self, index: usize) -> Option<&Value> {
        self.positional_values().nth(index)
    }

    pub fn positional_values(&self) -> impl Iterator<Item = &Value> {
        self.args.iter().filter_map(|arg| match arg {
            Arg::Positional { value } => Some(value),
            Arg::Named { .. } => None,
        })
    }

    /// Value of the first named argument called `name`
    pub fn named(&self, name: &str) -> Option<&Value> {
        self.args.iter().find_map(|arg| match arg {
            Arg::Named { name: n, value } if n == name => Some(value),
            _ => None,
        })
    }
}

/// `head(...).chain0(...).chain1(...)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallChain {
    pub head: Call,
    pub chain: Vec<Call>,
}

impl CallChain {
    /// All calls in order, head first
    pub fn calls(&self) -> impl Iterator<Item = &Call> {
        std::iter::once(&self.head).chain(self.chain.iter())
    }
}

/// A call chain interpreted as a selector expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selector {
    pub call_chain: CallChain,
}

/// A call chain interpreted as a guard expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guard {
    pub call_chain: CallChain,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_call() -> Call {
        Call::new(
            "match",
            vec![
                Arg::Positional {
                    value: Value::String("foo".to_string()),
                },
                Arg::Named {
                    name: "occurrence".to_string(),
                    value: Value::Number(2.0),
                },
                Arg::Positional {
                    value: Value::Bool(true),
                },
            ],
        )
    }

    #[test]
    fn test_positional_skips_named() {
        let call = sample_call();
        assert_eq!(call.positional(0).and_then(Value::as_str), Some("foo"));
        assert_eq!(call.positional(1).and_then(Value::as_bool), Some(true));
        assert!(call.positional(2).is_none());
    }

    #[test]
    fn test_named_lookup() {
        let call = sample_call();
        assert_eq!(call.named("occurrence").and_then(Value::as_number), Some(2.0));
        assert!(call.named("regex").is_none());
    }

    #[test]
    fn test_values_serialize_untagged() {
        let json = serde_json::to_value(sample_call()).unwrap();
        assert_eq!(json["args"][0]["kind"], "positional");
        assert_eq!(json["args"][0]["value"], "foo");
        assert_eq!(json["args"][1]["name"], "occurrence");
    }
}
