//! Filter payload normalization.
//!
//! The agent hands adapters either a JSON object or a string holding one
//! (sometimes a JSON string that itself encodes the object). `Filter::from_input`
//! collapses every accepted representation into one canonical map before any
//! adapter logic runs.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("filter payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("filter payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Normalized search constraints. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    values: Map<String, Value>,
}

impl Filter {
    /// Parses the raw action input produced by the agent.
    pub fn from_input(input: &str) -> Result<Self, FilterError> {
        let value: Value = serde_json::from_str(input.trim())?;
        Self::from_value(value)
    }

    /// Accepts a native object, or a string that encodes one.
    pub fn from_value(value: Value) -> Result<Self, FilterError> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            Value::String(encoded) => {
                let inner: Value = serde_json::from_str(encoded.trim())?;
                match inner {
                    Value::Object(values) => Ok(Self { values }),
                    other => Err(FilterError::NotAnObject(kind(&other))),
                }
            }
            other => Err(FilterError::NotAnObject(kind(&other))),
        }
    }

    /// The value for `key` as query-string text, or `None` when absent or blank.
    ///
    /// Strings pass through untouched; booleans and numbers use their JSON text.
    pub fn get(&self, key: &str) -> Option<String> {
        let text = match self.values.get(key)? {
            Value::Null => return None,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// The value for `key`, or `""` when absent.
    pub fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }

    /// First present value among `keys`, in order.
    pub fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| self.get(k))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
