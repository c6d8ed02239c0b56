//! Tree value representation.
//!
//! A `Value` is the untyped, recursively nested data the path operations work
//! on: scalars, ordered arrays, and insertion-ordered string-keyed objects.
//! Values are usually decoded from JSON or YAML by a caller, but every
//! operation in this crate works on the already-decoded form.
//!
//! # Example
//!
//! ```
//! use treepath::document::{Number, Value};
//! use indexmap::IndexMap;
//!
//! let mut fields = IndexMap::new();
//! fields.insert("name".to_string(), Value::from("treepath"));
//! fields.insert("version".to_string(), Value::Number(Number::Integer(1)));
//! let object = Value::Object(fields);
//!
//! assert!(object.is_container());
//! assert_eq!(object.as_object().map(|f| f.len()), Some(2));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Represents numbers (integer or float)
///
/// Integers that do not fit `i64` but fit `u64` are kept exactly as `UInt`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    UInt(u64),
    Float(f64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::UInt(u) => write!(f, "{}", u),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::UInt(u) => *u as f64,
            Number::Float(f) => *f,
        }
    }
}

/// A tree value.
///
/// `Array` and `Object` are the only containers. Everything else is a scalar
/// and can never be indexed into, even where a string could be.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null, also used for holes left when writing past the end of an array
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Ordered sequence of values
    Array(Vec<Value>),
    /// String-keyed mapping, insertion order preserved
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Returns an empty object.
    pub fn object() -> Self {
        Value::Object(IndexMap::new())
    }

    /// Returns an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the value's kind, used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

/// Scalars render as their plain text; containers render as compact JSON.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(_) | Value::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Integer(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Value::Array(elements)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Value::Object(fields)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::UInt(u))
                } else {
                    Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(elements) => {
                Value::Array(elements.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_yaml::Number> for Number {
    fn from(n: serde_yaml::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Integer(i)
        } else if let Some(u) = n.as_u64() {
            Number::UInt(u)
        } else {
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// Converts a YAML value. Tags are dropped and mapping keys that are not
/// strings are stored under their text (`200: ok` becomes `{"200": "ok"}`).
impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => Value::Number(Number::from(n)),
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(elements) => {
                Value::Array(elements.into_iter().map(Value::from).collect())
            }
            serde_yaml::Value::Mapping(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (yaml_key(key), Value::from(value)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => Value::from(other).to_string(),
    }
}
