//! Core value handling for front matter fields
//!
//! Front matter values are held as `serde_json::Value` so that configured
//! defaults (JSON) and parsed front matter (YAML) share one representation.
//! This module converts between the two and implements schema-driven
//! coercion of individual field values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Declared type of a front matter field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Boolean,
    Array,
    Object,
    Number,
    Date,
}

impl FieldType {
    /// Infer a field type from a value currently present in front matter.
    ///
    /// Used for list-form schemas that name fields without typing them.
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::Array(_) => Self::Array,
            Value::Object(_) | Value::Null => Self::Object,
            Value::String(_) => Self::String,
        }
    }

    /// Coerce a value into this type
    pub fn coerce(self, value: Value) -> Value {
        match self {
            Self::Boolean => Value::Bool(coerce_bool(&value)),
            Self::Number => Value::Number(coerce_number(&value)),
            Self::Array => coerce_array(value),
            Self::Date | Self::String => match value {
                Value::String(_) => value,
                other => Value::String(to_string_representation(&other)),
            },
            Self::Object => value,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Boolean => write!(f, "boolean"),
            Self::Array => write!(f, "array"),
            Self::Object => write!(f, "object"),
            Self::Number => write!(f, "number"),
            Self::Date => write!(f, "date"),
        }
    }
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        other => is_truthy(other),
    }
}

fn coerce_number(value: &Value) -> Number {
    match value {
        Value::Number(n) => n.clone(),
        Value::String(s) => parse_number(s.trim()).unwrap_or_else(|| Number::from(0)),
        Value::Bool(b) => Number::from(u8::from(*b)),
        _ => Number::from(0),
    }
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

fn coerce_array(value: Value) -> Value {
    match value {
        Value::Array(_) => value,
        Value::String(s) => Value::Array(
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| Value::String(part.to_string()))
                .collect(),
        ),
        Value::Null => Value::Array(Vec::new()),
        other => Value::Array(vec![other]),
    }
}

/// General truthiness: null, `false`, zero and the empty string are false
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Convert to string with fallback representations
///
/// Arrays are joined with commas; objects are rendered as compact JSON.
pub fn to_string_representation(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_string_representation(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Convert a parsed YAML value into the JSON representation.
///
/// Mapping keys that are not strings are stringified; tagged values keep
/// their inner value.
pub fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(n.to_string()))
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut out = Map::new();
            for (k, v) in map {
                let key = match yaml_to_json(k) {
                    Value::String(s) => s,
                    other => to_string_representation(&other),
                };
                out.insert(key, yaml_to_json(v));
            }
            Value::Object(out)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

/// Deep merge `overlay` onto `base`.
///
/// Objects merge key by key recursively. Any other value in the overlay,
/// arrays included, replaces the base value wholesale.
pub fn merge_json_values(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => {
                        let previous = std::mem::take(existing);
                        *existing = merge_json_values(previous, value);
                    }
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}
