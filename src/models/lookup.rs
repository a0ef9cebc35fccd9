//! Type-checked lookups over decoded JSON
//!
//! API payloads are schema-less by the time they reach the renderer, so every
//! extraction goes through [`Lookup`], which keeps "absent", "explicit null"
//! and "present with the wrong type" apart from a real value. Call sites have
//! to decide what each case means instead of silently getting a default.

use log::debug;
use serde_json::{Map, Value};

/// Outcome of looking up a typed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<T> {
    /// The value exists and has the requested type
    Found(T),
    /// The key (or path segment) does not exist
    Missing,
    /// The key exists and holds JSON `null`
    Null,
    /// The key exists but holds a different JSON type
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl<T> Lookup<T> {
    /// Convert into an `Option`, discarding why the value was unavailable.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    /// Like [`Lookup::found`], but records type mismatches at debug level.
    ///
    /// Absent and null values are expected in sparse payloads and stay quiet.
    pub fn found_or_log(self, context: &str) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Mismatch { expected, found } => {
                debug!("Ignoring {}: expected {}, found {}", context, expected, found);
                None
            }
            Lookup::Missing | Lookup::Null => None,
        }
    }

    /// Try an alternative lookup when this one produced no value.
    pub fn or_else(self, f: impl FnOnce() -> Lookup<T>) -> Lookup<T> {
        match self {
            Lookup::Found(value) => Lookup::Found(value),
            _ => f(),
        }
    }
}

/// JSON type name used in diagnostics.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn typed<'a, T>(
    value: Option<&'a Value>,
    expected: &'static str,
    cast: impl FnOnce(&'a Value) -> Option<T>,
) -> Lookup<T> {
    match value {
        None => Lookup::Missing,
        Some(Value::Null) => Lookup::Null,
        Some(v) => match cast(v) {
            Some(t) => Lookup::Found(t),
            None => Lookup::Mismatch {
                expected,
                found: kind_name(v),
            },
        },
    }
}

/// Interpret a value as an object.
pub fn as_object(value: &Value) -> Lookup<&Map<String, Value>> {
    typed(Some(value), "object", Value::as_object)
}

/// Fetch a key of any type.
pub fn get<'a>(obj: &'a Map<String, Value>, key: &str) -> Lookup<&'a Value> {
    typed(obj.get(key), "any", Some)
}

pub fn get_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Lookup<&'a str> {
    typed(obj.get(key), "string", Value::as_str)
}

pub fn get_bool(obj: &Map<String, Value>, key: &str) -> Lookup<bool> {
    typed(obj.get(key), "boolean", Value::as_bool)
}

pub fn get_object<'a>(obj: &'a Map<String, Value>, key: &str) -> Lookup<&'a Map<String, Value>> {
    typed(obj.get(key), "object", Value::as_object)
}

pub fn get_array<'a>(obj: &'a Map<String, Value>, key: &str) -> Lookup<&'a Vec<Value>> {
    typed(obj.get(key), "array", Value::as_array)
}

/// Walk a dotted path such as `attributes.name` or `relationships.runs.0`.
///
/// Numeric segments index into arrays. An empty path returns the root.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Lookup<&'a Value> {
    let mut current = root;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => match segment.parse::<usize>() {
                Ok(index) => items.get(index),
                Err(_) => {
                    return Lookup::Mismatch {
                        expected: "object",
                        found: "array",
                    };
                }
            },
            Value::Null => return Lookup::Null,
            other => {
                return Lookup::Mismatch {
                    expected: "object",
                    found: kind_name(other),
                };
            }
        };
        match next {
            Some(value) => current = value,
            None => return Lookup::Missing,
        }
    }
    match current {
        Value::Null => Lookup::Null,
        value => Lookup::Found(value),
    }
}
