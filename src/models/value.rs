//! Display value coercion
//!
//! Raw API values are coerced into a [`DisplayValue`] before any renderer sees
//! them. Redaction happens here and only here, so every renderer works from a
//! model in which sensitive data no longer exists.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::{Number, Value};

use super::lookup::{self, Lookup};

/// Canonical displayable value.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    String(String),
    Number(Number),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    /// A sensitive value. The original is gone; renderers print a fixed marker.
    Redacted,
    /// Ordered child fields of a JSON object
    Nested(Vec<(String, DisplayValue)>),
    List(Vec<DisplayValue>),
    Null,
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        DisplayValue::String(value.to_string())
    }
}

impl From<String> for DisplayValue {
    fn from(value: String) -> Self {
        DisplayValue::String(value)
    }
}

impl From<bool> for DisplayValue {
    fn from(value: bool) -> Self {
        DisplayValue::Bool(value)
    }
}

impl From<i64> for DisplayValue {
    fn from(value: i64) -> Self {
        DisplayValue::Number(value.into())
    }
}

impl From<u64> for DisplayValue {
    fn from(value: u64) -> Self {
        DisplayValue::Number(value.into())
    }
}

impl From<f64> for DisplayValue {
    fn from(value: f64) -> Self {
        // NaN and infinities have no JSON number form
        match Number::from_f64(value) {
            Some(n) => DisplayValue::Number(n),
            None => DisplayValue::String(value.to_string()),
        }
    }
}

impl From<DateTime<Utc>> for DisplayValue {
    fn from(value: DateTime<Utc>) -> Self {
        DisplayValue::Timestamp(value)
    }
}

impl<T: Into<DisplayValue>> From<Option<T>> for DisplayValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DisplayValue::Null, Into::into)
    }
}

/// How the caller wants a raw value interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueHint {
    /// Follow the JSON type
    #[default]
    Auto,
    /// Parse as a point in time (RFC 3339 string or epoch milliseconds)
    Timestamp,
}

/// Coerce a raw value, redacting it when `sensitive` is set.
///
/// The sensitivity check comes before any inspection of `raw`, so even an
/// absent or null sensitive value becomes [`DisplayValue::Redacted`].
pub fn coerce(raw: Option<&Value>, sensitive: bool) -> DisplayValue {
    if sensitive {
        return DisplayValue::Redacted;
    }
    coerce_value(raw, ValueHint::Auto, &[])
}

fn coerce_value(raw: Option<&Value>, hint: ValueHint, sensitive_keys: &[String]) -> DisplayValue {
    let Some(value) = raw else {
        return DisplayValue::Null;
    };

    if hint == ValueHint::Timestamp {
        if let Some(ts) = parse_timestamp(value) {
            return DisplayValue::Timestamp(ts);
        }
    }

    match value {
        Value::Null => DisplayValue::Null,
        Value::Bool(b) => DisplayValue::Bool(*b),
        Value::Number(n) => DisplayValue::Number(n.clone()),
        Value::String(s) => DisplayValue::String(s.clone()),
        Value::Array(items) => DisplayValue::List(
            items
                .iter()
                .map(|item| coerce_value(Some(item), ValueHint::Auto, sensitive_keys))
                .collect(),
        ),
        Value::Object(map) => DisplayValue::Nested(
            map.iter()
                .map(|(key, child)| {
                    let coerced = if sensitive_keys.iter().any(|k| k == key) {
                        DisplayValue::Redacted
                    } else {
                        coerce_value(Some(child), ValueHint::Auto, sensitive_keys)
                    };
                    (key.clone(), coerced)
                })
                .collect(),
        ),
    }
}

/// Parse a timestamp from an RFC 3339 string or epoch milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            s.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
        }
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// One caller-selected field: where to find it and how to present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column header or key-value label
    pub label: String,
    /// Dotted path into the source object
    pub path: String,
    pub sensitive: bool,
    pub hint: ValueHint,
    /// Omit the field from single-entity views when the source lacks it
    pub optional: bool,
    /// Keys redacted anywhere inside a nested value
    pub sensitive_keys: Vec<String>,
}

impl FieldSpec {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            sensitive: false,
            hint: ValueHint::Auto,
            optional: false,
            sensitive_keys: Vec::new(),
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn timestamp(mut self) -> Self {
        self.hint = ValueHint::Timestamp;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn redact_key(mut self, key: impl Into<String>) -> Self {
        self.sensitive_keys.push(key.into());
        self
    }

    /// Coerce a raw value according to this field's hints.
    pub fn coerce(&self, raw: Option<&Value>) -> DisplayValue {
        // Sensitive and plain fields go through the single redaction gate
        if self.sensitive || (self.hint == ValueHint::Auto && self.sensitive_keys.is_empty()) {
            return coerce(raw, self.sensitive);
        }
        coerce_value(raw, self.hint, &self.sensitive_keys)
    }

    /// Look up and coerce this field from a source object.
    ///
    /// Returns `None` only for optional fields the source does not carry.
    pub fn extract(&self, source: &Value) -> Option<DisplayValue> {
        let raw = lookup::get_path(source, &self.path).found_or_log(&self.path);
        if raw.is_none() && self.optional {
            return None;
        }
        Some(self.coerce(raw))
    }

    /// Derive one field per top-level key of a sample object.
    ///
    /// Keys listed in `redact` become sensitive fields and are also redacted
    /// inside nested values.
    pub fn infer(sample: &Value, redact: &[String]) -> Vec<FieldSpec> {
        let Lookup::Found(obj) = lookup::as_object(sample) else {
            return Vec::new();
        };
        obj.keys()
            .map(|key| {
                let mut spec = FieldSpec::new(key.clone(), key.clone());
                spec.sensitive = redact.iter().any(|r| r == key);
                spec.sensitive_keys = redact.to_vec();
                spec
            })
            .collect()
    }
}

impl FromStr for FieldSpec {
    type Err = String;

    /// Parse `LABEL=PATH[:sensitive|:timestamp|:optional]...`.
    ///
    /// Without `=`, the path doubles as the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let head = parts.next().unwrap_or_default().trim();
        let (label, path) = match head.split_once('=') {
            Some((label, path)) => (label.trim(), path.trim()),
            None => (head, head),
        };
        if label.is_empty() || path.is_empty() {
            return Err(format!("invalid field '{}': expected LABEL=PATH", s));
        }

        let mut spec = FieldSpec::new(label, path);
        for modifier in parts {
            spec = match modifier.trim() {
                "sensitive" => spec.sensitive(),
                "timestamp" => spec.timestamp(),
                "optional" => spec.optional(),
                other => {
                    return Err(format!(
                        "unknown field modifier '{}' (expected sensitive, timestamp or optional)",
                        other
                    ));
                }
            };
        }
        Ok(spec)
    }
}
