//! JSON output formatting
//!
//! Encodes the same display model the text renderers use, so both agree on
//! which fields exist and which are redacted. Objects keep field order.

use serde_json::{Map, Value};

use super::formatters::{ISO_TIMESTAMP_FORMAT, REDACTED_MARKER};
use crate::models::{DisplayValue, Entity, Table};

/// Encode a display value as its native JSON counterpart.
pub fn to_json_value(value: &DisplayValue) -> Value {
    match value {
        DisplayValue::String(s) => Value::String(s.clone()),
        DisplayValue::Number(n) => Value::Number(n.clone()),
        DisplayValue::Bool(b) => Value::Bool(*b),
        DisplayValue::Timestamp(ts) => Value::String(ts.format(ISO_TIMESTAMP_FORMAT).to_string()),
        DisplayValue::Redacted => Value::String(REDACTED_MARKER.to_string()),
        DisplayValue::Nested(children) => Value::Object(
            children
                .iter()
                .map(|(key, child)| (key.clone(), to_json_value(child)))
                .collect(),
        ),
        DisplayValue::List(items) => Value::Array(items.iter().map(to_json_value).collect()),
        DisplayValue::Null => Value::Null,
    }
}

pub fn entity_to_json(entity: &Entity) -> Value {
    Value::Object(
        entity
            .iter()
            .map(|(key, value)| (key.to_string(), to_json_value(value)))
            .collect(),
    )
}

/// One object per row, keyed by the table headers.
pub fn table_to_json(table: &Table) -> Value {
    Value::Array(
        table
            .rows()
            .iter()
            .map(|row| {
                let object: Map<String, Value> = table
                    .headers()
                    .iter()
                    .zip(row)
                    .map(|(header, cell)| (header.clone(), to_json_value(cell)))
                    .collect();
                Value::Object(object)
            })
            .collect(),
    )
}

/// Compact JSON object for an entity
pub fn format_json_entity(entity: &Entity) -> Result<String, serde_json::Error> {
    serde_json::to_string(&entity_to_json(entity))
}

/// Compact JSON array of objects for a table
pub fn format_json_table(table: &Table) -> Result<String, serde_json::Error> {
    serde_json::to_string(&table_to_json(table))
}
