//! Reading API responses from files or stdin
//!
//! Responses may be plain JSON or JSON:API documents, where the payload sits
//! under a top-level `data` key.

use std::io::Read;

use log::debug;
use serde_json::Value;

use crate::error::{Error, Result};

/// Read the whole input. `None` or `-` means stdin.
pub fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) if path != "-" => {
            debug!("Reading input from {}", path);
            Ok(std::fs::read_to_string(path)?)
        }
        _ => {
            debug!("Reading input from stdin");
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

pub fn parse_json(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Extract a list of objects from an array or a `{"data": [...]}` document.
pub fn unwrap_collection(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => {
                debug!("Unwrapped JSON:API collection of {} items", items.len());
                Ok(items)
            }
            _ => Err(Error::Input(
                "expected a JSON array or an object with a \"data\" array".to_string(),
            )),
        },
        _ => Err(Error::Input(
            "expected a JSON array or an object with a \"data\" array".to_string(),
        )),
    }
}

/// Extract a single object from `{"data": {...}}` or a plain object.
pub fn unwrap_object(value: Value) -> Result<Value> {
    match value {
        Value::Object(mut map) => {
            if matches!(map.get("data"), Some(Value::Object(_))) {
                if let Some(data) = map.remove("data") {
                    debug!("Unwrapped JSON:API resource");
                    return Ok(data);
                }
            }
            Ok(Value::Object(map))
        }
        _ => Err(Error::Input("expected a JSON object".to_string())),
    }
}
