//! Reusable formatting utilities for CLI output
//!
//! This module holds the fixed formatting constants and the one-line text form
//! of a [`DisplayValue`] that the table and key-value renderers share.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::models::DisplayValue;

/// Printed in place of any sensitive value, in every output format.
pub const REDACTED_MARKER: &str = "(sensitive)";

/// Printed for absent values in text output.
pub const PLACEHOLDER: &str = "-";

/// Default text format for timestamps (UTC).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format used in JSON output.
pub const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Formatting settings injected into the text renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// strftime-style format for timestamps in text output
    pub timestamp_format: String,
    /// Decorate text output with ANSI colors
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            color: false,
        }
    }
}

/// Check that a strftime format string contains no invalid specifiers.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Format a timestamp, falling back to ISO-8601 if the format is unusable.
pub fn format_timestamp(ts: &DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", ts.format(format)).is_err() {
        return ts.format(ISO_TIMESTAMP_FORMAT).to_string();
    }
    out
}

/// Format a millisecond duration, e.g. `42ms` or `1.5ms`.
pub fn format_duration_ms(millis: f64) -> String {
    format!("{}ms", millis)
}

/// Replace control characters (newlines, tabs) with spaces.
///
/// Text output is one line per row or field, and column widths assume every
/// character advances the cursor.
pub fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Single-line text for a value.
///
/// Collections are summarized: lists as comma-joined items, maps as
/// comma-joined `key=value` pairs, with deeper levels in brackets.
pub fn format_inline(value: &DisplayValue, opts: &RenderOptions) -> String {
    match value {
        DisplayValue::Nested(children) => children
            .iter()
            .map(|(key, child)| format!("{}={}", single_line(key), format_nested(child, opts)))
            .collect::<Vec<_>>()
            .join(", "),
        DisplayValue::List(items) => items
            .iter()
            .map(|item| format_nested(item, opts))
            .collect::<Vec<_>>()
            .join(", "),
        scalar => format_scalar(scalar, opts),
    }
}

fn format_nested(value: &DisplayValue, opts: &RenderOptions) -> String {
    match value {
        DisplayValue::Nested(_) => format!("{{{}}}", format_inline(value, opts)),
        DisplayValue::List(_) => format!("[{}]", format_inline(value, opts)),
        scalar => format_scalar(scalar, opts),
    }
}

fn format_scalar(value: &DisplayValue, opts: &RenderOptions) -> String {
    match value {
        DisplayValue::String(s) => single_line(s),
        DisplayValue::Number(n) => n.to_string(),
        DisplayValue::Bool(b) => b.to_string(),
        DisplayValue::Timestamp(ts) => format_timestamp(ts, &opts.timestamp_format),
        DisplayValue::Redacted => REDACTED_MARKER.to_string(),
        DisplayValue::Null => PLACEHOLDER.to_string(),
        DisplayValue::Nested(_) | DisplayValue::List(_) => format_inline(value, opts),
    }
}
