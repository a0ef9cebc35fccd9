//! Key-value output for single-object detail views

use super::formatters::{RenderOptions, format_inline, single_line};
use crate::models::{DisplayValue, Entity};

/// Indentation of nested sub-keys
const NESTED_INDENT: &str = "  ";

/// Render an entity as `Key: value` lines in insertion order.
///
/// Nested objects are expanded one level, their sub-keys indented under the
/// parent key. Anything deeper is summarized on one line.
pub fn render_key_value(entity: &Entity, opts: &RenderOptions) -> String {
    let mut lines = Vec::with_capacity(entity.len());

    for (key, value) in entity.iter() {
        match value {
            DisplayValue::Nested(children) if !children.is_empty() => {
                lines.push(format!("{}:", single_line(key)));
                for (child_key, child) in children {
                    lines.push(line(
                        &format!("{}{}", NESTED_INDENT, single_line(child_key)),
                        &format_inline(child, opts),
                    ));
                }
            }
            _ => lines.push(line(&single_line(key), &format_inline(value, opts))),
        }
    }

    lines.join("\n")
}

fn line(key: &str, value: &str) -> String {
    format!("{}: {}", key, value).trim_end().to_string()
}
