//! Table output formatting

use tabled::{
    builder::Builder,
    settings::{Modify, Padding, Style, object::Segment},
};

use super::formatters::{RenderOptions, format_inline, single_line};
use crate::error::RenderError;
use crate::models::{Row, Table};

/// Spaces between columns
const COLUMN_GAP: usize = 2;

/// Render headers and rows as left-aligned, padded columns.
///
/// Output is one header line followed by one line per row, with trailing
/// whitespace trimmed. Every row must have exactly `headers.len()` cells.
pub fn render_table(
    headers: &[String],
    rows: &[Row],
    opts: &RenderOptions,
) -> Result<String, RenderError> {
    if headers.is_empty() {
        return Err(RenderError::EmptyHeaders);
    }
    if let Some((index, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != headers.len())
    {
        return Err(RenderError::RowArity {
            row: index,
            expected: headers.len(),
            actual: row.len(),
        });
    }

    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| single_line(h)));
    for row in rows {
        builder.push_record(row.iter().map(|cell| format_inline(cell, opts)));
    }

    let mut table = builder.build();
    table
        .with(Style::empty())
        .with(Modify::new(Segment::all()).with(Padding::new(0, COLUMN_GAP, 0, 0)));

    let rendered = table.to_string();
    Ok(rendered
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Render a [`Table`] model.
pub fn format_table(table: &Table, opts: &RenderOptions) -> Result<String, RenderError> {
    render_table(table.headers(), table.rows(), opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DisplayValue;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_table_header_only() {
        let result = render_table(&headers(&["ID", "NAME"]), &[], &RenderOptions::default()).unwrap();

        assert_eq!(result.lines().count(), 1);
        assert!(result.starts_with("ID"));
        assert!(result.contains("NAME"));
    }

    #[test]
    fn test_render_table_line_count_and_alignment() {
        let rows = vec![
            vec![DisplayValue::from("ws-1"), DisplayValue::from("prod")],
            vec![DisplayValue::from("ws-20000"), DisplayValue::from("staging")],
            vec![DisplayValue::from("ws-3"), DisplayValue::Null],
        ];

        let result = render_table(&headers(&["ID", "NAME"]), &rows, &RenderOptions::default()).unwrap();
        let lines: Vec<&str> = result.lines().collect();

        assert_eq!(lines.len(), 4);

        // Second column starts at the same offset on every line
        let offset = lines[0].find("NAME").unwrap();
        assert_eq!(lines[1].find("prod"), Some(offset));
        assert_eq!(lines[2].find("staging"), Some(offset));
        assert_eq!(lines[3].rfind('-'), Some(offset));
        assert!(offset >= "ws-20000".len() + COLUMN_GAP);

        // First column is left-aligned
        assert!(lines.iter().all(|line| !line.starts_with(' ')));
    }

    #[test]
    fn test_render_table_cell_formatting() {
        let rows = vec![vec![
            DisplayValue::Redacted,
            DisplayValue::Bool(true),
            DisplayValue::from(7u64),
            DisplayValue::List(vec![DisplayValue::from("a"), DisplayValue::from("b")]),
        ]];

        let result = render_table(
            &headers(&["TOKEN", "LOCKED", "RUNS", "TAGS"]),
            &rows,
            &RenderOptions::default(),
        )
        .unwrap();
        let row = result.lines().nth(1).unwrap();

        assert!(row.contains("(sensitive)"));
        assert!(row.contains("true"));
        assert!(row.contains('7'));
        assert!(row.contains("a, b"));
    }

    /// Terminal columns taken by `text`; CJK ideographs are double width.
    fn display_width(text: &str) -> usize {
        text.chars()
            .map(|c| if ('\u{4E00}'..='\u{9FFF}').contains(&c) { 2 } else { 1 })
            .sum()
    }

    fn column_of(line: &str, needle: &str) -> Option<usize> {
        line.find(needle).map(|byte| display_width(&line[..byte]))
    }

    #[test]
    fn test_render_table_aligns_wide_characters() {
        let rows = vec![
            vec![DisplayValue::from("✓"), DisplayValue::from("東京"), DisplayValue::from("a")],
            vec![DisplayValue::from("✗ failed"), DisplayValue::from("x"), DisplayValue::from("b")],
            vec![DisplayValue::from("ok"), DisplayValue::from("大阪市役所"), DisplayValue::from("c")],
        ];

        let result = render_table(
            &headers(&["STATUS", "CITY", "TAG"]),
            &rows,
            &RenderOptions::default(),
        )
        .unwrap();
        let lines: Vec<&str> = result.lines().collect();

        let city = column_of(lines[0], "CITY").unwrap();
        assert_eq!(column_of(lines[1], "東京"), Some(city));
        assert_eq!(column_of(lines[2], "x"), Some(city));
        assert_eq!(column_of(lines[3], "大阪市役所"), Some(city));

        let tag = column_of(lines[0], "TAG").unwrap();
        assert_eq!(column_of(lines[1], "a"), Some(tag));
        assert_eq!(column_of(lines[2], "b"), Some(tag));
        assert_eq!(column_of(lines[3], "c"), Some(tag));
        assert_eq!(tag, city + display_width("大阪市役所") + COLUMN_GAP);
    }

    #[test]
    fn test_render_table_tabs_do_not_break_alignment() {
        let rows = vec![vec![DisplayValue::from("a\tb"), DisplayValue::from("x")]];
        let result = render_table(&headers(&["NO\tTE", "V"]), &rows, &RenderOptions::default()).unwrap();

        assert!(!result.contains('\t'));
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines[0], "NO TE  V");
        assert_eq!(lines[1], "a b    x");
    }

    #[test]
    fn test_render_table_multiline_string_stays_on_one_line() {
        let rows = vec![vec![DisplayValue::from("line one\nline two")]];
        let result = render_table(&headers(&["NOTE"]), &rows, &RenderOptions::default()).unwrap();

        assert_eq!(result.lines().count(), 2);
        assert!(result.contains("line one line two"));
    }

    #[test]
    fn test_render_table_rejects_arity_mismatch() {
        let rows = vec![
            vec![DisplayValue::from("1"), DisplayValue::from("a")],
            vec![DisplayValue::from("2")],
        ];

        let err = render_table(&headers(&["ID", "NAME"]), &rows, &RenderOptions::default()).unwrap_err();
        assert_eq!(
            err,
            RenderError::RowArity {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_render_table_rejects_no_headers() {
        let err = render_table(&[], &[], &RenderOptions::default()).unwrap_err();
        assert_eq!(err, RenderError::EmptyHeaders);
    }

    #[test]
    fn test_format_table_model() {
        let mut table = Table::new(["ID"]).unwrap();
        table.push_row(vec![DisplayValue::from("ws-1")]).unwrap();

        let result = format_table(&table, &RenderOptions::default()).unwrap();
        assert_eq!(result, "ID\nws-1");
    }
}
