//! Output formatting for CLI results
//!
//! The output format is chosen once per command; [`Formattable`] maps it onto
//! the matching renderer for each display model.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::models::{Entity, PolicyReport, Table};

pub mod formatters;
pub mod json;
pub mod keyvalue;
pub mod report;
pub mod table;

pub use formatters::RenderOptions;

/// Shown instead of an empty table
pub const NO_RESULTS: &str = "No results found.";

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format.
    ///
    /// `Raw` only has its own meaning for commands that echo their input;
    /// everywhere else it renders like `Json`.
    fn format(&self, format: OutputFormat, opts: &RenderOptions) -> Result<String>;
}

impl Formattable for Table {
    fn format(&self, format: OutputFormat, opts: &RenderOptions) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self, opts)?),
            OutputFormat::Json | OutputFormat::Raw => Ok(json::format_json_table(self)?),
        }
    }
}

impl Formattable for Entity {
    fn format(&self, format: OutputFormat, opts: &RenderOptions) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(keyvalue::render_key_value(self, opts)),
            OutputFormat::Json | OutputFormat::Raw => Ok(json::format_json_entity(self)?),
        }
    }
}

impl Formattable for PolicyReport {
    fn format(&self, format: OutputFormat, opts: &RenderOptions) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(report::render_policy_report(self, opts)),
            OutputFormat::Json | OutputFormat::Raw => {
                let records: Vec<serde_json::Value> = self
                    .diagnostics()
                    .map(|(set_name, policy)| json::entity_to_json(&policy.to_entity(set_name)))
                    .collect();
                Ok(serde_json::to_string(&records)?)
            }
        }
    }
}

/// Format and print data to stdout
pub fn print<T: Formattable + ?Sized>(
    data: &T,
    format: OutputFormat,
    opts: &RenderOptions,
) -> Result<()> {
    let output = data.format(format, opts)?;
    println!("{}", output);
    Ok(())
}

/// Print an input document unchanged, ending with a newline
pub fn print_raw(text: &str) {
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}
