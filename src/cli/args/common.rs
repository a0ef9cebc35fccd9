//! Common CLI types shared across commands

use serde::{Deserialize, Serialize};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format - aligned columns for lists, key-value lines for single objects (default)
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
    /// Raw format - echo the input document unchanged
    Raw,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Raw => "raw",
        };
        f.write_str(name)
    }
}
