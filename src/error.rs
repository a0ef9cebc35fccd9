//! Error types for the tfcop CLI

use thiserror::Error;

/// Result type alias for tfcop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rendering contract violations.
///
/// These are programming errors in the code that builds the display model,
/// never a consequence of what the upstream API returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Row {row} has {actual} cells but the table has {expected} columns")]
    RowArity {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("A table needs at least one column")]
    EmptyHeaders,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
