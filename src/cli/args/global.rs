//! Global CLI options

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// This struct consolidates all global flags from the CLI into a single unit,
/// making handler signatures cleaner and more maintainable. When new global
/// options are added, only this struct and `main.rs` need to change.
///
/// # Precedence
///
/// For most options, the precedence is: CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; config file defaults are resolved later in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format override (table, json, raw)
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.tfcop/config.yaml)
    pub config: Option<String>,

    /// Disable ANSI colors even on a terminal
    pub no_color: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    ///
    /// This is the primary constructor, called once in main.rs after parsing.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            no_color: cli.no_color,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}
