//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading and output option resolution.

use std::io::IsTerminal;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;
use crate::output::RenderOptions;

/// Context for command execution containing config and resolved output options.
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Output format after applying flag > env > config > default precedence
    pub format: OutputFormat,
    /// Formatting settings for the text renderers
    pub render: RenderOptions,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// This handles:
    /// - Loading config from path (or default location)
    /// - Resolving the output format
    /// - Deciding whether text output is colored
    ///
    /// # Errors
    /// Returns error if an explicitly given config cannot be loaded or is invalid.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let color = !opts.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();
        colored::control::set_override(color);
        Ok(Self::from_parts(config, opts, color))
    }

    /// Build a context from an already loaded config.
    pub fn from_parts(config: Config, opts: &GlobalOptions, color: bool) -> Self {
        let format = opts
            .format
            .or(config.preferences.format)
            .unwrap_or_default();
        let render = config.render_options(color);
        Self {
            config,
            format,
            render,
        }
    }
}
