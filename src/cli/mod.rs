//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod config;
pub mod context;
pub mod input;
pub mod policy;
pub mod render;

pub use args::{FieldArgs, GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// tfcop - render Terraform Cloud API responses as tables, key-value listings or JSON
#[derive(Parser, Debug)]
#[command(name = "tfcop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, raw) [default: table]
    #[arg(
        long,
        global = true,
        env = "TFCOP_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "TFCOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "TFCOP_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Disable colored output (also honors NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a saved API response
    #[command(subcommand)]
    Render(RenderCommands),

    /// Inspect Sentinel policy check results
    #[command(subcommand)]
    Policy(PolicyCommands),

    /// Inspect tfcop configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   tfcop completion bash > /etc/bash_completion.d/tfcop
  zsh:    tfcop completion zsh > \"${fpath[1]}/_tfcop\"
  fish:   tfcop completion fish > ~/.config/fish/completions/tfcop.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Render subcommands
#[derive(Subcommand, Debug)]
pub enum RenderCommands {
    /// Render a list of objects (JSON array or {"data": [...]}) as a table
    List {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Render one object (or {"data": {...}}) as key-value lines
    Show {
        #[command(flatten)]
        fields: FieldArgs,
    },
}

/// Policy subcommands
#[derive(Subcommand, Debug)]
pub enum PolicyCommands {
    /// Show pass/fail diagnostics from a detailed policy check payload
    Show {
        /// Input file containing the payload (defaults to stdin)
        #[arg(long, short = 'i', value_name = "FILE")]
        input: Option<String>,

        /// One row per policy instead of full diagnostics
        #[arg(long)]
        summary: bool,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (token redacted)
    Show,
}
