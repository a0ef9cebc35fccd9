//! tfcop - render Terraform Cloud API responses for humans and scripts

use clap::{CommandFactory, Parser};

mod cli;
mod config;
mod error;
mod models;
mod output;

use cli::{Cli, Commands, ConfigCommands, GlobalOptions, PolicyCommands, RenderCommands};
use error::Result;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `--debug` forces debug logs; otherwise RUST_LOG applies, defaulting to warn.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Render(render_cmd) => match render_cmd {
            RenderCommands::List { fields } => cli::render::list(&opts, &fields),
            RenderCommands::Show { fields } => cli::render::show(&opts, &fields),
        },
        Commands::Policy(policy_cmd) => match policy_cmd {
            PolicyCommands::Show { input, summary } => {
                cli::policy::show(&opts, input.as_deref(), summary)
            }
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => cli::config::show(&opts),
        },
        Commands::Version => {
            println!("tfcop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "tfcop", &mut std::io::stdout());
            Ok(())
        }
    }
}
