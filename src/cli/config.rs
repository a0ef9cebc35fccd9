//! Configuration commands

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;
use crate::output;

/// Run the config show command
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let path = Config::resolve_path(opts.config_ref())?;

    let entity = ctx.config.to_entity(&path, ctx.format);
    output::print(&entity, ctx.format, &ctx.render)
}
