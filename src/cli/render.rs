//! Generic render commands
//!
//! Stand-ins for per-resource list and show commands: they take an API
//! response that was already fetched and decoded, select fields and print
//! them through the shared renderers.

use log::debug;

use crate::cli::args::{FieldArgs, GlobalOptions};
use crate::cli::input::{parse_json, read_input, unwrap_collection, unwrap_object};
use crate::cli::{CommandContext, OutputFormat};
use crate::error::{Error, Result};
use crate::models::{Entity, Table};
use crate::output::{self, NO_RESULTS};

/// Run the render list command
pub fn list(opts: &GlobalOptions, args: &FieldArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let text = read_input(args.input.as_deref())?;

    if ctx.format == OutputFormat::Raw {
        output::print_raw(&text);
        return Ok(());
    }

    let items = unwrap_collection(parse_json(&text)?)?;
    debug!("Rendering {} items", items.len());

    if items.is_empty() && args.fields.is_empty() {
        // Nothing to infer columns from
        match ctx.format {
            OutputFormat::Table => println!("{}", NO_RESULTS),
            OutputFormat::Json | OutputFormat::Raw => println!("[]"),
        }
        return Ok(());
    }

    let fields = args.resolve(items.first());
    if fields.is_empty() {
        return Err(Error::Input(
            "no fields to show: pass --field or provide objects".to_string(),
        ));
    }

    let table = Table::from_objects(&items, &fields)?;
    if table.is_empty() && ctx.format == OutputFormat::Table {
        println!("{}", NO_RESULTS);
        return Ok(());
    }

    output::print(&table, ctx.format, &ctx.render)
}

/// Run the render show command
pub fn show(opts: &GlobalOptions, args: &FieldArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let text = read_input(args.input.as_deref())?;

    if ctx.format == OutputFormat::Raw {
        output::print_raw(&text);
        return Ok(());
    }

    let object = unwrap_object(parse_json(&text)?)?;
    let fields = args.resolve(Some(&object));
    debug!("Rendering object with {} fields", fields.len());

    let entity = Entity::from_object(&object, &fields);
    if entity.is_empty() && ctx.format == OutputFormat::Table {
        println!("{}", NO_RESULTS);
        return Ok(());
    }
    output::print(&entity, ctx.format, &ctx.render)
}
