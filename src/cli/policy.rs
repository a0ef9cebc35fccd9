//! Policy check commands

use log::debug;
use serde_json::Value;

use crate::cli::args::GlobalOptions;
use crate::cli::input::read_input;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::interpret_policy_trace;
use crate::output::{self, report::NO_POLICY_RESULTS};

/// Run the policy show command
///
/// Interprets a detailed Sentinel policy check payload. Payloads that cannot
/// be interpreted at all are printed unchanged.
pub fn show(opts: &GlobalOptions, input: Option<&str>, summary: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let text = read_input(input)?;

    if ctx.format == OutputFormat::Raw {
        output::print_raw(&text);
        return Ok(());
    }

    let raw: Value = match serde_json::from_str(&text) {
        Ok(raw) => raw,
        Err(err) => {
            debug!("Policy payload is not valid JSON: {}", err);
            output::print_raw(&text);
            return Ok(());
        }
    };

    let report = interpret_policy_trace(&raw);
    if !report.is_interpretable() {
        output::print_raw(&text);
        return Ok(());
    }
    debug!("Interpreted {} policy results", report.diagnostics().count());

    if summary {
        let table = report.summary_table()?;
        if table.is_empty() && ctx.format == OutputFormat::Table {
            println!("{}", NO_POLICY_RESULTS);
            return Ok(());
        }
        return output::print(&table, ctx.format, &ctx.render);
    }

    output::print(&report, ctx.format, &ctx.render)
}
