//! Text rendering of policy check reports

use colored::Colorize;

use super::formatters::RenderOptions;
use crate::models::policy::{PolicyDiagnostic, PolicyOutcome, PolicyReport};

/// Shown when a payload carried no policy results at all.
pub const NO_POLICY_RESULTS: &str = "No policy check details found.";

/// Render a report grouped by policy set.
///
/// ```text
/// Policy set: cost-controls
///   ✗ enforce-tags (hard-mandatory) 42ms
///       checking tags
///     Failed rules:
///       - has-env-tag: env tag required
/// ```
pub fn render_policy_report(report: &PolicyReport, opts: &RenderOptions) -> String {
    if report.is_empty() {
        return NO_POLICY_RESULTS.to_string();
    }

    let mut lines = Vec::new();
    for set in report.sets.iter().filter(|set| !set.policies.is_empty()) {
        let header = if set.name.is_empty() {
            "Policy set".to_string()
        } else {
            format!("Policy set: {}", set.name)
        };
        lines.push(if opts.color {
            header.bold().to_string()
        } else {
            header
        });

        for policy in &set.policies {
            push_policy(&mut lines, policy, opts);
        }
    }

    lines.join("\n")
}

fn push_policy(lines: &mut Vec<String>, policy: &PolicyDiagnostic, opts: &RenderOptions) {
    let mut parts = vec![symbol(policy.outcome, opts)];
    if let Some(name) = &policy.name {
        parts.push(name.clone());
    }
    if let Some(level) = &policy.enforcement_level {
        parts.push(format!("({})", level));
    }
    if let Some(duration) = &policy.duration {
        parts.push(duration.clone());
    }
    lines.push(format!("  {}", parts.join(" ")));

    for print_line in &policy.print_lines {
        lines.push(format!("      {}", print_line).trim_end().to_string());
    }
    if let Some(error) = &policy.error {
        lines.push(format!("    Error: {}", error));
    }
    if let Some(error) = &policy.trace_error {
        lines.push(format!("    Trace error: {}", error));
    }
    if !policy.failed_rules.is_empty() {
        lines.push("    Failed rules:".to_string());
        for rule in &policy.failed_rules {
            match &rule.description {
                Some(desc) => lines.push(format!("      - {}: {}", rule.name, desc)),
                None => lines.push(format!("      - {}", rule.name)),
            }
        }
    }
}

fn symbol(outcome: PolicyOutcome, opts: &RenderOptions) -> String {
    let symbol = outcome.symbol();
    if !opts.color {
        return symbol.to_string();
    }
    match outcome {
        PolicyOutcome::Passed => symbol.green().to_string(),
        PolicyOutcome::Failed => symbol.red().to_string(),
        PolicyOutcome::Unknown => symbol.dimmed().to_string(),
    }
}
