//! Sentinel policy check interpretation
//!
//! The detailed policy check payload is produced by the policy engine, not by
//! this program, so its shape is only loosely known:
//!
//! ```text
//! { "data": { "<set name>": { "policies": [ { "name", "enforcement-level",
//!     "result", "duration", "error", "trace": { "print", "error",
//!     "rules": { "<rule>": { "value", "desc" } } } } ] } } }
//! ```
//!
//! Every level is optional. A missing or mistyped branch suppresses only its
//! own part of the report; the walk never fails.

use log::debug;
use serde_json::{Map, Value};

use super::entity::{Entity, Table};
use super::lookup::{self, Lookup};
use super::value::DisplayValue;
use crate::error::RenderError;
use crate::output::formatters::format_duration_ms;

/// Pass/fail state of one policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyOutcome {
    Passed,
    Failed,
    /// The payload carried no usable `result`
    Unknown,
}

impl PolicyOutcome {
    pub fn symbol(&self) -> &'static str {
        match self {
            PolicyOutcome::Passed => "✓",
            PolicyOutcome::Failed => "✗",
            PolicyOutcome::Unknown => "○",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PolicyOutcome::Passed => "passed",
            PolicyOutcome::Failed => "failed",
            PolicyOutcome::Unknown => "unknown",
        }
    }
}

/// A rule whose evaluation returned `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRule {
    pub name: String,
    pub description: Option<String>,
}

/// Everything worth reporting about one policy.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDiagnostic {
    pub name: Option<String>,
    pub enforcement_level: Option<String>,
    /// Already formatted, e.g. `42ms`
    pub duration: Option<String>,
    pub outcome: PolicyOutcome,
    pub error: Option<String>,
    /// Lines of `trace.print`, failed policies only
    pub print_lines: Vec<String>,
    pub trace_error: Option<String>,
    pub failed_rules: Vec<FailedRule>,
}

impl PolicyDiagnostic {
    /// Key-value view. Fields the payload did not carry are omitted.
    pub fn to_entity(&self, policy_set: &str) -> Entity {
        let mut entity = Entity::new();
        if !policy_set.is_empty() {
            entity.insert("Policy Set", policy_set);
        }
        if let Some(name) = &self.name {
            entity.insert("Policy", name.as_str());
        }
        entity.insert("Result", self.outcome.label());
        if let Some(level) = &self.enforcement_level {
            entity.insert("Enforcement", level.as_str());
        }
        if let Some(duration) = &self.duration {
            entity.insert("Duration", duration.as_str());
        }
        if let Some(error) = &self.error {
            entity.insert("Error", error.as_str());
        }
        if !self.print_lines.is_empty() {
            let lines = self
                .print_lines
                .iter()
                .map(|line| DisplayValue::from(line.as_str()))
                .collect();
            entity.insert("Print", DisplayValue::List(lines));
        }
        if let Some(error) = &self.trace_error {
            entity.insert("Trace Error", error.as_str());
        }
        if !self.failed_rules.is_empty() {
            let rules = self
                .failed_rules
                .iter()
                .map(|rule| (rule.name.clone(), DisplayValue::from(rule.description.clone())))
                .collect();
            entity.insert("Failed Rules", DisplayValue::Nested(rules));
        }
        entity
    }
}

/// Diagnostics of one policy set. The default set has an empty name.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicySetDiagnostics {
    pub name: String,
    pub policies: Vec<PolicyDiagnostic>,
}

/// Result of interpreting a policy check payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyReport {
    interpretable: bool,
    pub sets: Vec<PolicySetDiagnostics>,
}

impl PolicyReport {
    /// False when the payload was not a JSON object at all; callers should
    /// show the raw payload instead.
    pub fn is_interpretable(&self) -> bool {
        self.interpretable
    }

    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(|set| set.policies.is_empty())
    }

    /// All diagnostics in payload order, paired with their set name.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&str, &PolicyDiagnostic)> {
        self.sets.iter().flat_map(|set| {
            set.policies
                .iter()
                .map(move |policy| (set.name.as_str(), policy))
        })
    }

    /// One row per policy: STATUS, SET, POLICY, ENFORCEMENT, DURATION.
    pub fn summary_table(&self) -> Result<Table, RenderError> {
        let mut table = Table::new(["STATUS", "SET", "POLICY", "ENFORCEMENT", "DURATION"])?;
        for (set_name, policy) in self.diagnostics() {
            let set = if set_name.is_empty() {
                DisplayValue::Null
            } else {
                DisplayValue::from(set_name)
            };
            table.push_row(vec![
                DisplayValue::from(policy.outcome.label()),
                set,
                DisplayValue::from(policy.name.clone()),
                DisplayValue::from(policy.enforcement_level.clone()),
                DisplayValue::from(policy.duration.clone()),
            ])?;
        }
        Ok(table)
    }
}

/// Walk a policy check payload into a [`PolicyReport`].
pub fn interpret_policy_trace(raw: &Value) -> PolicyReport {
    let root = match lookup::as_object(raw) {
        Lookup::Found(root) => root,
        other => {
            debug!("Policy payload is not an object: {:?}", other);
            return PolicyReport::default();
        }
    };

    let mut report = PolicyReport {
        interpretable: true,
        sets: Vec::new(),
    };

    let Some(data) = lookup::get_object(root, "data").found_or_log("policy payload data") else {
        debug!("Policy payload has no data mapping");
        return report;
    };

    for (set_name, set_value) in data {
        let Some(set) = lookup::as_object(set_value).found_or_log("policy set") else {
            continue;
        };
        let Some(policies) = lookup::get_array(set, "policies").found_or_log("policy list") else {
            debug!("Skipping policy set '{}' without a policy list", set_name);
            continue;
        };

        let policies = policies
            .iter()
            .filter_map(|entry| lookup::as_object(entry).found_or_log("policy entry"))
            .map(interpret_policy)
            .collect();

        report.sets.push(PolicySetDiagnostics {
            name: set_name.clone(),
            policies,
        });
    }

    report
}

fn interpret_policy(policy: &Map<String, Value>) -> PolicyDiagnostic {
    let name = lookup::get_str(policy, "name")
        .or_else(|| lookup::get_str(policy, "policy"))
        .found_or_log("policy name")
        .map(str::to_string);

    let outcome = match lookup::get_bool(policy, "result") {
        Lookup::Found(true) => PolicyOutcome::Passed,
        Lookup::Found(false) => PolicyOutcome::Failed,
        other => {
            debug!("Policy {:?} has no boolean result: {:?}", name, other);
            PolicyOutcome::Unknown
        }
    };

    let mut diagnostic = PolicyDiagnostic {
        enforcement_level: lookup::get_str(policy, "enforcement-level")
            .found_or_log("enforcement level")
            .map(str::to_string),
        duration: lookup::get(policy, "duration").found().and_then(duration_label),
        error: lookup::get_str(policy, "error")
            .found_or_log("policy error")
            .map(str::to_string),
        name,
        outcome,
        print_lines: Vec::new(),
        trace_error: None,
        failed_rules: Vec::new(),
    };

    if outcome == PolicyOutcome::Failed {
        if let Some(trace) = lookup::get_object(policy, "trace").found_or_log("policy trace") {
            apply_trace(&mut diagnostic, trace);
        }
    }

    diagnostic
}

fn apply_trace(diagnostic: &mut PolicyDiagnostic, trace: &Map<String, Value>) {
    if let Some(print) = lookup::get_str(trace, "print").found_or_log("trace print") {
        diagnostic.print_lines = print.lines().map(str::to_string).collect();
    }

    diagnostic.trace_error = lookup::get_str(trace, "error")
        .found_or_log("trace error")
        .map(str::to_string);

    if let Some(rules) = lookup::get_object(trace, "rules").found_or_log("trace rules") {
        let mut failed: Vec<FailedRule> = rules
            .iter()
            .filter_map(|(rule_name, rule)| {
                let rule = lookup::as_object(rule).found_or_log("rule result")?;
                if lookup::get_bool(rule, "value") != Lookup::Found(false) {
                    return None;
                }
                let description = lookup::get_str(rule, "desc")
                    .found_or_log("rule description")
                    .filter(|desc| !desc.is_empty())
                    .map(str::to_string);
                Some(FailedRule {
                    name: rule_name.clone(),
                    description,
                })
            })
            .collect();
        failed.sort_by(|a, b| a.name.cmp(&b.name));
        diagnostic.failed_rules = failed;
    }
}

/// `42` or `"42"` become `42ms`; negative or non-numeric values are dropped.
fn duration_label(value: &Value) -> Option<String> {
    let millis = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => {
            debug!("Ignoring policy duration of type {}", lookup::kind_name(other));
            None
        }
    }?;
    if !millis.is_finite() || millis < 0.0 {
        return None;
    }
    Some(format_duration_ms(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn enforce_tags_payload() -> Value {
        json!({
            "data": {
                "": {
                    "policies": [{
                        "name": "enforce-tags",
                        "enforcement-level": "hard-mandatory",
                        "result": false,
                        "duration": 42,
                        "trace": {
                            "print": "checking tags\nmissing tag: env",
                            "rules": {
                                "has-env-tag": { "value": false, "desc": "env tag required" }
                            }
                        }
                    }]
                }
            }
        })
    }

    #[test]
    fn test_empty_payload_yields_no_records() {
        let report = interpret_policy_trace(&json!({}));
        assert!(report.is_empty());
        assert!(report.is_interpretable());
        assert_eq!(report.diagnostics().count(), 0);
    }

    #[test]
    fn test_non_object_payload_is_not_interpretable() {
        for raw in [json!([1, 2]), json!("text"), json!(null), json!(3)] {
            let report = interpret_policy_trace(&raw);
            assert!(!report.is_interpretable());
            assert!(report.is_empty());
        }
    }

    #[test]
    fn test_unusable_data_yields_no_records() {
        for raw in [json!({"data": []}), json!({"data": null}), json!({"other": 1})] {
            let report = interpret_policy_trace(&raw);
            assert!(report.is_interpretable());
            assert!(report.is_empty());
        }
    }

    #[test]
    fn test_enforce_tags_scenario() {
        let report = interpret_policy_trace(&enforce_tags_payload());

        let records: Vec<_> = report.diagnostics().collect();
        assert_eq!(records.len(), 1);

        let (set_name, policy) = records[0];
        assert_eq!(set_name, "");
        assert_eq!(policy.outcome, PolicyOutcome::Failed);
        assert_eq!(policy.name.as_deref(), Some("enforce-tags"));
        assert_eq!(policy.enforcement_level.as_deref(), Some("hard-mandatory"));
        assert_eq!(policy.duration.as_deref(), Some("42ms"));
        assert_eq!(policy.print_lines, vec!["checking tags", "missing tag: env"]);
        assert_eq!(
            policy.failed_rules,
            vec![FailedRule {
                name: "has-env-tag".to_string(),
                description: Some("env tag required".to_string()),
            }]
        );
    }

    #[test]
    fn test_only_false_rules_are_reported() {
        let raw = json!({"data": {"s": {"policies": [{
            "name": "p",
            "result": false,
            "trace": { "rules": {
                "r1": { "value": true },
                "r2": { "value": false, "desc": "bad" },
                "r3": { "desc": "no value" },
                "r4": "not an object"
            }}
        }]}}});

        let report = interpret_policy_trace(&raw);
        let (_, policy) = report.diagnostics().next().unwrap();

        assert_eq!(
            policy.failed_rules,
            vec![FailedRule {
                name: "r2".to_string(),
                description: Some("bad".to_string()),
            }]
        );
    }

    #[test]
    fn test_failed_rules_sorted_and_empty_desc_dropped() {
        let raw = json!({"data": {"s": {"policies": [{
            "result": false,
            "trace": { "rules": {
                "zeta": { "value": false, "desc": "" },
                "alpha": { "value": false }
            }}
        }]}}});

        let report = interpret_policy_trace(&raw);
        let (_, policy) = report.diagnostics().next().unwrap();

        let names: Vec<&str> = policy.failed_rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(policy.failed_rules.iter().all(|r| r.description.is_none()));
    }

    #[test]
    fn test_missing_result_is_unknown_not_passed() {
        let raw = json!({"data": {"": {"policies": [
            { "name": "a" },
            { "name": "b", "result": "false" },
            { "name": "c", "result": true }
        ]}}});

        let report = interpret_policy_trace(&raw);
        let outcomes: Vec<PolicyOutcome> = report.diagnostics().map(|(_, p)| p.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                PolicyOutcome::Unknown,
                PolicyOutcome::Unknown,
                PolicyOutcome::Passed
            ]
        );
    }

    #[test]
    fn test_trace_ignored_unless_failed() {
        let raw = json!({"data": {"": {"policies": [{
            "name": "ok",
            "result": true,
            "trace": { "print": "noise", "rules": { "r": { "value": false } } }
        }]}}});

        let report = interpret_policy_trace(&raw);
        let (_, policy) = report.diagnostics().next().unwrap();
        assert!(policy.print_lines.is_empty());
        assert!(policy.failed_rules.is_empty());
    }

    #[test]
    fn test_missing_fields_are_omitted() {
        let raw = json!({"data": {"": {"policies": [{ "result": false }]}}});

        let report = interpret_policy_trace(&raw);
        let (_, policy) = report.diagnostics().next().unwrap();

        assert_eq!(policy.name, None);
        assert_eq!(policy.enforcement_level, None);
        assert_eq!(policy.duration, None);
        assert_eq!(policy.outcome, PolicyOutcome::Failed);
    }

    #[test]
    fn test_mistyped_branches_do_not_abort_walk() {
        let raw = json!({"data": {
            "broken": "not a set",
            "no-list": { "policies": {"x": 1} },
            "mixed": { "policies": [
                7,
                { "name": 5, "enforcement-level": ["x"], "duration": "soon", "result": false,
                  "trace": { "print": 3, "error": "engine error", "rules": [] } },
                { "name": "kept", "result": true, "duration": "12" }
            ]}
        }});

        let report = interpret_policy_trace(&raw);

        assert_eq!(report.sets.len(), 1);
        assert_eq!(report.sets[0].name, "mixed");
        let policies = &report.sets[0].policies;
        assert_eq!(policies.len(), 2);

        assert_eq!(policies[0].name, None);
        assert_eq!(policies[0].enforcement_level, None);
        assert_eq!(policies[0].duration, None);
        assert!(policies[0].print_lines.is_empty());
        assert_eq!(policies[0].trace_error.as_deref(), Some("engine error"));

        assert_eq!(policies[1].name.as_deref(), Some("kept"));
        assert_eq!(policies[1].duration.as_deref(), Some("12ms"));
    }

    #[test]
    fn test_policy_key_used_when_name_missing() {
        let raw = json!({"data": {"": {"policies": [
            { "policy": "sample/limit-cost", "result": true, "error": null }
        ]}}});

        let report = interpret_policy_trace(&raw);
        let (_, policy) = report.diagnostics().next().unwrap();
        assert_eq!(policy.name.as_deref(), Some("sample/limit-cost"));
        assert_eq!(policy.error, None);
    }

    #[test]
    fn test_sets_keep_payload_order() {
        let raw = json!({"data": {
            "zeta": { "policies": [{ "name": "z", "result": true }] },
            "alpha": { "policies": [{ "name": "a", "result": true }] }
        }});

        let report = interpret_policy_trace(&raw);
        let names: Vec<&str> = report.sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_duration_label() {
        assert_eq!(duration_label(&json!(42)), Some("42ms".to_string()));
        assert_eq!(duration_label(&json!(1.5)), Some("1.5ms".to_string()));
        assert_eq!(duration_label(&json!("7")), Some("7ms".to_string()));
        assert_eq!(duration_label(&json!(-1)), None);
        assert_eq!(duration_label(&json!(true)), None);
    }

    #[test]
    fn test_to_entity_omits_absent_fields() {
        let report = interpret_policy_trace(&enforce_tags_payload());
        let (set_name, policy) = report.diagnostics().next().unwrap();

        let entity = policy.to_entity(set_name);
        let keys: Vec<&str> = entity.keys().collect();
        assert_eq!(
            keys,
            vec!["Policy", "Result", "Enforcement", "Duration", "Print", "Failed Rules"]
        );
    }

    #[test]
    fn test_summary_table() {
        let report = interpret_policy_trace(&enforce_tags_payload());
        let table = report.summary_table().unwrap();

        assert_eq!(table.headers().len(), 5);
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.rows()[0][0], DisplayValue::from("failed"));
        assert_eq!(table.rows()[0][1], DisplayValue::Null);
        assert_eq!(table.rows()[0][4], DisplayValue::from("42ms"));
    }
}
