//! Field selection arguments shared by the render commands

use clap::Args;

use crate::models::FieldSpec;

/// Which fields to show and which to redact
#[derive(Debug, Clone, Args, Default)]
pub struct FieldArgs {
    /// Field to show, as LABEL=PATH[:sensitive|:timestamp|:optional] (repeatable)
    ///
    /// PATH is a dotted path into each object, e.g. `attributes.name`.
    /// Without any --field, every top-level key is shown.
    #[arg(long = "field", short = 'f', value_name = "LABEL=PATH")]
    pub fields: Vec<FieldSpec>,

    /// Key to redact wherever it appears (repeatable)
    #[arg(long = "redact", value_name = "KEY")]
    pub redact: Vec<String>,

    /// Input file containing the API response (defaults to stdin)
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<String>,
}

impl FieldArgs {
    /// Explicit fields with redaction applied, or fields inferred from `sample`.
    pub fn resolve(&self, sample: Option<&serde_json::Value>) -> Vec<FieldSpec> {
        if self.fields.is_empty() {
            return sample
                .map(|sample| FieldSpec::infer(sample, &self.redact))
                .unwrap_or_default();
        }

        self.fields
            .iter()
            .cloned()
            .map(|field| {
                // A redacted key anywhere along the path covers everything below it
                let through_redacted = field
                    .path
                    .split('.')
                    .any(|segment| self.redact.iter().any(|key| key == segment));
                let field = if through_redacted {
                    field.sensitive()
                } else {
                    field
                };
                self.redact
                    .iter()
                    .fold(field, |field, key| field.redact_key(key.clone()))
            })
            .collect()
    }
}
