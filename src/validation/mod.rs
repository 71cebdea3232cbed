use crate::catalog::{CapabilityCatalog, CatalogError, FieldSpec, Role, ValueKind};
use serde::Serialize;

pub mod config;
pub mod options;
pub mod placeholders;
pub mod rules;

pub use config::{parse_config_pairs, Config, ConfigValue};
pub use options::{OptionEntry, ResolvedOptions};
pub use placeholders::{preview, scan_placeholders, PlaceholderPreview, PlaceholderToken};
pub use rules::{policy_for, KindPolicy, SpecialRule, ValidationMode, SPECIAL_RULES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Complete,
    /// Field keys in declaration order.
    Incomplete { missing: Vec<String> },
}

impl ValidationOutcome {
    fn from_missing(missing: Vec<String>) -> Self {
        if missing.is_empty() {
            Self::Complete
        } else {
            Self::Incomplete { missing }
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Complete)
    }

    pub fn missing(&self) -> &[String] {
        match self {
            Self::Complete => &[],
            Self::Incomplete { missing } => missing,
        }
    }
}

#[derive(Serialize)]
struct OutcomeWire<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<&'a [String]>,
}

impl Serialize for ValidationOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let wire = match self {
            Self::Complete => OutcomeWire {
                ok: true,
                missing: None,
            },
            Self::Incomplete { missing } => OutcomeWire {
                ok: false,
                missing: Some(missing),
            },
        };
        wire.serialize(serializer)
    }
}

fn is_email(raw: &str) -> bool {
    let raw = raw.trim();
    match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !raw.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// A required field is satisfied by a non-blank value of the right kind.
///
/// Values carrying a `{{...}}` placeholder are resolved at trigger time and
/// pass the kind and membership checks.
fn field_satisfied(spec: &FieldSpec, config: &Config, options: &ResolvedOptions) -> bool {
    let Some(value) = config.get(spec.key) else {
        return false;
    };
    if value.is_blank() {
        return false;
    }
    if value
        .as_text()
        .is_some_and(placeholders::contains_placeholder)
    {
        return true;
    }
    let kind_ok = match spec.kind {
        ValueKind::Numeric => value.is_numeric(),
        ValueKind::Boolean => value.is_boolean(),
        ValueKind::Email => value.as_text().is_some_and(is_email),
        ValueKind::ShortText | ValueKind::LongText | ValueKind::Choice => true,
    };
    kind_ok && (spec.source.is_none() || options.admits(spec.key, value.to_string().trim()))
}

/// Checks `config` against the required flags of `field_specs`.
pub fn validate(config: &Config, field_specs: &[FieldSpec]) -> ValidationOutcome {
    validate_with_options(config, field_specs, &ResolvedOptions::default())
}

pub fn validate_with_options(
    config: &Config,
    field_specs: &[FieldSpec],
    options: &ResolvedOptions,
) -> ValidationOutcome {
    let missing = field_specs
        .iter()
        .filter(|spec| spec.required && !field_satisfied(spec, config, options))
        .map(|spec| spec.key.to_string())
        .collect();
    ValidationOutcome::from_missing(missing)
}

fn validate_required_keys(
    config: &Config,
    required: &[&'static str],
    field_specs: &[FieldSpec],
    options: &ResolvedOptions,
) -> ValidationOutcome {
    let missing = required
        .iter()
        .filter(|key| {
            let spec = field_specs
                .iter()
                .find(|spec| spec.key == **key)
                .copied()
                .unwrap_or_else(|| FieldSpec::new(**key, **key, ValueKind::ShortText));
            !field_satisfied(&spec, config, options)
        })
        .map(|key| key.to_string())
        .collect();
    ValidationOutcome::from_missing(missing)
}

/// Per-`(service, kind, role)` validation through the rule dispatch table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    mode: ValidationMode,
}

impl Validator {
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Fails only when the catalog does not know `(service, kind, role)`.
    pub fn validate_kind(
        &self,
        catalog: &CapabilityCatalog,
        service: &str,
        kind: &str,
        role: Role,
        config: &Config,
        options: &ResolvedOptions,
    ) -> Result<ValidationOutcome, CatalogError> {
        let field_specs = catalog.field_specs_for(service, kind, role)?;
        Ok(
            match rules::policy_for(service, kind, role, self.mode) {
                KindPolicy::RequireKeys(required) => {
                    validate_required_keys(config, required, field_specs, options)
                }
                KindPolicy::FieldSpecs => validate_with_options(config, field_specs, options),
                KindPolicy::Permissive => ValidationOutcome::Complete,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DynamicSource;

    const SPECS: &[FieldSpec] = &[
        FieldSpec::new("to", "Recipient", ValueKind::Email),
        FieldSpec::new("note", "Note", ValueKind::LongText).optional(),
        FieldSpec::new("count", "Count", ValueKind::Numeric),
        FieldSpec::new("repo", "Repository", ValueKind::ShortText)
            .from_source(DynamicSource::GithubRepositories),
    ];

    #[test]
    fn empty_config_reports_every_required_key_in_order() {
        let outcome = validate(&Config::new(), SPECS);
        assert_eq!(outcome.missing(), ["to", "count", "repo"]);
        assert!(!outcome.is_ok());
    }

    #[test]
    fn wrong_kinds_count_as_missing() {
        let config = Config::from_pairs([("to", "not-an-email"), ("count", "many"), ("repo", "x")]);
        assert_eq!(validate(&config, SPECS).missing(), ["to", "count"]);
    }

    #[test]
    fn placeholders_satisfy_typed_fields() {
        let config = Config::from_pairs([
            ("to", "{{email.from}}"),
            ("count", "{{issue.number}}"),
            ("repo", "app"),
        ]);
        assert!(validate(&config, SPECS).is_ok());
    }

    #[test]
    fn resolved_options_restrict_enumerated_values() {
        let config = Config::from_pairs([("to", "a@b.io"), ("count", "3"), ("repo", "ghost")]);
        let options = ResolvedOptions::new().with("repo", vec![OptionEntry::new("1", "app")]);
        assert_eq!(
            validate_with_options(&config, SPECS, &options).missing(),
            ["repo"]
        );
        assert!(validate(&config, SPECS).is_ok());
    }

    #[test]
    fn outcome_serializes_to_ok_missing_shape() {
        let complete = serde_json::to_value(ValidationOutcome::Complete).expect("encode");
        assert_eq!(complete, serde_json::json!({"ok": true}));
        let incomplete = serde_json::to_value(ValidationOutcome::Incomplete {
            missing: vec!["title".to_string()],
        })
        .expect("encode");
        assert_eq!(incomplete, serde_json::json!({"ok": false, "missing": ["title"]}));
    }

    #[test]
    fn email_shape_check() {
        assert!(is_email("dev@acme.io"));
        assert!(!is_email("@acme.io"));
        assert!(!is_email("dev@"));
        assert!(!is_email("dev @acme.io"));
        assert!(!is_email("a@b@c"));
    }
}
