use crate::catalog::builtin::service_names::{DISCORD, GITHUB};
use crate::catalog::Role;
use serde::{Deserialize, Serialize};

/// How kinds without a special-cased rule are validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Kinds without a special rule always validate as complete.
    #[default]
    Permissive,
    /// Kinds without a special rule are checked against their field specs.
    Strict,
}

impl ValidationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::Strict => "strict",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialRule {
    pub service: &'static str,
    pub kind: &'static str,
    pub role: Role,
    pub required: &'static [&'static str],
}

pub const SPECIAL_RULES: &[SpecialRule] = &[
    SpecialRule {
        service: GITHUB,
        kind: "create_issue",
        role: Role::Reaction,
        required: &["owner", "repo", "title"],
    },
    SpecialRule {
        service: DISCORD,
        kind: "send_message_to_channel",
        role: Role::Reaction,
        required: &["channelId", "content"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindPolicy {
    /// Exactly these keys must be present, in this order.
    RequireKeys(&'static [&'static str]),
    /// Every required field spec must be satisfied.
    FieldSpecs,
    Permissive,
}

pub fn special_rule(service: &str, kind: &str, role: Role) -> Option<&'static SpecialRule> {
    SPECIAL_RULES
        .iter()
        .find(|rule| rule.service == service && rule.kind == kind && rule.role == role)
}

pub fn policy_for(service: &str, kind: &str, role: Role, mode: ValidationMode) -> KindPolicy {
    if let Some(rule) = special_rule(service, kind, role) {
        return KindPolicy::RequireKeys(rule.required);
    }
    match mode {
        ValidationMode::Permissive => KindPolicy::Permissive,
        ValidationMode::Strict => KindPolicy::FieldSpecs,
    }
}
