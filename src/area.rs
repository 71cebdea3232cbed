use crate::catalog::Role;
use crate::shared::ids::{AreaId, KindName, ServiceName, UserId};
use crate::validation::Config;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// One half of a rule: the triggering action or the performed reaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleHalf {
    pub service: ServiceName,
    #[serde(rename = "type")]
    pub kind: KindName,
    #[serde(default)]
    pub config: Config,
}

impl RuleHalf {
    pub fn new(service: ServiceName, kind: KindName, config: Config) -> Self {
        Self {
            service,
            kind,
            config,
        }
    }

    /// `service.kind` form used on the command line.
    pub fn parse_qualified(raw: &str) -> Result<(ServiceName, KindName), String> {
        let (service, kind) = raw
            .trim()
            .split_once('.')
            .ok_or_else(|| format!("`{raw}` must use service.kind"))?;
        Ok((ServiceName::parse(service)?, KindName::parse(kind)?))
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.service, self.kind)
    }
}

/// A stored automation rule binding an action to a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: AreaId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub action: RuleHalf,
    pub reaction: RuleHalf,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_triggered_at: Option<DateTime<Utc>>,
}

impl Area {
    pub fn half(&self, role: Role) -> &RuleHalf {
        match role {
            Role::Action => &self.action,
            Role::Reaction => &self.reaction,
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{} -> {}",
            self.id,
            if self.enabled { "enabled" } else { "disabled" },
            self.name,
            self.action.qualified_name(),
            self.reaction.qualified_name()
        )
    }
}

/// Creation payload assembled by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub action: RuleHalf,
    pub reaction: RuleHalf,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Edit payload; the id is addressed separately and never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<RuleHalf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction: Option<RuleHalf>,
}
