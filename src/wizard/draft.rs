use crate::area::{Area, AreaDraft, AreaUpdate, RuleHalf};
use crate::catalog::Role;
use crate::shared::ids::{KindName, ServiceName};
use crate::validation::Config;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HalfDraft {
    pub service: Option<ServiceName>,
    pub kind: Option<KindName>,
    pub config: Config,
}

impl HalfDraft {
    fn from_rule_half(half: &RuleHalf) -> Self {
        Self {
            service: Some(half.service.clone()),
            kind: Some(half.kind.clone()),
            config: half.config.clone(),
        }
    }

    pub fn to_rule_half(&self) -> Option<RuleHalf> {
        Some(RuleHalf::new(
            self.service.clone()?,
            self.kind.clone()?,
            self.config.clone(),
        ))
    }
}

/// In-memory rule being assembled; owned by one wizard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardDraft {
    pub name: String,
    pub description: Option<String>,
    pub action: HalfDraft,
    pub reaction: HalfDraft,
    pub enabled: bool,
}

impl Default for WizardDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            action: HalfDraft::default(),
            reaction: HalfDraft::default(),
            enabled: true,
        }
    }
}

impl WizardDraft {
    pub fn from_area(area: &Area) -> Self {
        Self {
            name: area.name.clone(),
            description: area.description.clone(),
            action: HalfDraft::from_rule_half(&area.action),
            reaction: HalfDraft::from_rule_half(&area.reaction),
            enabled: area.enabled,
        }
    }

    pub fn half(&self, role: Role) -> &HalfDraft {
        match role {
            Role::Action => &self.action,
            Role::Reaction => &self.reaction,
        }
    }

    pub(crate) fn half_mut(&mut self, role: Role) -> &mut HalfDraft {
        match role {
            Role::Action => &mut self.action,
            Role::Reaction => &mut self.reaction,
        }
    }

    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// `None` until both halves have a service and kind.
    pub fn to_area_draft(&self) -> Option<AreaDraft> {
        Some(AreaDraft {
            name: self.trimmed_name().to_string(),
            description: self.description.clone(),
            action: self.action.to_rule_half()?,
            reaction: self.reaction.to_rule_half()?,
            enabled: self.enabled,
        })
    }
}

/// Edits always carry the description; an empty one clears the stored text.
impl From<AreaDraft> for AreaUpdate {
    fn from(draft: AreaDraft) -> Self {
        Self {
            name: Some(draft.name),
            description: Some(draft.description.unwrap_or_default()),
            action: Some(draft.action),
            reaction: Some(draft.reaction),
        }
    }
}
