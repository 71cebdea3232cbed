use super::options::OptionsTicket;
use crate::catalog::{CatalogError, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStage {
    Naming,
    ActionSelection,
    ReactionSelection,
    Review,
    Submitted,
}

pub const ALL_WIZARD_STAGES: [WizardStage; 5] = [
    WizardStage::Naming,
    WizardStage::ActionSelection,
    WizardStage::ReactionSelection,
    WizardStage::Review,
    WizardStage::Submitted,
];

impl WizardStage {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardStage::Naming => "naming",
            WizardStage::ActionSelection => "action_selection",
            WizardStage::ReactionSelection => "reaction_selection",
            WizardStage::Review => "review",
            WizardStage::Submitted => "submitted",
        }
    }

    pub fn next(self) -> Option<WizardStage> {
        match self {
            WizardStage::Naming => Some(WizardStage::ActionSelection),
            WizardStage::ActionSelection => Some(WizardStage::ReactionSelection),
            WizardStage::ReactionSelection => Some(WizardStage::Review),
            WizardStage::Review => Some(WizardStage::Submitted),
            WizardStage::Submitted => None,
        }
    }

    pub fn previous(self) -> Option<WizardStage> {
        match self {
            WizardStage::Naming | WizardStage::Submitted => None,
            WizardStage::ActionSelection => Some(WizardStage::Naming),
            WizardStage::ReactionSelection => Some(WizardStage::ActionSelection),
            WizardStage::Review => Some(WizardStage::ReactionSelection),
        }
    }

    /// Role whose service/kind/config is edited on this stage.
    pub fn role(self) -> Option<Role> {
        match self {
            WizardStage::ActionSelection => Some(Role::Action),
            WizardStage::ReactionSelection => Some(Role::Reaction),
            _ => None,
        }
    }
}

impl std::fmt::Display for WizardStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Next,
    Back,
    Submit,
}

impl WizardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardAction::Next => "next",
            WizardAction::Back => "back",
            WizardAction::Submit => "submit",
        }
    }
}

/// Why a forward transition is currently refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardBlock {
    NameRequired,
    ServiceRequired(Role),
    KindRequired(Role),
    IncompleteConfig { role: Role, missing: Vec<String> },
    CatalogLookup(CatalogError),
    SubmissionInFlight,
}

impl std::fmt::Display for GuardBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuardBlock::NameRequired => f.write_str("area name is required"),
            GuardBlock::ServiceRequired(role) => write!(f, "choose the {role} service"),
            GuardBlock::KindRequired(role) => write!(f, "choose the {role} type"),
            GuardBlock::IncompleteConfig { role, missing } => {
                write!(f, "{role} configuration is missing: {}", missing.join(", "))
            }
            GuardBlock::CatalogLookup(err) => write!(f, "catalog lookup failed: {err}"),
            GuardBlock::SubmissionInFlight => f.write_str("a submission is already in flight"),
        }
    }
}

/// Result of a stage change: where the wizard is now and which listings to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardTransition {
    pub stage: WizardStage,
    pub fetches: Vec<OptionsTicket>,
}
