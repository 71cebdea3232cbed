//! Four-step rule creation flow: name, action, reaction, review.
//!
//! The wizard owns the draft for one session. Guards are recomputed from the
//! latest draft on every query; nothing about validity is cached. Listing
//! fetches are handed out as [`OptionsTicket`]s and never gate a transition.

use crate::api::{ApiError, AreaStore, OptionSource};
use crate::area::{Area, AreaDraft, AreaUpdate};
use crate::catalog::{CapabilityCatalog, CatalogError, DynamicSource, FieldSpec, Role};
use crate::config::Settings;
use crate::shared::ids::{AreaId, UserId};
use crate::shared::logging::EventLog;
use crate::validation::{ConfigValue, OptionEntry, ValidationMode, ValidationOutcome, Validator};
use std::sync::Arc;

pub mod draft;
pub mod navigation;
pub mod options;

pub use draft::{HalfDraft, WizardDraft};
pub use navigation::{
    GuardBlock, WizardAction, WizardStage, WizardTransition, ALL_WIZARD_STAGES,
};
pub use options::{OptionsState, OptionsTicket};

use options::OptionsTracker;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WizardOptions {
    pub validation_mode: ValidationMode,
    /// Also require a complete action config before leaving the action step.
    pub gate_action_config: bool,
}

impl WizardOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            validation_mode: settings.validation_mode,
            gate_action_config: settings.gate_action_config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit(AreaId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Failed(String),
    Succeeded(Area),
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("cannot {} from the {stage} step", .action.as_str())]
    InvalidTransition {
        stage: WizardStage,
        action: WizardAction,
    },
    #[error("{0}")]
    Blocked(GuardBlock),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("invalid field key `{0}`")]
    InvalidField(String),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("this area has already been submitted")]
    AlreadySubmitted,
    #[error("no submission is in flight")]
    NoSubmissionInFlight,
    #[error("area submission failed: {0}")]
    Submission(#[source] ApiError),
    #[error("wizard session is closed")]
    Closed,
}

#[derive(Debug, Clone)]
pub struct Wizard {
    catalog: Arc<CapabilityCatalog>,
    validator: Validator,
    options: WizardOptions,
    log: EventLog,
    mode: WizardMode,
    stage: WizardStage,
    draft: WizardDraft,
    listings: OptionsTracker,
    submission: SubmissionState,
    closed: bool,
}

impl Wizard {
    pub fn new(catalog: Arc<CapabilityCatalog>, options: WizardOptions) -> Self {
        Self {
            catalog,
            validator: Validator::new(options.validation_mode),
            options,
            log: EventLog::disabled(),
            mode: WizardMode::Create,
            stage: WizardStage::Naming,
            draft: WizardDraft::default(),
            listings: OptionsTracker::default(),
            submission: SubmissionState::Idle,
            closed: false,
        }
    }

    /// Starts from a stored rule; submitting sends an update instead of a create.
    pub fn for_edit(catalog: Arc<CapabilityCatalog>, options: WizardOptions, area: &Area) -> Self {
        let mut wizard = Self::new(catalog, options);
        wizard.mode = WizardMode::Edit(area.id.clone());
        wizard.draft = WizardDraft::from_area(area);
        wizard
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn draft(&self) -> &WizardDraft {
        &self.draft
    }

    pub fn mode(&self) -> &WizardMode {
        &self.mode
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn catalog(&self) -> &CapabilityCatalog {
        &self.catalog
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn options_state(&self, role: Role, source: DynamicSource) -> &OptionsState {
        self.listings.state(role, source)
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.closed {
            return Err(WizardError::Closed);
        }
        if self.stage == WizardStage::Submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        if self.submission == SubmissionState::InFlight {
            return Err(WizardError::SubmissionInFlight);
        }
        Ok(())
    }

    fn catalog_failure(&self, err: CatalogError) -> WizardError {
        self.log.error("catalog.lookup_failed", &err.to_string());
        WizardError::Catalog(err)
    }

    fn blocked(&self, block: GuardBlock) -> WizardError {
        if let GuardBlock::CatalogLookup(err) = &block {
            self.log.error("catalog.lookup_failed", &err.to_string());
        }
        WizardError::Blocked(block)
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.name = name.to_string();
        Ok(())
    }

    /// Blank descriptions are stored as absent.
    pub fn set_description(&mut self, description: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;
        let trimmed = description.trim();
        self.draft.description = (!trimmed.is_empty()).then(|| trimmed.to_string());
        Ok(())
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.enabled = enabled;
        Ok(())
    }

    /// Fields whose listings matter for `role`: the chosen kind's, or every
    /// kind of the chosen service while no kind is picked yet.
    fn listing_fields(&self, role: Role) -> Vec<FieldSpec> {
        let half = self.draft.half(role);
        let Some(service) = half.service.as_ref() else {
            return Vec::new();
        };
        match half.kind.as_ref() {
            Some(kind) => self
                .catalog
                .field_specs_for(service.as_str(), kind.as_str(), role)
                .map(<[FieldSpec]>::to_vec)
                .unwrap_or_default(),
            None => self
                .catalog
                .service(service.as_str())
                .map(|s| {
                    s.kinds(role)
                        .iter()
                        .flat_map(|kind| kind.fields.iter().copied())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    fn pending_fetches(&mut self, role: Role) -> Vec<OptionsTicket> {
        let fields = self.listing_fields(role);
        self.listings
            .pending(role, &fields, &self.draft.half(role).config)
    }

    /// Picking a different service clears the step's kind, config and listings.
    pub fn select_service(
        &mut self,
        role: Role,
        service: &str,
    ) -> Result<Vec<OptionsTicket>, WizardError> {
        self.ensure_editable()?;
        let Some(name) = self.catalog.service(service.trim()).map(|s| s.name.clone()) else {
            return Err(self.catalog_failure(CatalogError::UnknownService {
                service: service.trim().to_string(),
            }));
        };
        let half = self.draft.half_mut(role);
        if half.service.as_ref() != Some(&name) {
            *half = draft::HalfDraft {
                service: Some(name),
                kind: None,
                config: Default::default(),
            };
            self.listings.reset_role(role);
        }
        Ok(self.pending_fetches(role))
    }

    /// Picking a different kind clears the step's config. Replacing an earlier
    /// kind also drops its listings.
    pub fn select_kind(
        &mut self,
        role: Role,
        kind: &str,
    ) -> Result<Vec<OptionsTicket>, WizardError> {
        self.ensure_editable()?;
        let Some(service) = self.draft.half(role).service.clone() else {
            return Err(WizardError::Blocked(GuardBlock::ServiceRequired(role)));
        };
        let name = match self.catalog.kind(service.as_str(), kind.trim(), role) {
            Ok(descriptor) => descriptor.name.clone(),
            Err(err) => return Err(self.catalog_failure(err)),
        };
        let half = self.draft.half_mut(role);
        if half.kind.as_ref() != Some(&name) {
            let replaced = half.kind.is_some();
            half.kind = Some(name);
            half.config.clear();
            if replaced {
                self.listings.reset_role(role);
            }
        }
        Ok(self.pending_fetches(role))
    }

    /// Sets one config value. Changing a value that scopes another listing
    /// (the guild for channels) clears the dependent choice and refetches.
    pub fn set_field(
        &mut self,
        role: Role,
        key: &str,
        value: impl Into<ConfigValue>,
    ) -> Result<Vec<OptionsTicket>, WizardError> {
        self.ensure_editable()?;
        let key = key.trim();
        if key.is_empty() {
            return Err(WizardError::InvalidField(key.to_string()));
        }
        let previous = self.draft.half(role).config.present(key);
        self.draft.half_mut(role).config.set(key, value);
        let current = self.draft.half(role).config.present(key);
        if previous != current {
            self.invalidate_dependents(role, key, previous.is_some());
        }
        Ok(self.pending_fetches(role))
    }

    pub fn remove_field(&mut self, role: Role, key: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;
        let key = key.trim();
        if self.draft.half_mut(role).config.remove(key).is_some() {
            self.invalidate_dependents(role, key, true);
        }
        Ok(())
    }

    fn invalidate_dependents(&mut self, role: Role, key: &str, clear_values: bool) {
        let dependents: Vec<FieldSpec> = self
            .listing_fields(role)
            .into_iter()
            .filter(|field| field.source.and_then(|s| s.depends_on()) == Some(key))
            .collect();
        for field in dependents {
            if let Some(source) = field.source {
                self.listings.reset_source(role, source);
            }
            if clear_values {
                self.draft.half_mut(role).config.remove(field.key);
            }
        }
    }

    /// Records a listing result. Returns `false` when the ticket is stale or
    /// the session is closed, in which case nothing changes.
    pub fn apply_options(
        &mut self,
        ticket: &OptionsTicket,
        result: Result<Vec<OptionEntry>, ApiError>,
    ) -> bool {
        if self.closed {
            self.log.info(
                "options.fetch_stale",
                &format!("dropped {} listing for closed session", ticket.source),
            );
            return false;
        }
        let failure = result.as_ref().err().map(ToString::to_string);
        let state = match result {
            Ok(entries) => OptionsState::Ready(entries),
            Err(err) => OptionsState::Failed(err.to_string()),
        };
        if !self.listings.apply(ticket, state) {
            self.log.info(
                "options.fetch_stale",
                &format!("dropped outdated {} listing", ticket.source),
            );
            return false;
        }
        if let Some(reason) = failure {
            self.log.warn(
                "options.fetch_failed",
                &format!("{} listing failed: {reason}", ticket.source),
            );
        }
        true
    }

    /// New ticket for a listing, typically after a failure.
    pub fn retry_options(&mut self, role: Role, source: DynamicSource) -> Option<OptionsTicket> {
        if self.closed {
            return None;
        }
        let config = self.draft.half(role).config.clone();
        self.listings.retry(role, source, &config)
    }

    /// Runs `tickets` against `source` in order and applies each result.
    pub fn resolve_fetches(&mut self, source: &dyn OptionSource, tickets: Vec<OptionsTicket>) {
        for ticket in tickets {
            let result = source.fetch_options(ticket.source, ticket.scope.as_deref());
            self.apply_options(&ticket, result);
        }
    }

    /// Current completeness of one half, for inline display.
    pub fn validation(&self, role: Role) -> Result<ValidationOutcome, GuardBlock> {
        let half = self.draft.half(role);
        let service = half
            .service
            .as_ref()
            .ok_or(GuardBlock::ServiceRequired(role))?;
        let kind = half.kind.as_ref().ok_or(GuardBlock::KindRequired(role))?;
        let fields = self
            .catalog
            .field_specs_for(service.as_str(), kind.as_str(), role)
            .map_err(GuardBlock::CatalogLookup)?;
        let resolved = self.listings.resolved(role, fields);
        self.validator
            .validate_kind(
                &self.catalog,
                service.as_str(),
                kind.as_str(),
                role,
                &half.config,
                &resolved,
            )
            .map_err(GuardBlock::CatalogLookup)
    }

    fn half_guard(&self, role: Role, require_config: bool) -> Result<(), GuardBlock> {
        let half = self.draft.half(role);
        if half.service.is_none() {
            return Err(GuardBlock::ServiceRequired(role));
        }
        if half.kind.is_none() {
            return Err(GuardBlock::KindRequired(role));
        }
        if !require_config {
            return Ok(());
        }
        match self.validation(role)? {
            ValidationOutcome::Complete => Ok(()),
            ValidationOutcome::Incomplete { missing } => {
                Err(GuardBlock::IncompleteConfig { role, missing })
            }
        }
    }

    /// Guard for entering `target` from the stage before it.
    pub fn guard(&self, target: WizardStage) -> Result<(), GuardBlock> {
        match target {
            WizardStage::Naming => Ok(()),
            WizardStage::ActionSelection => {
                if self.draft.trimmed_name().is_empty() {
                    Err(GuardBlock::NameRequired)
                } else {
                    Ok(())
                }
            }
            WizardStage::ReactionSelection => {
                self.half_guard(Role::Action, self.options.gate_action_config)
            }
            WizardStage::Review => self.half_guard(Role::Reaction, true),
            WizardStage::Submitted => {
                self.guard(WizardStage::ActionSelection)?;
                self.guard(WizardStage::ReactionSelection)?;
                self.guard(WizardStage::Review)?;
                if self.submission == SubmissionState::InFlight {
                    return Err(GuardBlock::SubmissionInFlight);
                }
                Ok(())
            }
        }
    }

    pub fn can_proceed_to(&self, target: WizardStage) -> bool {
        self.guard(target).is_ok()
    }

    pub fn next(&mut self) -> Result<WizardTransition, WizardError> {
        if self.closed {
            return Err(WizardError::Closed);
        }
        let target = match self.stage {
            WizardStage::Review | WizardStage::Submitted => {
                return Err(WizardError::InvalidTransition {
                    stage: self.stage,
                    action: WizardAction::Next,
                })
            }
            stage => stage.next().ok_or(WizardError::InvalidTransition {
                stage,
                action: WizardAction::Next,
            })?,
        };
        if let Err(block) = self.guard(target) {
            return Err(self.blocked(block));
        }
        self.stage = target;
        Ok(self.entered())
    }

    /// Always allowed before submission; keeps every entered value.
    pub fn back(&mut self) -> Result<WizardTransition, WizardError> {
        if self.closed {
            return Err(WizardError::Closed);
        }
        if self.submission == SubmissionState::InFlight {
            return Err(WizardError::SubmissionInFlight);
        }
        let Some(target) = self.stage.previous() else {
            return Err(WizardError::InvalidTransition {
                stage: self.stage,
                action: WizardAction::Back,
            });
        };
        self.stage = target;
        Ok(self.entered())
    }

    fn entered(&mut self) -> WizardTransition {
        let fetches = match self.stage.role() {
            Some(role) => self.pending_fetches(role),
            None => Vec::new(),
        };
        WizardTransition {
            stage: self.stage,
            fetches,
        }
    }

    /// Marks a submission in flight and hands out the payload to send.
    ///
    /// A second call before [`Wizard::complete_submission`] fails, so at most
    /// one request leaves per attempt.
    pub fn begin_submission(&mut self) -> Result<AreaDraft, WizardError> {
        if self.closed {
            return Err(WizardError::Closed);
        }
        match self.submission {
            SubmissionState::InFlight => return Err(WizardError::SubmissionInFlight),
            SubmissionState::Succeeded(_) => return Err(WizardError::AlreadySubmitted),
            SubmissionState::Idle | SubmissionState::Failed(_) => {}
        }
        if self.stage != WizardStage::Review {
            return Err(WizardError::InvalidTransition {
                stage: self.stage,
                action: WizardAction::Submit,
            });
        }
        if let Err(block) = self.guard(WizardStage::Submitted) {
            return Err(self.blocked(block));
        }
        let Some(payload) = self.draft.to_area_draft() else {
            return Err(WizardError::Blocked(GuardBlock::KindRequired(Role::Reaction)));
        };
        self.submission = SubmissionState::InFlight;
        self.log.info(
            "area.submit_started",
            &format!("submitting area `{}`", payload.name),
        );
        Ok(payload)
    }

    /// Records the persistence outcome. On failure the draft is kept and the
    /// wizard stays on review so the user can resubmit.
    pub fn complete_submission(
        &mut self,
        result: Result<Area, ApiError>,
    ) -> Result<Area, WizardError> {
        if self.submission != SubmissionState::InFlight {
            return Err(WizardError::NoSubmissionInFlight);
        }
        if self.closed {
            self.log.info(
                "area.submit_stale",
                "submission finished after the session closed",
            );
            self.submission = SubmissionState::Idle;
            return Err(WizardError::Closed);
        }
        match result {
            Ok(area) => {
                self.log.info(
                    "area.submit_succeeded",
                    &format!("area `{}` stored with id {}", area.name, area.id),
                );
                self.stage = WizardStage::Submitted;
                self.submission = SubmissionState::Succeeded(area.clone());
                Ok(area)
            }
            Err(err) => {
                self.log.error("area.submit_failed", &err.to_string());
                self.submission = SubmissionState::Failed(err.to_string());
                Err(WizardError::Submission(err))
            }
        }
    }

    /// Begins, sends and completes one submission through `store`.
    pub fn submit(&mut self, store: &dyn AreaStore, user: &UserId) -> Result<Area, WizardError> {
        let payload = self.begin_submission()?;
        let result = match self.mode.clone() {
            WizardMode::Create => store.create_area(user, &payload),
            WizardMode::Edit(id) => store.update_area(user, &id, &AreaUpdate::from(payload)),
        };
        self.complete_submission(result)
    }

    /// Tears the session down; later listing or submission results are dropped.
    pub fn close(&mut self) {
        self.closed = true;
        self.listings.reset_all();
    }
}
