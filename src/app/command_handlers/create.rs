use crate::api::{AreaStore, OptionSource};
use crate::app::command_support::{
    api_client, fetch_catalog, load_settings, parse_flags, require_user, FlagArgs,
};
use crate::area::{Area, RuleHalf};
use crate::catalog::Role;
use crate::shared::ids::{KindName, ServiceName, UserId};
use crate::validation::{parse_config_pairs, Config};
use crate::wizard::{Wizard, WizardOptions};
use std::sync::Arc;

const CREATE_USAGE: &str = "usage: create --name <name> --action <service.kind> --reaction <service.kind> [--description <text>] [--action-set key=value ...] [--reaction-set key=value ...] [--disabled]";

/// Command-line input for one half of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HalfInput {
    pub selection: Option<(ServiceName, KindName)>,
    pub config: Config,
}

impl HalfInput {
    fn from_flags(flags: &FlagArgs, select_flag: &str, set_flag: &str) -> Result<Self, String> {
        let selection = flags
            .value(select_flag)
            .map(RuleHalf::parse_qualified)
            .transpose()?;
        let config = parse_config_pairs(flags.values(set_flag))?;
        Ok(Self { selection, config })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub action: HalfInput,
    pub reaction: HalfInput,
}

impl WizardInput {
    pub(crate) fn from_flags(flags: &FlagArgs) -> Result<Self, String> {
        Ok(Self {
            name: flags.value("--name").map(str::to_string),
            description: flags.value("--description").map(str::to_string),
            action: HalfInput::from_flags(flags, "--action", "--action-set")?,
            reaction: HalfInput::from_flags(flags, "--reaction", "--reaction-set")?,
        })
    }
}

/// Fills the wizard's current step, resolving listings as they are requested.
fn fill_half(
    wizard: &mut Wizard,
    source: &dyn OptionSource,
    role: Role,
    input: &HalfInput,
) -> Result<(), String> {
    if let Some((service, kind)) = &input.selection {
        let tickets = wizard
            .select_service(role, service.as_str())
            .map_err(|e| e.to_string())?;
        wizard.resolve_fetches(source, tickets);
        let tickets = wizard
            .select_kind(role, kind.as_str())
            .map_err(|e| e.to_string())?;
        wizard.resolve_fetches(source, tickets);
    }
    for (key, value) in input.config.iter() {
        let tickets = wizard
            .set_field(role, key, value.clone())
            .map_err(|e| e.to_string())?;
        wizard.resolve_fetches(source, tickets);
    }
    Ok(())
}

/// Walks every step in order and submits once from review.
pub fn run_wizard(
    wizard: &mut Wizard,
    source: &dyn OptionSource,
    store: &dyn AreaStore,
    user: &UserId,
    input: &WizardInput,
) -> Result<Area, String> {
    if let Some(name) = &input.name {
        wizard.set_name(name).map_err(|e| e.to_string())?;
    }
    if let Some(description) = &input.description {
        wizard
            .set_description(description)
            .map_err(|e| e.to_string())?;
    }
    for (role, half) in [(Role::Action, &input.action), (Role::Reaction, &input.reaction)] {
        let transition = wizard.next().map_err(|e| e.to_string())?;
        wizard.resolve_fetches(source, transition.fetches);
        fill_half(wizard, source, role, half)?;
    }
    wizard.next().map_err(|e| e.to_string())?;
    wizard.submit(store, user).map_err(|e| e.to_string())
}

pub(crate) fn render_area_fields(area: &Area) -> String {
    format!(
        "id={}\nname={}\naction={}\nreaction={}\nenabled={}",
        area.id,
        area.name,
        area.action.qualified_name(),
        area.reaction.qualified_name(),
        area.enabled
    )
}

pub fn cmd_create(args: &[String]) -> Result<String, String> {
    let flags = parse_flags(
        args,
        &[
            "--name",
            "--description",
            "--action",
            "--reaction",
            "--action-set",
            "--reaction-set",
        ],
        &["--disabled"],
    )?;
    if flags.value("--action").is_none() || flags.value("--reaction").is_none() {
        return Err(CREATE_USAGE.to_string());
    }
    let input = WizardInput::from_flags(&flags)?;

    let settings = load_settings()?;
    let user = require_user(&settings)?;
    let client = api_client(&settings);
    let catalog = fetch_catalog(&client, &settings.event_log())?;
    let mut wizard = Wizard::new(Arc::new(catalog), WizardOptions::from_settings(&settings))
        .with_log(settings.event_log());
    if flags.has("--disabled") {
        wizard.set_enabled(false).map_err(|e| e.to_string())?;
    }
    let area = run_wizard(&mut wizard, &client, &client, &user, &input)?;
    Ok(format!("area created\n{}", render_area_fields(&area)))
}
