use super::create::{render_area_fields, run_wizard, WizardInput};
use crate::api::{ApiClient, AreaStore};
use crate::app::command_support::{
    api_client, fetch_catalog, load_settings, parse_area_id, parse_flags, require_user,
};
use crate::area::Area;
use crate::config::Settings;
use crate::shared::ids::{AreaId, UserId};
use crate::wizard::{Wizard, WizardOptions};
use std::sync::Arc;

const AREAS_USAGE: &str = "usage: areas list|show|enable|disable|delete|update ...";

fn session() -> Result<(Settings, UserId, ApiClient), String> {
    let settings = load_settings()?;
    let user = require_user(&settings)?;
    let client = api_client(&settings);
    Ok((settings, user, client))
}

fn require_id(args: &[String], verb: &str) -> Result<AreaId, String> {
    if args.len() != 2 {
        return Err(format!("usage: areas {verb} <area_id>"));
    }
    parse_area_id(&args[1])
}

pub fn cmd_areas(args: &[String]) -> Result<String, String> {
    let Some(verb) = args.first() else {
        return Err(AREAS_USAGE.to_string());
    };
    match verb.as_str() {
        "list" => {
            if args.len() != 1 {
                return Err("usage: areas list".to_string());
            }
            let (_, user, client) = session()?;
            let areas = client.list_areas(&user).map_err(|e| e.to_string())?;
            Ok(render_area_list(&areas))
        }
        "show" => {
            let id = require_id(args, "show")?;
            let (_, user, client) = session()?;
            let area = find_area(&client, &user, &id)?;
            serde_json::to_string_pretty(&area).map_err(|e| format!("failed to encode area: {e}"))
        }
        "enable" | "disable" => {
            let id = require_id(args, verb)?;
            let enabled = verb == "enable";
            let (_, user, client) = session()?;
            let area = client
                .set_area_enabled(&user, &id, enabled)
                .map_err(|e| e.to_string())?;
            Ok(format!(
                "area {}\n{}",
                if area.enabled { "enabled" } else { "disabled" },
                render_area_fields(&area)
            ))
        }
        "delete" => {
            let id = require_id(args, "delete")?;
            let (_, user, client) = session()?;
            client.delete_area(&user, &id).map_err(|e| e.to_string())?;
            Ok(format!("area deleted\nid={id}"))
        }
        "update" => cmd_update(&args[1..]),
        other => Err(format!("unknown areas subcommand `{other}`\n{AREAS_USAGE}")),
    }
}

pub fn render_area_list(areas: &[Area]) -> String {
    if areas.is_empty() {
        return "no areas".to_string();
    }
    areas
        .iter()
        .map(Area::summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn find_area(store: &dyn AreaStore, user: &UserId, id: &AreaId) -> Result<Area, String> {
    store
        .list_areas(user)
        .map_err(|e| e.to_string())?
        .into_iter()
        .find(|area| &area.id == id)
        .ok_or_else(|| format!("unknown area `{id}`"))
}

fn cmd_update(args: &[String]) -> Result<String, String> {
    if args.is_empty() {
        return Err("usage: areas update <area_id> [--name <name>] [--description <text>] [--action <service.kind>] [--reaction <service.kind>] [--action-set key=value ...] [--reaction-set key=value ...]".to_string());
    }
    let id = parse_area_id(&args[0])?;
    let flags = parse_flags(
        &args[1..],
        &[
            "--name",
            "--description",
            "--action",
            "--reaction",
            "--action-set",
            "--reaction-set",
        ],
        &[],
    )?;
    let input = WizardInput::from_flags(&flags)?;

    let (settings, user, client) = session()?;
    let area = find_area(&client, &user, &id)?;
    let catalog = fetch_catalog(&client, &settings.event_log())?;
    let mut wizard = Wizard::for_edit(
        Arc::new(catalog),
        WizardOptions::from_settings(&settings),
        &area,
    )
    .with_log(settings.event_log());
    let updated = run_wizard(&mut wizard, &client, &client, &user, &input)?;
    Ok(format!("area updated\n{}", render_area_fields(&updated)))
}
