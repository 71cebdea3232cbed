use crate::app::command_support::{load_settings, parse_flags, parse_role};
use crate::catalog::{CapabilityCatalog, Role};
use crate::validation::{
    parse_config_pairs, preview, Config, ResolvedOptions, ValidationMode, Validator,
};

pub fn cmd_validate(args: &[String]) -> Result<String, String> {
    if args.len() < 3 {
        return Err(
            "usage: validate <service> <action|reaction> <kind> [--set key=value ...] [--strict]"
                .to_string(),
        );
    }
    let role = parse_role(&args[1])?;
    let flags = parse_flags(&args[3..], &["--set"], &["--strict"])?;
    let config = parse_config_pairs(flags.values("--set"))?;
    let mode = if flags.has("--strict") {
        ValidationMode::Strict
    } else {
        load_settings()?.validation_mode
    };
    validation_report(
        &CapabilityCatalog::builtin(),
        mode,
        args[0].trim(),
        role,
        args[2].trim(),
        &config,
    )
}

/// Outcome as `{"ok":..,"missing":[..]}` JSON.
pub fn validation_report(
    catalog: &CapabilityCatalog,
    mode: ValidationMode,
    service: &str,
    role: Role,
    kind: &str,
    config: &Config,
) -> Result<String, String> {
    let outcome = Validator::new(mode)
        .validate_kind(catalog, service, kind, role, config, &ResolvedOptions::new())
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&outcome).map_err(|e| format!("failed to encode outcome: {e}"))
}

pub fn cmd_preview(args: &[String]) -> Result<String, String> {
    if args.len() < 3 {
        return Err("usage: preview <service> <action_kind> <text>".to_string());
    }
    let catalog = CapabilityCatalog::builtin();
    let kind = catalog
        .kind(args[0].trim(), args[1].trim(), Role::Action)
        .map_err(|e| e.to_string())?;
    let text = args[2..].join(" ");
    let result = preview(&text, kind.placeholders);
    Ok(format!(
        "tokens={}\nundocumented={}\nrendered={}",
        result.tokens.join(","),
        result.undocumented.join(","),
        result.rendered
    ))
}
