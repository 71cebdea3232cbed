use crate::app::command_support::{api_client, fetch_catalog, load_settings, parse_flags, parse_role};
use crate::catalog::{CapabilityCatalog, KindDescriptor, Role};

pub fn cmd_services(args: &[String]) -> Result<String, String> {
    let flags = parse_flags(args, &[], &["--remote"])?;
    let catalog = if flags.has("--remote") {
        let settings = load_settings()?;
        fetch_catalog(&api_client(&settings), &settings.event_log())?
    } else {
        CapabilityCatalog::builtin()
    };
    Ok(render_services(&catalog))
}

pub fn render_services(catalog: &CapabilityCatalog) -> String {
    let names = |kinds: &[KindDescriptor]| {
        kinds
            .iter()
            .map(|k| k.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    };
    catalog
        .list_services()
        .iter()
        .map(|service| {
            format!(
                "{}\tactions={}\treactions={}",
                service.name,
                names(service.kinds(Role::Action)),
                names(service.kinds(Role::Reaction))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn cmd_fields(args: &[String]) -> Result<String, String> {
    if args.len() != 3 {
        return Err("usage: fields <service> <action|reaction> <kind>".to_string());
    }
    let role = parse_role(&args[1])?;
    let catalog = CapabilityCatalog::builtin();
    let kind = catalog
        .kind(args[0].trim(), args[2].trim(), role)
        .map_err(|e| e.to_string())?;
    Ok(render_kind(args[0].trim(), role, kind))
}

fn render_kind(service: &str, role: Role, kind: &KindDescriptor) -> String {
    let mut lines = vec![
        format!("service={service}"),
        format!("role={role}"),
        format!("kind={}", kind.name),
        format!("description={}", kind.description),
    ];
    if !kind.needs_configuration() {
        lines.push("fields=none".to_string());
    }
    for field in kind.fields {
        let mut line = format!(
            "field={} label=\"{}\" kind={} required={}",
            field.key, field.label, field.kind, field.required
        );
        if let Some(source) = field.source {
            line.push_str(&format!(" source={source}"));
        }
        lines.push(line);
    }
    if role == Role::Action && !kind.placeholders.is_empty() {
        lines.push(format!("placeholders={}", kind.placeholders.join(",")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn services_render_one_line_per_service() {
        let rendered = render_services(&CapabilityCatalog::builtin());
        assert!(rendered
            .lines()
            .any(|line| line.starts_with("timer\t") && line.ends_with("reactions=")));
        assert_eq!(rendered.lines().count(), 5);
    }

    #[test]
    fn fields_lists_required_flags_and_sources() {
        let out = cmd_fields(&args(&["github", "reaction", "create_issue"])).expect("fields");
        assert!(out.contains("field=title label=\"Issue title\" kind=short_text required=true"));
        assert!(out.contains("source=github_repositories"));
    }

    #[test]
    fn fields_for_unconfigured_kind_say_none() {
        let out = cmd_fields(&args(&["spotify", "reaction", "pause_playback"])).expect("fields");
        assert!(out.contains("fields=none"));
    }

    #[test]
    fn fields_rejects_unknown_kind() {
        let err = cmd_fields(&args(&["github", "action", "nope"])).expect_err("unknown");
        assert!(err.contains("nope"));
    }
}
