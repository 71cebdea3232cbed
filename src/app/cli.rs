#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Services,
    Fields,
    Validate,
    Preview,
    Connections,
    Areas,
    Create,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "services" => CliVerb::Services,
        "fields" => CliVerb::Fields,
        "validate" => CliVerb::Validate,
        "preview" => CliVerb::Preview,
        "connections" => CliVerb::Connections,
        "areas" => CliVerb::Areas,
        "create" => CliVerb::Create,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  services [--remote]                  List services with their actions and reactions"
            .to_string(),
        "  fields <service> <role> <kind>       Show the config fields of one action or reaction"
            .to_string(),
        "  validate <service> <role> <kind> [--set key=value ...] [--strict]".to_string(),
        "                                       Check a config for missing required fields"
            .to_string(),
        "  preview <service> <action> <text>    Show placeholders used in a reaction value"
            .to_string(),
        "  connections                          Show which services are connected".to_string(),
        "  areas list                           List your areas".to_string(),
        "  areas show|enable|disable|delete <id>".to_string(),
        "                                       Inspect, toggle or remove one area".to_string(),
        "  areas update <id> [--name <name>] [--description <text>]".to_string(),
        "                    [--action-set key=value ...] [--reaction-set key=value ...]"
            .to_string(),
        "                                       Edit an area through the wizard".to_string(),
        "  create --name <name> --action <service.kind> --reaction <service.kind>".to_string(),
        "         [--description <text>] [--action-set key=value ...]".to_string(),
        "         [--reaction-set key=value ...] [--disabled]".to_string(),
        "                                       Create an area through the wizard".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.push("Roles: action, reaction".to_string());
    lines.join("\n")
}
