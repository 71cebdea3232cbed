use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod areas;
pub mod catalog;
pub mod connections;
pub mod create;
pub mod validate;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Services => catalog::cmd_services(&args[1..]),
        CliVerb::Fields => catalog::cmd_fields(&args[1..]),
        CliVerb::Validate => validate::cmd_validate(&args[1..]),
        CliVerb::Preview => validate::cmd_preview(&args[1..]),
        CliVerb::Connections => connections::cmd_connections(&args[1..]),
        CliVerb::Areas => areas::cmd_areas(&args[1..]),
        CliVerb::Create => create::cmd_create(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
