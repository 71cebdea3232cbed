use crate::api::{ApiClient, CatalogSource};
use crate::catalog::{CapabilityCatalog, Role};
use crate::config::{load_global_settings, ConfigError, Settings};
use crate::shared::ids::{AreaId, UserId};
use crate::shared::logging::EventLog;

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn load_settings() -> Result<Settings, String> {
    load_global_settings().map_err(map_config_err)
}

pub fn require_user(settings: &Settings) -> Result<UserId, String> {
    settings.require_user_id().cloned().map_err(map_config_err)
}

pub fn api_client(settings: &Settings) -> ApiClient {
    ApiClient::new(settings)
}

/// Catalog as the server advertises it.
pub fn fetch_catalog(
    source: &dyn CatalogSource,
    log: &EventLog,
) -> Result<CapabilityCatalog, String> {
    let doc = source.fetch_about().map_err(|e| e.to_string())?;
    let catalog = CapabilityCatalog::from_about(&doc, log);
    if catalog.is_empty() {
        return Err("server advertised no services".to_string());
    }
    Ok(catalog)
}

pub fn parse_role(raw: &str) -> Result<Role, String> {
    Role::parse(raw)
}

pub fn parse_area_id(raw: &str) -> Result<AreaId, String> {
    AreaId::parse(raw)
}

/// Flags split from positional arguments. Repeated value flags keep every value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagArgs {
    values: Vec<(String, String)>,
    switches: Vec<String>,
}

impl FlagArgs {
    /// Last value given for `flag`.
    pub fn value(&self, flag: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(name, _)| name == flag)
            .map(|(_, value)| value.as_str())
    }

    pub fn values(&self, flag: &str) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(name, _)| name == flag)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn has(&self, flag: &str) -> bool {
        self.switches.iter().any(|name| name == flag)
    }
}

pub fn parse_flags(
    args: &[String],
    value_flags: &[&str],
    switch_flags: &[&str],
) -> Result<FlagArgs, String> {
    let mut flags = FlagArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        let arg = args[i].as_str();
        if switch_flags.contains(&arg) {
            flags.switches.push(arg.to_string());
            i += 1;
            continue;
        }
        if !value_flags.contains(&arg) {
            return Err(format!("unexpected argument `{arg}`"));
        }
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("{arg} requires a value"))?;
        flags.values.push((arg.to_string(), value.clone()));
        i += 2;
    }
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_flags_collects_repeated_values_and_switches() {
        let flags = parse_flags(
            &args(&["--set", "a=1", "--strict", "--set", "b=2"]),
            &["--set"],
            &["--strict"],
        )
        .expect("flags");
        assert_eq!(flags.values("--set"), vec!["a=1", "b=2"]);
        assert_eq!(flags.value("--set"), Some("b=2"));
        assert!(flags.has("--strict"));
    }

    #[test]
    fn parse_flags_rejects_unknown_and_dangling_flags() {
        assert_eq!(
            parse_flags(&args(&["--nope"]), &["--set"], &[]).expect_err("unknown"),
            "unexpected argument `--nope`"
        );
        assert_eq!(
            parse_flags(&args(&["--set"]), &["--set"], &[]).expect_err("dangling"),
            "--set requires a value"
        );
    }
}
