use super::{default_global_config_path, ConfigError, Settings};
use std::path::Path;

pub const API_BASE_ENV: &str = "AREABOARD_API_BASE";
pub const TOKEN_ENV: &str = "AREABOARD_TOKEN";
pub const USER_ID_ENV: &str = "AREABOARD_USER_ID";

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn load_global_settings() -> Result<Settings, ConfigError> {
    let path = default_global_config_path()?;
    load_settings_from(&path)
}

/// Reads settings from `path` (defaults when the file is absent), then applies env overrides.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let mut settings = if path.exists() {
        Settings::from_path(path)?
    } else {
        Settings::default()
    };
    apply_env_overrides(&mut settings)?;
    settings.validate()?;
    Ok(settings)
}

pub fn apply_env_overrides(settings: &mut Settings) -> Result<(), ConfigError> {
    if let Some(base) = non_empty_env(API_BASE_ENV) {
        settings.api_base_url = base.trim().to_string();
    }
    if let Some(token) = non_empty_env(TOKEN_ENV) {
        settings.auth_token = Some(token.trim().to_string());
    }
    if let Some(user_id) = non_empty_env(USER_ID_ENV) {
        settings.user_id = Some(
            crate::shared::ids::UserId::parse(&user_id).map_err(ConfigError::Settings)?,
        );
    }
    Ok(())
}
