use super::{default_log_path, ConfigError};
use crate::shared::ids::UserId;
use crate::shared::logging::EventLog;
use crate::validation::ValidationMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    #[serde(default)]
    pub validation_mode: ValidationMode,
    #[serde(default)]
    pub gate_action_config: bool,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_id: None,
            auth_token: None,
            request_timeout_ms: default_request_timeout_ms(),
            log_path: None,
            validation_mode: ValidationMode::default(),
            gate_action_config: false,
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Settings(
                "`api_base_url` must be non-empty".to_string(),
            ));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ConfigError::Settings(format!(
                "`api_base_url` must start with http:// or https://, got `{base}`"
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Settings(
                "`request_timeout_ms` must be greater than zero".to_string(),
            ));
        }
        if let Some(token) = &self.auth_token {
            if token.trim().is_empty() {
                return Err(ConfigError::Settings(
                    "`auth_token` must be non-empty when set".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn require_user_id(&self) -> Result<&UserId, ConfigError> {
        self.user_id.as_ref().ok_or_else(|| {
            ConfigError::Settings(
                "`user_id` is not configured; set it in config.yaml or AREABOARD_USER_ID"
                    .to_string(),
            )
        })
    }

    /// Event log at `log_path`, or the default state-dir log when unset.
    pub fn event_log(&self) -> EventLog {
        match &self.log_path {
            Some(path) => EventLog::to_file(path),
            None => default_log_path()
                .map(EventLog::to_file)
                .unwrap_or_else(|_| EventLog::disabled()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let settings: Settings = serde_yaml::from_str("{}").expect("parse settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.validation_mode, ValidationMode::Permissive);
        assert!(!settings.gate_action_config);
        settings.validate().expect("defaults are valid");
    }

    #[test]
    fn validation_rejects_non_http_base_url() {
        let settings: Settings =
            serde_yaml::from_str("api_base_url: ftp://example.com\n").expect("parse settings");
        let err = settings.validate().expect_err("validation should fail");
        match err {
            ConfigError::Settings(message) => assert!(message.contains("http://")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validation_rejects_zero_timeout() {
        let settings = Settings {
            request_timeout_ms: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn require_user_id_reports_missing_identity() {
        let settings = Settings::default();
        assert!(settings.require_user_id().is_err());

        let settings: Settings =
            serde_yaml::from_str("user_id: user-7\nvalidation_mode: strict\n")
                .expect("parse settings");
        assert_eq!(settings.require_user_id().expect("user").as_str(), "user-7");
        assert_eq!(settings.validation_mode, ValidationMode::Strict);
    }
}
