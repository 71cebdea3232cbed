pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use load::{apply_env_overrides, load_global_settings, load_settings_from};
pub use paths::{
    default_global_config_path, default_log_path, GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR,
};
pub use crate::validation::ValidationMode;
pub use settings::Settings;
