use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use speedx_engine::{AnalyzeSettings, SettingsError, DEFAULT_ORIGIN};
use speedx_logging::{speedx_info, speedx_warn};
use thiserror::Error;

use super::cli::Cli;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint_origin: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Reads the config file. `Ok(None)` when it does not exist.
pub fn read_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source: err,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
}

/// Like [`read_config`], but falls back to defaults with a warning.
pub fn load_config(path: &Path) -> AppConfig {
    match read_config(path) {
        Ok(Some(config)) => {
            speedx_info!("Loaded configuration from {:?}", path);
            config
        }
        Ok(None) => AppConfig::default(),
        Err(err) => {
            speedx_warn!("{}; using defaults", err);
            AppConfig::default()
        }
    }
}

/// Command-line values win over the file, the file over built-in defaults.
pub fn resolve_settings(cli: &Cli, config: &AppConfig) -> Result<AnalyzeSettings, SettingsError> {
    let origin = cli
        .endpoint
        .as_deref()
        .or(config.endpoint_origin.as_deref())
        .unwrap_or(DEFAULT_ORIGIN);
    let mut settings = AnalyzeSettings::from_origin(origin)?;
    settings.request_timeout = cli
        .timeout_secs
        .or(config.request_timeout_secs)
        .map(Duration::from_secs);
    Ok(settings)
}
