use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable that overrides the configured API base URL
pub const BASE_URL_ENV: &str = "ACTIVITY_BOARD_URL";

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn new(base_url: String) -> Result<Self, ConfigError> {
        Ok(Config {
            base_url: normalize_base_url(&base_url)?,
        })
    }

    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "mergington", "activity-board")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }

    /// Resolve the effective configuration.
    ///
    /// Precedence: explicit override (the `--base-url` flag), then the
    /// `ACTIVITY_BOARD_URL` environment variable, then the config file, then
    /// [`DEFAULT_BASE_URL`].
    pub fn resolve(cli_override: Option<String>) -> Result<Self, ConfigError> {
        if let Some(url) = cli_override {
            return Config::new(url);
        }
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                return Config::new(url);
            }
        }
        match Self::get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config_data =
            fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        let config: Config = serde_json::from_str(&config_data)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to parse config: {}", e)))?;

        Config::new(config.base_url)
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let config_path = Self::get_config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::DirectoryCreationFailed(e.to_string()))?;
        }

        let config_data = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        fs::write(path, config_data).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }
}

/// Trim whitespace and trailing slashes, and require an http(s) scheme
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}
