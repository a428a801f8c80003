//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run, defaults apply).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

/// Portal backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the portal API (e.g. "http://localhost:8000/api").
    pub base_url: String,
    /// Transport timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub start_maximized: bool,
    /// Seconds an upload success notice stays before the form resets.
    #[serde(default = "default_notice_secs")]
    pub notice_secs: u64,
}

fn default_notice_secs() -> u64 {
    3
}

impl AppConfig {
    /// Get config file path in the platform config directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("edu", "bsu", "bsu-portal")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Directory for session storage and rolling logs.
    pub fn data_dir() -> PathBuf {
        directories::ProjectDirs::from("edu", "bsu", "bsu-portal")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("API base URL cannot be empty".to_string()));
        }
        if !self.api.base_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "API base URL must start with http:// or https://".to_string(),
            ));
        }
        if self.api.timeout_secs < 5 {
            return Err(ConfigError::Validation(
                "API timeout must be at least 5 seconds".to_string(),
            ));
        }
        if self.api.timeout_secs > 300 {
            return Err(ConfigError::Validation(
                "API timeout cannot exceed 300 seconds".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_maximized: false,
            notice_secs: default_notice_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_scheme() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://portal".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let mut config = AppConfig::default();

        config.api.timeout_secs = 2;
        assert!(config.validate().is_err());

        config.api.timeout_secs = 301;
        assert!(config.validate().is_err());

        config.api.timeout_secs = 30;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.api.base_url, config.api.base_url);
        assert_eq!(back.ui.notice_secs, config.ui.notice_secs);
    }
}
