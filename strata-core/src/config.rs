//! Configuration management

use crate::error::{StrataError, StrataResult};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for the Strata client
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StrataConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Remote API endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Strata backend
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_seconds: 30,
            user_agent: "strata/0.1.0".to_string(),
        }
    }
}

/// Local storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the credential store
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("strata");

        Self { data_dir }
    }
}

impl StrataConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> StrataResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            let message = format!("Failed to read config file: {}", e);
            StrataError::config(message, Some(Box::new(e)), "config")
        })?;

        let config: StrataConfig = toml::from_str(&content).map_err(|e| {
            let message = format!("Failed to parse config: {}", e);
            StrataError::config(message, Some(Box::new(e)), "config")
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> StrataResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            let message = format!("Failed to serialize config: {}", e);
            StrataError::config(message, Some(Box::new(e)), "config")
        })?;

        std::fs::write(path, content).map_err(|e| {
            let message = format!("Failed to write config file: {}", e);
            StrataError::config(message, Some(Box::new(e)), "config")
        })?;

        Ok(())
    }

    /// Apply environment overrides (STRATA_API_URL, STRATA_DATA_DIR)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("STRATA_API_URL") {
            self.api.base_url = base_url;
        }
        if let Ok(data_dir) = std::env::var("STRATA_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> StrataResult<()> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            let message = format!("Invalid API base URL '{}': {}", self.api.base_url, e);
            StrataError::config(message, Some(Box::new(e)), "config")
        })?;

        if self.api.timeout_seconds == 0 {
            return Err(StrataError::validation(
                "API timeout must be greater than zero",
                Some("api.timeout_seconds"),
                "config",
            ));
        }

        Ok(())
    }
}
