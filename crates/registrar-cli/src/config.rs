//! Configuration for the registrar console.
//!
//! Precedence (highest to lowest):
//! 1. Command-line flags (`--api-url`)
//! 2. Environment variables (`REGISTRAR_API_URL`, `REGISTRAR_LOG_LEVEL`)
//! 3. The YAML config file
//! 4. Default values

use std::path::{Path, PathBuf};

use registrar_adapter_http::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Effective console configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the registrar service lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when neither `-v` nor `RUST_LOG` is given.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Default location: `<config_dir>/registrar/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("registrar").join("config.yaml"))
    }

    /// Parse a YAML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;

        serde_yaml_ng::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load the file (an explicit `path` must exist; the default location
    /// may be missing), apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(path)?,
                _ => Config::default(),
            },
        };

        let config = config.merge_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `REGISTRAR_*` overrides read through `lookup`.
    pub fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("REGISTRAR_API_URL") {
            self.api.base_url = url;
        }
        if let Some(level) = lookup("REGISTRAR_LOG_LEVEL") {
            self.logging.level = level;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must start with http:// or https://, got '{url}'"
            )));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => {}
            other => {
                return Err(ConfigError::Invalid(format!("Invalid log level: {other}")));
            }
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Invalid(String),
}
