//! Configuration management utilities

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding the application name
pub const APP_NAME_VAR: &str = "AGENT_APP_NAME";
/// Environment variable overriding the environment label
pub const ENVIRONMENT_VAR: &str = "AGENT_ENV";
/// Environment variable selecting the log format (`text` or `json`)
pub const LOG_FORMAT_VAR: &str = "AGENT_LOG_FORMAT";

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A value could not be parsed
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Configuration key
        key: String,
        /// Offending value
        value: String,
    },
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                key: LOG_FORMAT_VAR.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name, used as the session app name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "agent-rs".to_string(),
            environment: "development".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(value) => value.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            app_name: lookup(APP_NAME_VAR).unwrap_or(defaults.app_name),
            environment: lookup(ENVIRONMENT_VAR).unwrap_or(defaults.environment),
            log_format,
        })
    }

    /// Override the application name
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }
}
