//! Configuration management for recordbook
//!
//! Environment-based configuration with defaults, TOML files and validation.

use crate::core_store::store::{AccessPolicy, CreatorLookup, RecordStoreConfig, SearchScope};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

mod error;

pub use error::ConfigError;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store configuration
    pub store: RecordStoreConfig,

    /// Access policy
    pub access: AccessPolicy,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON formatting
    pub json_format: bool,

    /// Include timestamps
    pub with_timestamp: bool,

    /// Include target module
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_timestamp: true,
            with_target: true,
        }
    }
}

fn parse_env<T>(key: &str, what: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue(format!("Invalid {}: {}", what, e))),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern: RECORDBOOK_<SECTION>_<KEY>
    /// Example: RECORDBOOK_STORE_DATA_DIR=/var/lib/recordbook
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay any RECORDBOOK_* environment variables onto this config
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        // Store config
        if let Ok(data_dir) = env::var("RECORDBOOK_STORE_DATA_DIR") {
            self.store.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(file) = env::var("RECORDBOOK_STORE_SNAPSHOT_FILE") {
            self.store.snapshot_file = file;
        }
        if let Some(bytes) = parse_env("RECORDBOOK_STORE_MAX_KEY_BYTES", "max key bytes")? {
            self.store.max_key_bytes = bytes;
        }
        if let Some(bytes) = parse_env("RECORDBOOK_STORE_MAX_VALUE_BYTES", "max value bytes")? {
            self.store.max_value_bytes = bytes;
        }
        if let Some(len) = parse_env("RECORDBOOK_STORE_ID_LENGTH", "id length")? {
            self.store.id_length = len;
        }
        if let Some(attempts) = parse_env("RECORDBOOK_STORE_MAX_ID_ATTEMPTS", "max id attempts")? {
            self.store.max_id_attempts = attempts;
        }

        // Access policy
        if let Ok(lookup) = env::var("RECORDBOOK_ACCESS_CREATOR_LOOKUP") {
            self.access.creator_lookup = match lookup.as_str() {
                "public" => CreatorLookup::Public,
                "owner_only" => CreatorLookup::OwnerOnly,
                other => {
                    return Err(ConfigError::InvalidValue(format!(
                        "Invalid creator lookup: {}",
                        other
                    )))
                }
            };
        }
        if let Ok(scope) = env::var("RECORDBOOK_ACCESS_SEARCH_SCOPE") {
            self.access.search_scope = match scope.as_str() {
                "all" => SearchScope::All,
                "owned" => SearchScope::Owned,
                other => {
                    return Err(ConfigError::InvalidValue(format!(
                        "Invalid search scope: {}",
                        other
                    )))
                }
            };
        }

        // Logging config
        if let Ok(level) = env::var("RECORDBOOK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = parse_env("RECORDBOOK_LOG_JSON", "JSON flag")? {
            self.logging.json_format = json;
        }

        Ok(())
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError(e.to_string()))?;

        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.max_key_bytes == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_key_bytes must be greater than 0".to_string(),
            ));
        }

        if self.store.max_value_bytes == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_value_bytes must be greater than 0".to_string(),
            ));
        }

        if self.store.id_length == 0 {
            return Err(ConfigError::ValidationFailed(
                "id_length must be greater than 0".to_string(),
            ));
        }

        // Generated ids are ASCII, one byte per character
        if self.store.id_length > self.store.max_key_bytes {
            return Err(ConfigError::ValidationFailed(format!(
                "id_length {} does not fit max_key_bytes {}",
                self.store.id_length, self.store.max_key_bytes
            )));
        }

        if self.store.max_id_attempts == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_id_attempts must be greater than 0".to_string(),
            ));
        }

        if self.store.snapshot_file.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "snapshot_file must not be empty".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, contents).map_err(|e| ConfigError::FileWriteError(e.to_string()))?;

        Ok(())
    }
}
