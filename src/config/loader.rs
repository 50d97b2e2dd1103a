use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{ContainerConfig, MAX_EFFECT_BUFFER};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl ContainerConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/mvi-container/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("mvi-container").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns `ContainerConfig::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(ContainerConfig::default());
        }
        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ContainerConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ContainerConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError {
                path: PathBuf::from("<inline>"),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The effect buffer holds at least one and at most
    ///   [`MAX_EFFECT_BUFFER`] effects
    /// - The name is not blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.effect_buffer == 0 {
            return Err(ConfigError::ValidationError {
                message: "effect_buffer must be at least 1".to_string(),
            });
        }

        if self.effect_buffer > MAX_EFFECT_BUFFER {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "effect_buffer must be at most {}, got {}",
                    MAX_EFFECT_BUFFER, self.effect_buffer
                ),
            });
        }

        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "name must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
