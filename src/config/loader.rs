//! Configuration loading utilities
//!
//! Provides helper functions for loading configuration from various sources
//! with proper error handling and validation.

use crate::{Error, Result, config::Settings};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "ROBOT_E2E_CONFIG";

/// Configuration loader with multiple source support
#[derive(Debug)]
pub struct ConfigLoader {
    /// Default settings
    defaults: Settings,
}

impl ConfigLoader {
    /// Create new configuration loader
    pub fn new() -> Self {
        Self {
            defaults: Settings::default(),
        }
    }

    /// Get the config file path from ROBOT_E2E_CONFIG or the default location
    ///
    /// Priority:
    /// 1. ROBOT_E2E_CONFIG environment variable
    /// 2. ~/.config/robot-e2e/config.toml (or platform equivalent)
    ///
    /// A ROBOT_E2E_CONFIG path that does not exist is an error. A missing
    /// default file just means there is no file.
    pub fn get_config_path() -> Result<Option<PathBuf>> {
        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(config_path);
            if !path.exists() {
                return Err(Error::config(
                    CONFIG_ENV_VAR,
                    format!("Config file not found: {}", path.display()),
                ));
            }
            debug!("Using config file from {}: {:?}", CONFIG_ENV_VAR, path);
            return Ok(Some(path));
        }

        if let Some(config_dir) = dirs::config_dir() {
            let default_path = config_dir.join("robot-e2e").join("config.toml");
            if default_path.exists() {
                debug!("Using default config file: {:?}", default_path);
                return Ok(Some(default_path));
            }
        }

        debug!("No config file found");
        Ok(None)
    }

    /// Load configuration with precedence order:
    /// 1. Environment variables
    /// 2. Configuration file
    /// 3. Default values (lowest priority)
    ///
    /// Command line overrides are applied by the caller before validation,
    /// see [`ConfigLoader::load_unvalidated`].
    pub fn load(&self, config_file: Option<&Path>) -> Result<Settings> {
        let settings = self.load_unvalidated(config_file)?;
        settings.validate()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:?}", settings);

        Ok(settings)
    }

    /// Same as [`ConfigLoader::load`] without the final validation.
    ///
    /// `config_file` is a path the user asked for, so it must exist.
    pub fn load_unvalidated(&self, config_file: Option<&Path>) -> Result<Settings> {
        let mut settings = self.defaults.clone();

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(Error::config(
                    "file",
                    format!("Config file not found: {}", path.display()),
                ));
            }
            info!("Loading configuration from file: {:?}", path);
            settings = Settings::from_file(path)?;
        }

        debug!("Applying environment variable overrides");
        settings.merge_with_env()
    }

    /// Load configuration from environment only
    pub fn from_env_only(&self) -> Result<Settings> {
        let settings = Settings::from_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Get default configuration
    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
