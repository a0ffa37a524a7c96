//! Configuration loading from files.
//!
//! This module handles reading and parsing configuration files.

use std::path::{Path, PathBuf};

use super::{ConfigError, RescueConfig};
use crate::build::{base_path_from_config, resolve_path};

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "rescue.yaml";

impl RescueConfig {
    /// Load the config from the command line argument, defaulting to `rescue.yaml`.
    ///
    /// Returns the config and the directory relative paths resolve against.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        let config = Self::load_from_file(&config_file)?;
        Ok((config, base_path_from_config(&config_file)))
    }

    /// Load the config from a file path.
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;

        let config: RescueConfig = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'site.name' must not be empty\n\nExample:\n  site:\n    name: example.com".to_string(),
            ));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'database.path' must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Replace `site.name` (e.g. from the command line), re-validating.
    pub fn with_site_name(mut self, name: impl Into<String>) -> Result<Self, ConfigError> {
        self.site.name = name.into();
        self.validate()?;
        Ok(self)
    }

    /// Database path resolved against `base_path`.
    pub fn database_path(&self, base_path: &Path) -> PathBuf {
        resolve_path(base_path, &self.database.path)
    }
}
