// init_config.rs
// Handles loading and parsing the splash configuration from splash_config.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::{SplashConfig, TriggerConfig};
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "splash_config.toml";

/// On-disk layout: a `[splash]` table and a `[triggers]` table, both optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SplashConfigFile {
    #[serde(default)]
    pub splash: SplashConfig,
    #[serde(default)]
    pub triggers: TriggerConfig,
}

impl SplashConfigFile {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SplashConfigFile = toml::from_str(content)?;
        config.splash.validate()?;
        config.triggers.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        log::info!("loaded splash configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Reads `splash_config.toml` from the working directory, or falls back
    /// to built-in defaults when the file does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load_from_file(DEFAULT_CONFIG_PATH)
        } else {
            log::debug!("{} not found, using defaults", DEFAULT_CONFIG_PATH);
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
