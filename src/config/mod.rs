//! Configuration management
//!
//! Configuration is loaded from YAML with serde defaults for every
//! field, so an empty file (or no file at all) yields a usable default
//! configuration.

pub mod models;

pub use models::{AccessConfig, LoggingConfig};

use crate::utils::error::{AccessError, Result};
use std::path::Path;
use tracing::info;

/// Root configuration for the access core
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Access-core configuration
    #[serde(default)]
    pub access: AccessConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());

        let contents = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<()> {
        self.access.validate().map_err(AccessError::config)?;
        self.logging.validate().map_err(AccessError::config)?;
        Ok(())
    }
}
