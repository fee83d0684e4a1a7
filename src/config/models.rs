//! Configuration data models

use crate::access::cache::DecisionCacheConfig;
use serde::{Deserialize, Serialize};

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}

/// Access-core configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Decision cache configuration
    #[serde(default)]
    pub cache: DecisionCacheConfig,
}

impl AccessConfig {
    /// Merge access configurations, preferring non-default values from `other`
    pub fn merge(mut self, other: Self) -> Self {
        self.cache = self.cache.merge(other.cache);
        self
    }

    /// Validate the access configuration
    pub fn validate(&self) -> Result<(), String> {
        self.cache.validate()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON-formatted logs
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Validate the logging configuration
    pub fn validate(&self) -> Result<(), String> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(format!("Unknown log level: {}", other)),
        }
    }
}
