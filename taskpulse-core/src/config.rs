//! Configuration loading and management
//!
//! The tracker is configured programmatically with a [`TrackerConfig`], or
//! from a TOML file via [`TrackerConfig::load_from`]. There is no
//! environment-variable configuration.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Tracking client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TrackerConfig {
    /// Enable/disable event delivery
    ///
    /// When false, tracking calls build no envelope and make no network call.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Base URL of the collection endpoint (e.g., `https://app.example.com`)
    pub endpoint_url: Option<String>,

    /// Path the events POST is sent to, relative to `endpoint_url`
    #[serde(default = "default_events_path")]
    pub events_path: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint_url: None,
            events_path: default_events_path(),
            timeout_secs: default_timeout(),
        }
    }
}

impl TrackerConfig {
    /// Create a config pointing at the given collection endpoint
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(endpoint_url.into()),
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: TrackerConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Validate configuration, returning an error message if invalid
    ///
    /// A disabled config is always valid; the tracker then skips delivery.
    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.endpoint_url.is_none() {
            return Err(Error::Config("endpoint_url is required".to_string()));
        }
        if !self.events_path.starts_with('/') {
            return Err(Error::Config(
                "events_path must start with '/'".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_enabled() -> bool {
    true
}

fn default_events_path() -> String {
    "/api/analytics/events".to_string()
}

fn default_timeout() -> u64 {
    10
}
