//! Configuration management
//!
//! Configuration is read from a YAML file, then selected values are
//! overridden from `WIKI_ENRICH_*` environment variables and validated.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{EnrichError, Result};
use std::path::Path;
use tracing::debug;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/enrich.yaml";

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub enrich: EnrichConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| EnrichError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let enrich: EnrichConfig = serde_yaml::from_str(content)
            .map_err(|e| EnrichError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { enrich };
        config.validate()?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self> {
        let config = Self::default().with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `WIKI_ENRICH_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = &mut self.enrich.summary_api;
        if let Some(endpoint) = lookup("WIKI_ENRICH_ENDPOINT") {
            api.endpoint = endpoint;
        }
        if let Some(user_agent) = lookup("WIKI_ENRICH_USER_AGENT") {
            api.user_agent = user_agent;
        }
        if let Some(timeout) = lookup("WIKI_ENRICH_TIMEOUT_SECS") {
            api.timeout_secs = Some(timeout.parse().map_err(|e| {
                EnrichError::Config(format!("Invalid WIKI_ENRICH_TIMEOUT_SECS: {}", e))
            })?);
        }

        let table = &mut self.enrich.table;
        if let Some(base_path) = lookup("WIKI_ENRICH_BASE") {
            table.base_path = base_path;
        }
        if let Some(name) = lookup("WIKI_ENRICH_TABLE") {
            table.name = name;
        }

        if let Some(delay) = lookup("WIKI_ENRICH_REQUEST_DELAY_MS") {
            self.enrich.throttle.request_delay_ms = delay.parse().map_err(|e| {
                EnrichError::Config(format!("Invalid WIKI_ENRICH_REQUEST_DELAY_MS: {}", e))
            })?;
        }

        Ok(self)
    }

    pub fn summary_api(&self) -> &SummaryApiConfig {
        &self.enrich.summary_api
    }

    pub fn table(&self) -> &TableConfig {
        &self.enrich.table
    }

    pub fn table_mut(&mut self) -> &mut TableConfig {
        &mut self.enrich.table
    }

    pub fn throttle(&self) -> &ThrottleConfig {
        &self.enrich.throttle
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.enrich.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.enrich.validate().map_err(EnrichError::Config)
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.enrich)?)
    }
}
