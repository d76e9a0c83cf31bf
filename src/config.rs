//! ==============================================================================
//! config.rs - Dashboard Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `dashboard.toml`.
//!     loads configuration from file or falls back to defaults.
//!
//! structure:
//!     - EndpointConfig: Where the readings come from and how long to wait.
//!     - LoggingConfig: Filter level and the file logs are written to.
//!
//! fixed behaviour (not configurable):
//!     - poll interval, gauge maxima, temperature fallback, redraw durations.
//!       those live as constants next to the code that uses them.
//!
//! ==============================================================================

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DashConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    pub base_url: String,
    pub path: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: PathBuf,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            path: "/api/data".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: PathBuf::from("vitals-dash.log"),
        }
    }
}

impl EndpointConfig {
    /// full url of the readings endpoint
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }
}

impl DashConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        let config: DashConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the first default location that exists, else defaults.
    ///
    /// Logging is not up yet when this runs, so the notes describing where
    /// the config came from are returned for the caller to log later.
    pub fn load_or_default() -> (Self, Vec<String>) {
        let paths = [
            PathBuf::from("config").join("dashboard.toml"),
            PathBuf::from("..").join("config").join("dashboard.toml"),
        ];
        let mut notes = Vec::new();

        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        notes.push(format!("loaded config from {}", path.display()));
                        return (config, notes);
                    }
                    Err(e) => {
                        notes.push(format!("failed to load {}: {:#}", path.display(), e));
                    }
                }
            }
        }

        notes.push("no config file found, using defaults".to_string());
        (Self::default(), notes)
    }

    /// Replace the endpoint base url (the `--url` flag)
    pub fn with_base_url(mut self, base_url: Option<String>) -> Result<Self> {
        if let Some(url) = base_url {
            self.endpoint.base_url = url;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.base_url.trim().is_empty() {
            bail!("endpoint.base_url must not be empty");
        }
        if !self.endpoint.path.starts_with('/') {
            bail!("endpoint.path must start with '/', got {:?}", self.endpoint.path);
        }
        if self.endpoint.timeout_ms == 0 {
            bail!("endpoint.timeout_ms must be greater than zero");
        }
        Ok(())
    }

    /// Log configuration summary
    pub fn log_summary(&self) {
        tracing::info!(
            url = %self.endpoint.url(),
            timeout_ms = self.endpoint.timeout_ms,
            log_level = %self.logging.level,
            "dashboard configuration"
        );
    }
}
