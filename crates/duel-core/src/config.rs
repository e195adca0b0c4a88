//! Dashboard configuration
//!
//! [`DashboardConfig::default`] reproduces the stock dashboard: the two seed
//! backends, both selected, DuckDB as the default kind and the standard
//! simulated latencies. Files may be TOML or YAML.

use crate::error::ConfigError;
use crate::registry::default_seed;
use crate::simulator::SimulatorConfig;
use duel_loader::DEFAULT_MAX_UPLOAD_BYTES;
use duel_model::{BackendConfig, BackendKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// What happens to the current dataset when an upload fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadFailurePolicy {
    /// Replace with the empty dataset
    #[default]
    Reset,
    /// Keep the previous dataset
    Retain,
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Kind given to backends added by name only
    pub default_kind: BackendKind,
    /// Names selected when a session starts
    pub default_selection: Vec<String>,
    /// Dataset policy on upload failure
    pub upload_failure: UploadFailurePolicy,
    /// Upload size limit in bytes
    pub max_upload_bytes: usize,
    /// Parsed datasets kept for re-uploads
    pub parse_cache_capacity: u64,
    /// Latency simulation
    pub simulator: SimulatorConfig,
    /// Backends every session starts with
    pub seed: Vec<BackendConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_kind: BackendKind::DuckDb,
            default_selection: vec!["DuckDB".to_string(), "Postgres".to_string()],
            upload_failure: UploadFailurePolicy::Reset,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            parse_cache_capacity: 64,
            simulator: SimulatorConfig::default(),
            seed: default_seed().to_vec(),
        }
    }
}

impl DashboardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file and validate
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read, parsed or validated
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match extension.as_str() {
            "toml" => Self::from_toml(&text)?,
            "yaml" | "yml" => Self::from_yaml(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(extension)),
        };

        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse TOML and validate
    ///
    /// # Errors
    /// Returns [`ConfigError`] on syntax or validation failure
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML and validate
    ///
    /// # Errors
    /// Returns [`ConfigError`] on syntax or validation failure
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML (passwords masked)
    ///
    /// # Errors
    /// Returns [`ConfigError::Render`] if serialization fails
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check invariants
    ///
    /// # Errors
    /// - [`ConfigError::EmptySeedName`] for a blank seed name
    /// - [`ConfigError::DuplicateSeed`] for a repeated seed name
    /// - [`ConfigError::InvalidLatency`] for a negative or non-finite latency
    /// - [`ConfigError::ZeroUploadLimit`] if `max_upload_bytes` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (index, backend) in self.seed.iter().enumerate() {
            if backend.name.trim().is_empty() {
                return Err(ConfigError::EmptySeedName { index });
            }
            if !seen.insert(backend.name.as_str()) {
                return Err(ConfigError::DuplicateSeed(backend.name.clone()));
            }
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::ZeroUploadLimit);
        }
        self.simulator.validate()
    }

    /// With default kind for added backends
    #[inline]
    #[must_use]
    pub fn with_default_kind(mut self, kind: BackendKind) -> Self {
        self.default_kind = kind;
        self
    }

    /// With initial selection
    #[must_use]
    pub fn with_default_selection<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_selection = names.into_iter().map(Into::into).collect();
        self
    }

    /// With upload failure policy
    #[inline]
    #[must_use]
    pub fn with_upload_failure(mut self, policy: UploadFailurePolicy) -> Self {
        self.upload_failure = policy;
        self
    }

    /// With upload size limit
    #[inline]
    #[must_use]
    pub fn with_max_upload_bytes(mut self, max: usize) -> Self {
        self.max_upload_bytes = max;
        self
    }

    /// With simulator configuration
    #[inline]
    #[must_use]
    pub fn with_simulator(mut self, simulator: SimulatorConfig) -> Self {
        self.simulator = simulator;
        self
    }

    /// With seed backends
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: Vec<BackendConfig>) -> Self {
        self.seed = seed;
        self
    }
}
