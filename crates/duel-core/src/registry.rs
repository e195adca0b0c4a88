//! Backend registry
//!
//! Provides [`BackendRegistry`], the per-session ordered collection of named
//! backend configurations, and [`default_seed`], the process-wide immutable
//! set every session starts from.

use crate::cell::Version;
use crate::error::RegistryError;
use duel_model::{BackendConfig, BackendKind};
use indexmap::IndexMap;
use once_cell::sync::Lazy;

static DEFAULT_SEED: Lazy<Vec<BackendConfig>> = Lazy::new(|| {
    vec![
        BackendConfig::new("DuckDB", BackendKind::DuckDb),
        BackendConfig::new("Postgres", BackendKind::Postgres).with_host("localhost", 5432),
    ]
});

/// Built-in seed backends
///
/// `DuckDB` (no connection attributes) and `Postgres` on `localhost:5432`.
#[inline]
#[must_use]
pub fn default_seed() -> &'static [BackendConfig] {
    &DEFAULT_SEED
}

/// Ordered registry of backend configurations
///
/// # Invariants
/// - Names are unique (case-sensitive)
/// - Entries are never removed or renamed
/// - `version` increases on every successful insertion
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    backends: IndexMap<String, BackendConfig>,
    version: Version,
}

impl BackendRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            backends: IndexMap::new(),
            version: Version::INITIAL,
        }
    }

    /// Create registry copied from a seed
    ///
    /// Later seed entries with an already seen name are ignored.
    #[must_use]
    pub fn seeded(seed: &[BackendConfig]) -> Self {
        let mut registry = Self::new();
        for config in seed {
            if registry.insert(config.clone()).is_err() {
                tracing::warn!(backend = %config.name, "duplicate seed backend ignored");
            }
        }
        // Seeding is construction, not a change
        registry.version = Version::INITIAL;
        registry
    }

    /// Register a name with the given kind and no connection attributes
    ///
    /// # Errors
    /// Returns [`RegistryError::AlreadyExists`] if the name is taken
    pub fn add(&mut self, name: &str, kind: BackendKind) -> Result<(), RegistryError> {
        self.insert(BackendConfig::new(name, kind))
    }

    /// Register a full configuration
    ///
    /// # Errors
    /// Returns [`RegistryError::AlreadyExists`] if the name is taken
    pub fn insert(&mut self, config: BackendConfig) -> Result<(), RegistryError> {
        if self.backends.contains_key(&config.name) {
            return Err(RegistryError::AlreadyExists { name: config.name });
        }
        tracing::debug!(backend = %config.name, kind = %config.kind, "backend registered");
        self.backends.insert(config.name.clone(), config);
        self.version = self.version.next();
        Ok(())
    }

    /// Look up a backend by exact name
    #[inline]
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&BackendConfig> {
        self.backends.get(name)
    }

    /// Check if name is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// Snapshot of all configurations in registration order
    #[must_use]
    pub fn list(&self) -> Vec<BackendConfig> {
        self.backends.values().cloned().collect()
    }

    /// Iterate configurations in registration order
    pub fn iter(&self) -> impl Iterator<Item = &BackendConfig> {
        self.backends.values()
    }

    /// Names in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.backends.keys().map(String::as_str).collect()
    }

    /// Version of the last successful insertion
    #[inline]
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Number of registered backends
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
