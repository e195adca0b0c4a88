//! Error types for the dashboard core
//!
//! Provides error handling for:
//! - Backend registration (empty or duplicate names)
//! - Upload loading failures
//! - Configuration loading and validation
//! - Connections table edits
//!
//! Nothing here is fatal to a session.

use duel_loader::LoadError;
use duel_model::ModelError;
use std::path::PathBuf;

/// Main dashboard error type
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Backend name was empty after trimming
    #[error("backend name is empty")]
    EmptyName,

    /// Backend registry rejected the change
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Upload could not be turned into a dataset
    #[error("upload failed: {0}")]
    Load(#[from] LoadError),

    /// Configuration invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Model invariant violated
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Connections table edit rejected
    #[error("table edit rejected: {0}")]
    TableEdit(#[from] TableEditError),
}

impl DashboardError {
    /// Check if error is a user input validation warning
    #[inline]
    #[must_use]
    pub fn is_validation_warning(&self) -> bool {
        matches!(
            self,
            Self::EmptyName | Self::Registry(RegistryError::AlreadyExists { .. })
        )
    }
}

/// Backend registry errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Name already registered (case-sensitive match)
    #[error("backend already exists: '{name}'")]
    AlreadyExists {
        /// Name already registered
        name: String,
    },
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file extension is not toml, yaml or yml
    #[error("unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    /// TOML syntax or schema error
    #[error("invalid toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML syntax or schema error
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config could not be rendered as TOML
    #[error("cannot render config: {0}")]
    Render(#[from] toml::ser::Error),

    /// Seed backend with an empty name
    #[error("seed backend {index} has an empty name")]
    EmptySeedName {
        /// Position in the seed list
        index: usize,
    },

    /// Two seed backends share a name
    #[error("duplicate seed backend: '{0}'")]
    DuplicateSeed(String),

    /// Latency is negative or not finite
    #[error("invalid latency for {field}: {value}")]
    InvalidLatency {
        /// Config key
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Size limit of zero
    #[error("max_upload_bytes must be greater than zero")]
    ZeroUploadLimit,
}

/// Connections table edit errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableEditError {
    /// The identity column cannot be edited
    #[error("column '{0}' is the row identity and cannot be edited")]
    IdentityColumn(String),

    /// No such column
    #[error("unknown column: '{0}'")]
    UnknownColumn(String),

    /// No such row
    #[error("row {row} out of range (rows: {len})")]
    RowOutOfRange {
        /// Requested row
        row: usize,
        /// Rows in the table
        len: usize,
    },

    /// Port edit is not a valid port number
    #[error("invalid port: '{0}'")]
    InvalidPort(String),
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_warnings() {
        assert!(DashboardError::EmptyName.is_validation_warning());
        assert!(DashboardError::from(RegistryError::AlreadyExists {
            name: "DuckDB".into()
        })
        .is_validation_warning());
        assert!(!DashboardError::from(LoadError::unsupported("txt")).is_validation_warning());
    }

    #[test]
    fn messages_are_lowercase() {
        let err = RegistryError::AlreadyExists {
            name: "DuckDB".into(),
        };
        assert_eq!(err.to_string(), "backend already exists: 'DuckDB'");

        let err = TableEditError::RowOutOfRange { row: 4, len: 2 };
        assert_eq!(err.to_string(), "row 4 out of range (rows: 2)");
    }
}
