//! Error types for the data model
//!
//! Raised when a value would violate a model invariant:
//! - Ragged datasets (columns of unequal length)
//! - Unknown backend kinds
//! - Negative timings in performance records

/// Errors raised while constructing model values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Columns disagree on row count
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumn {
        /// Offending column
        column: String,
        /// Row count of the first column
        expected: usize,
        /// Row count found
        actual: usize,
    },

    /// Row disagrees with the header width
    #[error("row {row} has {actual} fields, expected {expected}")]
    RaggedRow {
        /// Zero-based row index
        row: usize,
        /// Header width
        expected: usize,
        /// Fields found
        actual: usize,
    },

    /// Backend kind string not in the closed set
    #[error("unknown backend kind: '{0}'")]
    UnknownKind(String),

    /// Timing field is negative or not a number
    #[error("invalid timing for {field}: {value}")]
    InvalidTiming {
        /// Record field name
        field: &'static str,
        /// Rejected value
        value: f64,
    },
}

impl ModelError {
    /// Create ragged column error
    pub fn ragged(column: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::RaggedColumn {
            column: column.into(),
            expected,
            actual,
        }
    }
}

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;
