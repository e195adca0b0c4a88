//! Error types for upload loading
//!
//! Every failure here is recoverable: the caller reports it to the user
//! and the session keeps running.

use crate::file::FileType;
use duel_model::ModelError;
use std::path::PathBuf;

/// Errors while turning an upload into a dataset
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No loader registered for the declared extension
    #[error("unsupported file type: '{extension}'")]
    UnsupportedFormat {
        /// Declared extension, lowercased
        extension: String,
    },

    /// Content of a supported type is malformed
    #[error("{file_type} parse error: {message}")]
    Parse {
        /// Format family that failed
        file_type: FileType,
        /// Parser message
        message: String,
    },

    /// IO error during upload read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Upload path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Upload exceeds the configured size limit
    #[error("file too large: {size} bytes (max: {max})")]
    TooLarge {
        /// Upload size in bytes
        size: usize,
        /// Configured limit
        max: usize,
    },
}

impl LoadError {
    /// Create unsupported format error
    pub fn unsupported(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Create parse error for a file type
    pub fn parse(file_type: FileType, message: impl ToString) -> Self {
        Self::Parse {
            file_type,
            message: message.to_string(),
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a model invariant violation as a parse error
    pub fn invalid_shape(file_type: FileType, source: &ModelError) -> Self {
        Self::parse(file_type, source)
    }

    /// Check if the extension was rejected before reading
    #[inline]
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }
}

/// Result type alias for load operations
pub type LoadResult<T> = Result<T, LoadError>;
