//! Upload descriptors
//!
//! An [`UploadedFile`] pairs the user-declared file name (which drives
//! format dispatch) with where the bytes actually live.

use crate::error::{LoadError, LoadResult};
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Tabular format families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Comma separated values
    Csv,
    /// JSON records or columns
    Json,
    /// Apache Parquet
    Parquet,
    /// Excel or OpenDocument workbook
    Spreadsheet,
}

impl FileType {
    /// Human label
    #[inline]
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            FileType::Csv => "CSV",
            FileType::Json => "JSON",
            FileType::Parquet => "Parquet",
            FileType::Spreadsheet => "Spreadsheet",
        }
    }
}

impl Display for FileType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where upload bytes come from
#[derive(Debug, Clone)]
pub enum UploadSource {
    /// File on disk (e.g. a transport's temp file)
    Path(PathBuf),
    /// Bytes already in memory
    Bytes(Arc<[u8]>),
}

/// Uploaded file with its declared name
#[derive(Debug, Clone)]
pub struct UploadedFile {
    name: String,
    source: UploadSource,
}

impl UploadedFile {
    /// Upload from a path, declared name = the path's file name
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            source: UploadSource::Path(path),
        }
    }

    /// Upload from a path with an explicit declared name
    #[must_use]
    pub fn with_name(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: UploadSource::Path(path.into()),
        }
    }

    /// Upload from in-memory bytes
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            source: UploadSource::Bytes(bytes.into()),
        }
    }

    /// Declared file name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte source
    #[inline]
    #[must_use]
    pub fn source(&self) -> &UploadSource {
        &self.source
    }

    /// Lowercased text after the last `.` of the declared name
    ///
    /// Empty when the name has no extension.
    #[must_use]
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// Upload size in bytes
    ///
    /// Path-backed uploads are measured from file metadata without reading
    /// their contents.
    ///
    /// # Errors
    /// Returns [`LoadError::Io`] if the backing file cannot be inspected
    pub async fn byte_len(&self) -> LoadResult<u64> {
        match &self.source {
            UploadSource::Bytes(bytes) => Ok(u64::try_from(bytes.len()).unwrap_or(u64::MAX)),
            UploadSource::Path(path) => tokio::fs::metadata(path)
                .await
                .map(|meta| meta.len())
                .map_err(|e| LoadError::io_error(path, e)),
        }
    }

    /// Read the upload's bytes
    ///
    /// # Errors
    /// Returns [`LoadError::Io`] if the backing file cannot be read
    pub async fn read(&self) -> LoadResult<Arc<[u8]>> {
        match &self.source {
            UploadSource::Bytes(bytes) => Ok(Arc::clone(bytes)),
            UploadSource::Path(path) => tokio::fs::read(path)
                .await
                .map(Arc::from)
                .map_err(|e| LoadError::io_error(path, e)),
        }
    }
}
