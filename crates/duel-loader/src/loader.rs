//! Dataset loader - main entry point
//!
//! The only component that reads upload bytes. Dispatches on the declared
//! extension, enforces the size limit and consults the parse cache.

use crate::cache::{CacheKey, DatasetCache};
use crate::error::{LoadError, LoadResult};
use crate::file::{FileType, UploadedFile};
use crate::hash::ContentKey;
use crate::loaders::{default_loaders, LoaderRegistry};
use duel_model::Dataset;
use std::sync::Arc;

/// Default upload size limit (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Successfully loaded upload
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Parsed table
    pub dataset: Arc<Dataset>,
    /// Format family that parsed it
    pub file_type: FileType,
    /// Declared extension (lowercase)
    pub extension: String,
    /// Checksum of the raw bytes
    pub checksum: ContentKey,
    /// True when served from the parse cache
    pub cached: bool,
}

/// Upload loader
///
/// Clones share the loader registry and the parse cache.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    loaders: Arc<LoaderRegistry>,
    cache: DatasetCache,
    max_upload_bytes: usize,
}

impl DatasetLoader {
    /// Create loader with every compiled-in format
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(default_loaders())
    }

    /// Create loader over a custom registry
    #[must_use]
    pub fn with_registry(loaders: LoaderRegistry) -> Self {
        Self {
            loaders: Arc::new(loaders),
            cache: DatasetCache::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// With parse cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache = DatasetCache::new(capacity);
        self
    }

    /// With upload size limit
    #[inline]
    #[must_use]
    pub fn with_max_upload_bytes(mut self, max: usize) -> Self {
        self.max_upload_bytes = max;
        self
    }

    /// Load an upload into a dataset
    ///
    /// # Errors
    /// - `LoadError::UnsupportedFormat` if no loader handles the extension
    ///   (the bytes are never read)
    /// - `LoadError::Io` if the upload cannot be read
    /// - `LoadError::TooLarge` if the upload exceeds the size limit (disk
    ///   uploads are rejected from their metadata before being read)
    /// - `LoadError::Parse` if the content is malformed
    pub async fn load(&self, file: &UploadedFile) -> LoadResult<LoadedDataset> {
        let extension = file.extension();
        let loader = self
            .loaders
            .find_for_extension(&extension)
            .ok_or_else(|| LoadError::unsupported(extension.clone()))?;
        let file_type = loader.file_type();

        let declared = file.byte_len().await?;
        self.check_size(usize::try_from(declared).unwrap_or(usize::MAX))?;

        let bytes = file.read().await?;
        // The file may have grown since its metadata was read
        self.check_size(bytes.len())?;

        let checksum = ContentKey::compute(&bytes);
        let key = CacheKey::new(checksum, file_type);
        let raw = &bytes;
        let (dataset, cached) = self
            .cache
            .try_get_or_insert_with(key, || async move { loader.load(raw) })
            .await?;

        tracing::debug!(
            file = file.name(),
            %file_type,
            checksum = %checksum.short(),
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            cached,
            "upload loaded"
        );

        Ok(LoadedDataset {
            dataset,
            file_type,
            extension,
            checksum,
            cached,
        })
    }

    fn check_size(&self, size: usize) -> LoadResult<()> {
        if size > self.max_upload_bytes {
            return Err(LoadError::TooLarge {
                size,
                max: self.max_upload_bytes,
            });
        }
        Ok(())
    }

    /// Extensions accepted by this loader
    #[must_use]
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.loaders.all_extensions()
    }

    /// Parse cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Upload size limit in bytes
    #[inline]
    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}
