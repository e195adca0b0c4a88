//! Content-addressed dataset cache using moka
//!
//! Re-uploading identical bytes skips parsing. Keys include the format so
//! the same bytes declared as different types never alias.

use crate::file::FileType;
use crate::hash::ContentKey;
use duel_model::Dataset;
use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;

/// Cache key: upload checksum plus the format it was parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Checksum of raw upload bytes
    pub checksum: ContentKey,
    /// Format used to parse them
    pub file_type: FileType,
}

impl CacheKey {
    /// Create key
    #[inline]
    #[must_use]
    pub fn new(checksum: ContentKey, file_type: FileType) -> Self {
        Self {
            checksum,
            file_type,
        }
    }
}

/// Parsed dataset cache
///
/// Clones share the same underlying cache.
#[derive(Debug, Clone)]
pub struct DatasetCache {
    inner: Cache<CacheKey, Arc<Dataset>>,
}

impl DatasetCache {
    /// Create new cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Insert dataset into cache
    #[inline]
    pub async fn insert(&self, key: CacheKey, dataset: Arc<Dataset>) {
        self.inner.insert(key, dataset).await;
    }

    /// Get dataset from cache
    #[inline]
    #[must_use]
    pub async fn get(&self, key: &CacheKey) -> Option<Arc<Dataset>> {
        self.inner.get(key).await
    }

    /// Try to get or compute dataset
    ///
    /// Returns the dataset and whether it came from the cache.
    pub async fn try_get_or_insert_with<E, F, Fut>(
        &self,
        key: CacheKey,
        f: F,
    ) -> Result<(Arc<Dataset>, bool), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Dataset, E>>,
    {
        if let Some(cached) = self.get(&key).await {
            return Ok((cached, true));
        }

        let dataset = Arc::new(f().await?);
        self.insert(key, Arc::clone(&dataset)).await;

        Ok((dataset, false))
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get approximate entry count
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for DatasetCache {
    /// Create cache with default capacity (64 datasets)
    fn default() -> Self {
        Self::new(64)
    }
}
