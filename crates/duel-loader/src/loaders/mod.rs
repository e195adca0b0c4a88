//! Table loaders for upload formats
//!
//! Provides parsing from raw upload bytes into [`Dataset`]s:
//! - CSV via the `csv` crate
//! - JSON records/columns via `serde_json`
//! - Parquet via `parquet` (feature `parquet`)
//! - Excel/OpenDocument via `calamine` (feature `spreadsheet`)

use crate::error::LoadResult;
use crate::file::FileType;
use duel_model::Dataset;

mod csv;
mod json;
#[cfg(feature = "parquet")]
mod parquet;
#[cfg(feature = "spreadsheet")]
mod spreadsheet;

pub use self::csv::CsvLoader;
pub use self::json::JsonLoader;
#[cfg(feature = "parquet")]
pub use self::parquet::ParquetLoader;
#[cfg(feature = "spreadsheet")]
pub use self::spreadsheet::SpreadsheetLoader;

/// Loader trait for converting upload bytes into datasets
///
/// Implement this trait to add support for new file formats.
pub trait TableLoader: Send + Sync + 'static {
    /// Format family produced by this loader
    fn file_type(&self) -> FileType;

    /// Supported declared extensions (lowercase, without dot)
    fn extensions(&self) -> &[&str];

    /// Parse upload bytes
    ///
    /// # Errors
    /// Returns [`LoadError::Parse`](crate::LoadError::Parse) for malformed content
    fn load(&self, bytes: &[u8]) -> LoadResult<Dataset>;

    /// Check if this loader handles the given extension
    fn can_load(&self, extension: &str) -> bool {
        self.extensions().contains(&extension)
    }
}

/// Loader registration for extension dispatch
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn TableLoader>>,
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("loader_count", &self.loaders.len())
            .field("extensions", &self.all_extensions())
            .finish()
    }
}

impl LoaderRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    /// Register a loader
    ///
    /// Earlier registrations win when extensions overlap.
    pub fn register<L: TableLoader>(&mut self, loader: L) {
        self.loaders.push(Box::new(loader));
    }

    /// Find loader for a lowercase extension
    #[must_use]
    pub fn find_for_extension(&self, extension: &str) -> Option<&dyn TableLoader> {
        self.loaders
            .iter()
            .find(|l| l.can_load(extension))
            .map(|l| &**l)
    }

    /// Get all registered extensions
    #[must_use]
    pub fn all_extensions(&self) -> Vec<&str> {
        self.loaders
            .iter()
            .flat_map(|l| l.extensions())
            .copied()
            .collect()
    }

    /// Number of registered loaders
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

/// Create default loader registry with every compiled-in format
#[must_use]
pub fn default_loaders() -> LoaderRegistry {
    let mut registry = LoaderRegistry::new();

    registry.register(CsvLoader::new());
    registry.register(JsonLoader::new());

    #[cfg(feature = "parquet")]
    registry.register(ParquetLoader::new());

    #[cfg(feature = "spreadsheet")]
    registry.register(SpreadsheetLoader::new());

    registry
}
