//! DatabaseDuel upload loaders
//!
//! The boundary between user uploads and the in-memory [`Dataset`]
//! consumed by the dashboard.
//!
//! # Architecture
//!
//! ```text
//! UploadedFile → extension dispatch → TableLoader → Dataset
//!                        ↑_____________↓
//!                 DatasetCache (content-addressed)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use duel_loader::{DatasetLoader, UploadedFile};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = DatasetLoader::new();
//! let loaded = loader.load(&UploadedFile::from_path("data.csv")).await?;
//! println!("{} rows", loaded.dataset.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! [`Dataset`]: duel_model::Dataset

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod cache;
pub mod error;
pub mod file;
pub mod hash;
pub mod loader;
pub mod loaders;

// Re-exports for convenience
pub use cache::{CacheKey, DatasetCache};
pub use error::{LoadError, LoadResult};
pub use file::{FileType, UploadSource, UploadedFile};
pub use hash::ContentKey;
pub use loader::{DatasetLoader, LoadedDataset, DEFAULT_MAX_UPLOAD_BYTES};
pub use loaders::{default_loaders, LoaderRegistry, TableLoader};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for loading uploads
    pub use crate::error::{LoadError, LoadResult};
    pub use crate::file::{FileType, UploadedFile};
    pub use crate::loader::{DatasetLoader, LoadedDataset};
    pub use crate::loaders::{CsvLoader, JsonLoader, LoaderRegistry, TableLoader};
    pub use duel_model::{Column, Dataset, Scalar};
}
