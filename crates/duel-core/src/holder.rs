//! Uploaded dataset holder
//!
//! Single-slot cell holding the most recent upload, or the empty dataset.

use crate::cell::{Version, Versioned};
use duel_model::Dataset;
use std::sync::Arc;

/// Reactive dataset cell
#[derive(Debug, Clone)]
pub struct DatasetHolder {
    cell: Versioned<Arc<Dataset>>,
}

impl DatasetHolder {
    /// Create holder containing the empty dataset
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: Versioned::new(Arc::new(Dataset::empty())),
        }
    }

    /// Replace the dataset
    pub fn set(&mut self, dataset: Arc<Dataset>) -> Version {
        let version = self.cell.set(dataset);
        tracing::debug!(%version, rows = self.cell.get().row_count(), "dataset replaced");
        version
    }

    /// Replace the dataset with the empty dataset
    pub fn reset(&mut self) -> Version {
        self.set(Arc::new(Dataset::empty()))
    }

    /// Latest dataset
    #[inline]
    #[must_use]
    pub fn current(&self) -> &Arc<Dataset> {
        self.cell.get()
    }

    /// Version of the last replacement
    #[inline]
    #[must_use]
    pub fn version(&self) -> Version {
        self.cell.version()
    }
}

impl Default for DatasetHolder {
    fn default() -> Self {
        Self::new()
    }
}
