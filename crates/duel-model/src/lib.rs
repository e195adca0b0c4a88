//! DatabaseDuel data model
//!
//! Plain values shared by every layer of the dashboard.
//!
//! # Core Concepts
//!
//! - [`BackendConfig`]: Named target system with a [`BackendKind`]
//! - [`Dataset`]: Rectangular table of [`Column`]s holding [`Scalar`]s
//! - [`PerformanceRecord`]: Simulated timings for one backend
//! - [`PerformanceCollection`]: Shared output of one aggregation pass
//!
//! # Example
//!
//! ```rust
//! use duel_model::{BackendConfig, BackendKind, Dataset};
//!
//! let backend = BackendConfig::new("Warehouse", BackendKind::Postgres)
//!     .with_host("localhost", 5432);
//! assert_eq!(backend.kind.to_string(), "Postgres");
//!
//! let data = Dataset::synthetic(3);
//! assert_eq!(data.row_count(), 3);
//! ```

#![warn(unreachable_pub)]

// Core modules
mod backend;
mod dataset;
mod error;
mod performance;

// Re-exports
pub use backend::{BackendConfig, BackendKind, Secret};
pub use dataset::{Column, Dataset, Scalar};
pub use error::{ModelError, ModelResult};
pub use performance::{PerformanceCollection, PerformanceRecord};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
