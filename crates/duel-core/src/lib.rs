//! DatabaseDuel core
//!
//! Reactive computation behind the dashboard: mutable stores, a memoizing
//! metrics aggregator and read-only projections.
//!
//! # Data Flow
//!
//! ```text
//! on_add_backend ─→ BackendRegistry ─┐
//! select ─────────→ Selection ───────┼─→ MetricsAggregator ─→ PerformanceCollection
//! on_upload ──────→ DatasetHolder ───┘     (version-stamped)        │
//!                                                                    ├─→ Summary
//!                                                                    ├─→ ChartSpec
//!                                                                    └─→ PerformanceRow
//! BackendRegistry ─→ ConnectionsTable (editable view)
//! ```
//!
//! # Example
//!
//! ```rust
//! use duel_core::prelude::*;
//!
//! let mut session = DashboardSession::new(DashboardConfig::default()).unwrap();
//! session.on_add_backend("Warehouse");
//! session.select(["DuckDB", "Postgres", "Warehouse"]);
//!
//! let perf = session.performance();
//! assert_eq!(perf.len(), 3);
//! assert_eq!(session.summary().total_queries, 6);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod aggregator;
pub mod cell;
pub mod config;
pub mod error;
pub mod holder;
pub mod notification;
pub mod projection;
pub mod registry;
pub mod selection;
pub mod session;
pub mod simulator;
pub mod table;

// Re-exports for convenience
pub use aggregator::{AggregatorStats, MetricsAggregator};
pub use cell::{Memo, Version, Versioned};
pub use config::{DashboardConfig, UploadFailurePolicy};
pub use error::{ConfigError, DashboardError, DashboardResult, RegistryError, TableEditError};
pub use holder::DatasetHolder;
pub use notification::{Notification, NotificationLog, Severity};
pub use projection::{ChartRow, ChartSpec, PerformanceDifference, PerformanceRow, Summary, SummaryText};
pub use registry::{default_seed, BackendRegistry};
pub use selection::Selection;
pub use session::{DashboardSession, DashboardSnapshot, SessionId};
pub use simulator::{
    FixedLatencySimulator, LatencyProfile, SimulatorConfig, SleepingSimulator, TimingSimulator,
};
pub use table::{ConnectionRow, ConnectionsTable};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a dashboard session
    pub use crate::config::DashboardConfig;
    pub use crate::error::{DashboardError, DashboardResult};
    pub use crate::notification::{Notification, Severity};
    pub use crate::projection::{PerformanceDifference, Summary};
    pub use crate::session::DashboardSession;
    pub use crate::simulator::{FixedLatencySimulator, TimingSimulator};
    pub use duel_loader::UploadedFile;
    pub use duel_model::{BackendConfig, BackendKind, Dataset, PerformanceCollection};
}
