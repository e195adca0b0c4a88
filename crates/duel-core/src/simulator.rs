//! Timing simulators
//!
//! A [`TimingSimulator`] turns a backend configuration and the current
//! dataset into a [`PerformanceRecord`]. Nothing here talks to a real
//! database: latencies come from a [`LatencyProfile`] picked by the
//! backend's kind.
//!
//! # Implementations
//!
//! - [`FixedLatencySimulator`]: deterministic, reports the configured
//!   latencies directly
//! - [`SleepingSimulator`]: sleeps the configured latencies and reports the
//!   measured wall-clock durations

use crate::error::ConfigError;
use duel_model::{BackendConfig, BackendKind, Dataset, PerformanceRecord};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Queries every simulated run issues, in order
pub const CANONICAL_QUERIES: [&str; 2] = [
    "SELECT COUNT(*) FROM sample_table;",
    "SELECT * FROM sample_table LIMIT 1000;",
];

/// Row count of the stand-in dataset used when nothing is uploaded
pub const SYNTHETIC_ROWS: usize = 10_000;

static SYNTHETIC: Lazy<Dataset> = Lazy::new(|| Dataset::synthetic(SYNTHETIC_ROWS));

/// Dataset a simulation actually inserts
///
/// The empty dataset is replaced by the synthetic `A`/`B` table.
#[must_use]
pub fn effective_dataset(dataset: &Dataset) -> &Dataset {
    if dataset.is_empty() {
        &SYNTHETIC
    } else {
        dataset
    }
}

/// Pluggable timing function
pub trait TimingSimulator: Send + Sync {
    /// Simulator name for logs
    fn name(&self) -> &'static str;

    /// Produce timings for one backend against the current dataset
    fn simulate(&self, backend: &BackendConfig, dataset: &Dataset) -> PerformanceRecord;
}

/// Simulated latencies for one class of backend, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyProfile {
    /// Data insertion time
    pub insertion: f64,
    /// Time per query
    pub per_query: f64,
}

impl LatencyProfile {
    /// Create profile
    #[inline]
    #[must_use]
    pub const fn new(insertion: f64, per_query: f64) -> Self {
        Self {
            insertion,
            per_query,
        }
    }

    /// Profile of the fast kind
    pub const FAST: LatencyProfile = LatencyProfile::new(0.1, 0.05);

    /// Profile of every other kind
    pub const DEFAULT: LatencyProfile = LatencyProfile::new(0.2, 0.1);
}

fn check_latency(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidLatency { field, value })
    }
}

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Kind that gets the fast profile
    pub fast_kind: BackendKind,
    /// Latencies for `fast_kind`
    pub fast: LatencyProfile,
    /// Latencies for every other kind
    pub default: LatencyProfile,
}

impl SimulatorConfig {
    /// Profile for a backend kind
    #[inline]
    #[must_use]
    pub fn profile_for(&self, kind: BackendKind) -> LatencyProfile {
        if kind == self.fast_kind {
            self.fast
        } else {
            self.default
        }
    }

    /// Validate latencies
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidLatency`] for a negative or non-finite value
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_latency("simulator.fast.insertion", self.fast.insertion)?;
        check_latency("simulator.fast.per_query", self.fast.per_query)?;
        check_latency("simulator.default.insertion", self.default.insertion)?;
        check_latency("simulator.default.per_query", self.default.per_query)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            fast_kind: BackendKind::DuckDb,
            fast: LatencyProfile::FAST,
            default: LatencyProfile::DEFAULT,
        }
    }
}

/// Deterministic simulator reporting the configured latencies
#[derive(Debug, Clone, Default)]
pub struct FixedLatencySimulator {
    config: SimulatorConfig,
}

impl FixedLatencySimulator {
    /// Create simulator
    #[inline]
    #[must_use]
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}

impl TimingSimulator for FixedLatencySimulator {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn simulate(&self, backend: &BackendConfig, dataset: &Dataset) -> PerformanceRecord {
        let profile = self.config.profile_for(backend.kind);
        let query_times = [profile.per_query; CANONICAL_QUERIES.len()];
        build_record(
            backend,
            effective_dataset(dataset),
            profile.insertion,
            &query_times,
        )
    }
}

/// Simulator that sleeps the configured latencies and measures them
///
/// Blocks the calling thread for the whole run.
#[derive(Debug, Clone, Default)]
pub struct SleepingSimulator {
    config: SimulatorConfig,
}

impl SleepingSimulator {
    /// Create simulator
    #[inline]
    #[must_use]
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }
}

impl TimingSimulator for SleepingSimulator {
    fn name(&self) -> &'static str {
        "sleeping"
    }

    fn simulate(&self, backend: &BackendConfig, dataset: &Dataset) -> PerformanceRecord {
        let profile = self.config.profile_for(backend.kind);
        let dataset = effective_dataset(dataset);

        let insertion = timed_sleep(profile.insertion);
        let mut query_times = [0.0; CANONICAL_QUERIES.len()];
        for (slot, query) in query_times.iter_mut().zip(CANONICAL_QUERIES) {
            *slot = timed_sleep(profile.per_query);
            tracing::trace!(backend = %backend.name, query, seconds = *slot, "query simulated");
        }

        build_record(backend, dataset, insertion, &query_times)
    }
}

fn timed_sleep(seconds: f64) -> f64 {
    let start = Instant::now();
    std::thread::sleep(Duration::try_from_secs_f64(seconds).unwrap_or_default());
    start.elapsed().as_secs_f64()
}

fn build_record(
    backend: &BackendConfig,
    dataset: &Dataset,
    insertion: f64,
    query_times: &[f64],
) -> PerformanceRecord {
    let query_total: f64 = query_times.iter().sum();
    #[allow(clippy::cast_precision_loss)]
    let avg_query_time = if query_times.is_empty() {
        0.0
    } else {
        query_total / query_times.len() as f64
    };

    PerformanceRecord {
        backend_name: backend.name.clone(),
        avg_query_time,
        total_queries: query_times.len() as u64,
        total_time: insertion + query_total,
        data_insertion_time: insertion,
        rows_inserted: dataset.row_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_model::Column;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn fast_kind_timings() {
        let sim = FixedLatencySimulator::default();
        let record = sim.simulate(&BackendConfig::new("D", BackendKind::DuckDb), &Dataset::empty());

        assert_eq!(record.backend_name, "D");
        assert_eq!(record.total_queries, 2);
        assert_close(record.avg_query_time, 0.05);
        assert_close(record.data_insertion_time, 0.1);
        assert_close(record.total_time, 0.2);
    }

    #[test]
    fn other_kind_timings() {
        let sim = FixedLatencySimulator::default();
        for kind in [BackendKind::Postgres, BackendKind::MySql, BackendKind::Sqlite, BackendKind::MongoDb] {
            let record = sim.simulate(&BackendConfig::new("X", kind), &Dataset::empty());
            assert_close(record.avg_query_time, 0.1);
            assert_close(record.data_insertion_time, 0.2);
            assert_close(record.total_time, 0.4);
        }
    }

    #[test]
    fn total_time_covers_queries() {
        let sim = FixedLatencySimulator::default();
        let record = sim.simulate(&BackendConfig::new("P", BackendKind::Postgres), &Dataset::empty());
        #[allow(clippy::cast_precision_loss)]
        let floor = record.avg_query_time * record.total_queries as f64;
        assert!(record.total_time >= floor);
    }

    #[test]
    fn empty_dataset_uses_synthetic_rows() {
        let sim = FixedLatencySimulator::default();
        let backend = BackendConfig::new("D", BackendKind::DuckDb);

        assert_eq!(sim.simulate(&backend, &Dataset::empty()).rows_inserted, SYNTHETIC_ROWS);

        let uploaded = Dataset::new(vec![Column::new("x", vec![duel_model::Scalar::Int(1)])]).unwrap();
        assert_eq!(sim.simulate(&backend, &uploaded).rows_inserted, 1);
    }

    #[test]
    fn synthetic_dataset_shape() {
        let empty = Dataset::empty();
        let synthetic = effective_dataset(&empty);
        assert_eq!(synthetic.column_names(), vec!["A", "B"]);
        assert_eq!(synthetic.row_count(), 10_000);
    }

    #[test]
    fn configurable_fast_kind() {
        let config = SimulatorConfig {
            fast_kind: BackendKind::Sqlite,
            ..SimulatorConfig::default()
        };
        assert_eq!(config.profile_for(BackendKind::Sqlite), LatencyProfile::FAST);
        assert_eq!(config.profile_for(BackendKind::DuckDb), LatencyProfile::DEFAULT);
    }

    #[test]
    fn negative_latency_rejected() {
        let config = SimulatorConfig {
            default: LatencyProfile::new(-0.1, 0.1),
            ..SimulatorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("simulator.default.insertion"));
    }

    #[test]
    fn sleeping_simulator_measures() {
        let config = SimulatorConfig {
            fast: LatencyProfile::new(0.002, 0.001),
            ..SimulatorConfig::default()
        };
        let record = SleepingSimulator::new(config)
            .simulate(&BackendConfig::new("D", BackendKind::DuckDb), &Dataset::empty());

        assert_eq!(record.total_queries, 2);
        assert!(record.data_insertion_time >= 0.002);
        assert!(record.avg_query_time >= 0.001);
        assert!(record.total_time >= record.data_insertion_time + 2.0 * 0.001);
    }
}
