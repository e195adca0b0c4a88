//! Testing utilities for the DatabaseDuel workspace
//!
//! Shared fixtures and a simulator that counts its invocations.

#![allow(missing_docs)]

use duel_core::{DashboardConfig, DashboardSession, FixedLatencySimulator, TimingSimulator};
use duel_loader::UploadedFile;
use duel_model::{BackendConfig, Column, Dataset, PerformanceRecord, Scalar};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Fixed-latency simulator that records every call
#[derive(Debug, Default)]
pub struct CountingSimulator {
    inner: FixedLatencySimulator,
    total: AtomicUsize,
    per_backend: Mutex<HashMap<String, usize>>,
}

impl CountingSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls across all backends
    pub fn calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    /// Calls for one backend
    pub fn calls_for(&self, backend: &str) -> usize {
        self.per_backend.lock().get(backend).copied().unwrap_or(0)
    }

    pub fn reset(&self) {
        self.total.store(0, Ordering::SeqCst);
        self.per_backend.lock().clear();
    }
}

impl TimingSimulator for CountingSimulator {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn simulate(&self, backend: &BackendConfig, dataset: &Dataset) -> PerformanceRecord {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self
            .per_backend
            .lock()
            .entry(backend.name.clone())
            .or_insert(0) += 1;
        self.inner.simulate(backend, dataset)
    }
}

/// Default session plus a handle to its counting simulator
pub fn setup_counted_session() -> (DashboardSession, Arc<CountingSimulator>) {
    setup_counted_session_with(DashboardConfig::default())
}

pub fn setup_counted_session_with(
    config: DashboardConfig,
) -> (DashboardSession, Arc<CountingSimulator>) {
    let simulator = Arc::new(CountingSimulator::new());
    let session = DashboardSession::with_simulator(config, simulator.clone()).unwrap();
    (session, simulator)
}

pub fn setup_test_session() -> DashboardSession {
    DashboardSession::new(DashboardConfig::default()).unwrap()
}

pub const SAMPLE_CSV: &str = "id,name,score\n1,alpha,0.5\n2,beta,1.5\n3,gamma,\n";

pub const SAMPLE_JSON: &str = r#"[{"id": 1, "name": "alpha"}, {"id": 2, "name": "beta"}]"#;

pub fn sample_csv_upload() -> UploadedFile {
    UploadedFile::from_bytes("sample.csv", SAMPLE_CSV.as_bytes().to_vec())
}

pub fn sample_json_upload() -> UploadedFile {
    UploadedFile::from_bytes("sample.json", SAMPLE_JSON.as_bytes().to_vec())
}

pub fn unsupported_upload() -> UploadedFile {
    UploadedFile::from_bytes("notes.txt", b"not a table".to_vec())
}

pub fn malformed_json_upload() -> UploadedFile {
    UploadedFile::from_bytes("broken.json", br#"{"name": "test", "value":}"#.to_vec())
}

/// Small two-column dataset
pub fn sample_dataset() -> Dataset {
    Dataset::new(vec![
        Column::new("id", vec![Scalar::Int(1), Scalar::Int(2)]),
        Column::new("name", vec![Scalar::Text("alpha".into()), Scalar::Text("beta".into())]),
    ])
    .unwrap()
}
