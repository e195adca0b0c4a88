//! Performance records and collections
//!
//! A [`PerformanceRecord`] is produced once per backend per aggregation pass.
//! A [`PerformanceCollection`] is the shared, immutable output of one pass.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize, Serializer};
use std::ops::Deref;
use std::sync::Arc;

/// Simulated timings for one backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Name of the backend (reference, not ownership)
    #[serde(rename = "db_name")]
    pub backend_name: String,
    /// Mean per-query time in seconds
    pub avg_query_time: f64,
    /// Number of queries run
    pub total_queries: u64,
    /// Insertion plus all query time in seconds
    pub total_time: f64,
    /// Insertion phase time in seconds
    pub data_insertion_time: f64,
    /// Rows the simulator inserted
    pub rows_inserted: usize,
}

impl PerformanceRecord {
    /// Create a record, rejecting negative or non-finite timings
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidTiming`] for the first bad field
    pub fn new(
        backend_name: impl Into<String>,
        avg_query_time: f64,
        total_queries: u64,
        total_time: f64,
        data_insertion_time: f64,
        rows_inserted: usize,
    ) -> ModelResult<Self> {
        check_timing("avg_query_time", avg_query_time)?;
        check_timing("total_time", total_time)?;
        check_timing("data_insertion_time", data_insertion_time)?;
        Ok(Self {
            backend_name: backend_name.into(),
            avg_query_time,
            total_queries,
            total_time,
            data_insertion_time,
            rows_inserted,
        })
    }
}

fn check_timing(field: &'static str, value: f64) -> ModelResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidTiming { field, value })
    }
}

/// Ordered records from one aggregation pass
///
/// Cloning shares storage. Equality compares records by value;
/// [`same_computation`](Self::same_computation) compares identity.
#[derive(Debug, Clone)]
pub struct PerformanceCollection {
    records: Arc<[PerformanceRecord]>,
    generation: u64,
}

impl PerformanceCollection {
    /// Wrap the records of pass `generation`
    #[must_use]
    pub fn new(records: Vec<PerformanceRecord>, generation: u64) -> Self {
        Self {
            records: records.into(),
            generation,
        }
    }

    /// Collection with no records
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    /// Aggregation pass that produced this collection
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Records in selection order
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[PerformanceRecord] {
        &self.records
    }

    /// True if both handles come from the same aggregation pass
    #[inline]
    #[must_use]
    pub fn same_computation(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records) && self.generation == other.generation
    }
}

impl Default for PerformanceCollection {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for PerformanceCollection {
    type Target = [PerformanceRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl PartialEq for PerformanceCollection {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl Serialize for PerformanceCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, total: f64) -> PerformanceRecord {
        PerformanceRecord::new(name, 0.05, 2, total, 0.1, 10).unwrap()
    }

    #[test]
    fn record_rejects_negative_timing() {
        let err = PerformanceRecord::new("x", -0.1, 2, 1.0, 0.1, 0).unwrap_err();
        assert!(matches!(err, ModelError::InvalidTiming { field: "avg_query_time", .. }));
    }

    #[test]
    fn record_rejects_nan() {
        assert!(PerformanceRecord::new("x", 0.1, 2, f64::NAN, 0.1, 0).is_err());
    }

    #[test]
    fn record_serializes_db_name() {
        let json = serde_json::to_value(record("DuckDB", 0.2)).unwrap();
        assert_eq!(json["db_name"], "DuckDB");
        assert_eq!(json["total_queries"], 2);
    }

    #[test]
    fn clones_share_computation() {
        let a = PerformanceCollection::new(vec![record("a", 1.0)], 1);
        let b = a.clone();
        assert!(a.same_computation(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn equal_values_are_distinct_computations() {
        let a = PerformanceCollection::new(vec![record("a", 1.0)], 1);
        let b = PerformanceCollection::new(vec![record("a", 1.0)], 2);
        assert_eq!(a, b);
        assert!(!a.same_computation(&b));
    }

    #[test]
    fn derefs_to_slice() {
        let c = PerformanceCollection::new(vec![record("a", 1.0), record("b", 2.0)], 3);
        assert_eq!(c.len(), 2);
        assert_eq!(c[1].backend_name, "b");
        assert_eq!(c.generation(), 3);
    }
}
