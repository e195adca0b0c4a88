//! Metrics aggregator - the reactive core
//!
//! Derives the [`PerformanceCollection`] from the current selection,
//! registry and dataset, and memoizes it against their versions.
//!
//! # Caching
//!
//! A cached collection stays valid while the selection version and the
//! dataset version are unchanged. The registry version only matters when
//! the cached pass skipped a name it could not resolve: registering that
//! name later must make it appear.

use crate::cell::{Memo, Version};
use crate::holder::DatasetHolder;
use crate::registry::BackendRegistry;
use crate::selection::Selection;
use crate::simulator::TimingSimulator;
use duel_model::PerformanceCollection;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

/// Versions a cached collection was computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    selection: Version,
    dataset: Version,
    /// Set only when an unresolved name was skipped
    registry: Option<Version>,
}

impl Stamp {
    fn is_fresh(&self, registry: &BackendRegistry, selection: &Selection, dataset: &DatasetHolder) -> bool {
        self.selection == selection.version()
            && self.dataset == dataset.version()
            && self.registry.map_or(true, |v| v == registry.version())
    }
}

/// Aggregator counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregatorStats {
    /// Recomputations
    pub passes: u64,
    /// Calls served from the memo
    pub cache_hits: u64,
    /// Simulator invocations
    pub simulations: u64,
}

#[derive(Debug, Default)]
struct State {
    memo: Memo<Stamp, PerformanceCollection>,
    generation: u64,
    stats: AggregatorStats,
}

/// Memoizing performance aggregator
pub struct MetricsAggregator {
    simulator: Arc<dyn TimingSimulator>,
    state: Mutex<State>,
}

impl std::fmt::Debug for MetricsAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsAggregator")
            .field("simulator", &self.simulator.name())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl MetricsAggregator {
    /// Create aggregator over a simulator
    #[must_use]
    pub fn new(simulator: Arc<dyn TimingSimulator>) -> Self {
        Self {
            simulator,
            state: Mutex::new(State::default()),
        }
    }

    /// Current performance collection
    ///
    /// Resolves each selected name in selection order and simulates it
    /// against the current dataset. Unknown names are skipped. Returns the
    /// cached collection if no input changed since the last pass.
    pub fn performance(
        &self,
        registry: &BackendRegistry,
        selection: &Selection,
        dataset: &DatasetHolder,
    ) -> PerformanceCollection {
        let mut state = self.state.lock();

        if let Some(cached) = state
            .memo
            .get_if(|stamp| stamp.is_fresh(registry, selection, dataset))
            .cloned()
        {
            state.stats.cache_hits += 1;
            return cached;
        }

        let current = dataset.current();
        let mut records = Vec::with_capacity(selection.len());
        let mut skipped = false;
        for name in selection.names() {
            match registry.lookup(name) {
                Some(backend) => records.push(self.simulator.simulate(backend, current)),
                None => {
                    tracing::debug!(backend = %name, "unresolved selection skipped");
                    skipped = true;
                }
            }
        }

        state.generation += 1;
        state.stats.passes += 1;
        state.stats.simulations += records.len() as u64;
        metrics::counter!("dbduel_aggregation_passes_total").increment(1);
        metrics::counter!("dbduel_simulations_total").increment(records.len() as u64);

        let collection = PerformanceCollection::new(records, state.generation);
        tracing::debug!(
            generation = state.generation,
            simulator = self.simulator.name(),
            records = collection.len(),
            selection_version = %selection.version(),
            dataset_version = %dataset.version(),
            "aggregation pass"
        );

        let stamp = Stamp {
            selection: selection.version(),
            dataset: dataset.version(),
            registry: skipped.then(|| registry.version()),
        };
        state.memo.store(stamp, collection.clone());
        collection
    }

    /// Force the next call to recompute
    pub fn invalidate(&self) {
        self.state.lock().memo.clear();
    }

    /// Snapshot of counters
    #[must_use]
    pub fn stats(&self) -> AggregatorStats {
        self.state.lock().stats
    }

    /// Simulator in use
    #[inline]
    #[must_use]
    pub fn simulator(&self) -> &Arc<dyn TimingSimulator> {
        &self.simulator
    }
}
