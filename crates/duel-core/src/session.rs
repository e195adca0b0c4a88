//! Dashboard session
//!
//! One [`DashboardSession`] owns everything a user interacts with: the
//! backend registry, the selection, the dataset holder, the aggregator and
//! the connections view. Handlers take `&mut self`, so no projection can be
//! read while a mutation is in flight.

use crate::aggregator::{AggregatorStats, MetricsAggregator};
use crate::cell::{Memo, Version};
use crate::config::{DashboardConfig, UploadFailurePolicy};
use crate::error::{DashboardError, DashboardResult, RegistryError, TableEditError};
use crate::holder::DatasetHolder;
use crate::notification::{Notification, NotificationLog};
use crate::projection::{self, ChartSpec, PerformanceRow, Summary, SummaryText};
use crate::registry::BackendRegistry;
use crate::selection::Selection;
use crate::simulator::{FixedLatencySimulator, TimingSimulator};
use crate::table::ConnectionsTable;
use duel_loader::{DatasetLoader, LoadedDataset, UploadedFile};
use duel_model::{BackendConfig, Dataset, PerformanceCollection};
use serde::Serialize;
use std::sync::Arc;
use ulid::Ulid;

/// Unique session identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SessionId(pub Ulid);

impl SessionId {
    /// Generate new session ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-user dashboard state
#[derive(Debug)]
pub struct DashboardSession {
    id: SessionId,
    config: Arc<DashboardConfig>,
    registry: BackendRegistry,
    choices: Vec<String>,
    selection: Selection,
    dataset: DatasetHolder,
    aggregator: MetricsAggregator,
    loader: DatasetLoader,
    connections: Memo<Version, ConnectionsTable>,
    notifications: NotificationLog,
}

impl DashboardSession {
    /// Create session with the deterministic simulator
    ///
    /// # Errors
    /// Returns [`DashboardError::Config`] if the configuration is invalid
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        let simulator = Arc::new(FixedLatencySimulator::new(config.simulator.clone()));
        Self::with_simulator(config, simulator)
    }

    /// Create session with a custom simulator
    ///
    /// # Errors
    /// Returns [`DashboardError::Config`] if the configuration is invalid
    pub fn with_simulator(
        config: DashboardConfig,
        simulator: Arc<dyn TimingSimulator>,
    ) -> DashboardResult<Self> {
        let loader = DatasetLoader::new()
            .with_max_upload_bytes(config.max_upload_bytes)
            .with_cache_capacity(config.parse_cache_capacity);
        Self::with_parts(config, simulator, loader)
    }

    /// Create session sharing an existing loader (and its parse cache)
    ///
    /// # Errors
    /// Returns [`DashboardError::Config`] if the configuration is invalid
    pub fn with_parts(
        config: DashboardConfig,
        simulator: Arc<dyn TimingSimulator>,
        loader: DatasetLoader,
    ) -> DashboardResult<Self> {
        config.validate()?;

        let registry = BackendRegistry::seeded(&config.seed);
        let choices = registry.names().into_iter().map(str::to_string).collect();
        let selection = Selection::new(config.default_selection.iter().cloned());
        let id = SessionId::new();

        tracing::info!(
            session = %id,
            backends = registry.len(),
            simulator = simulator.name(),
            "session started"
        );

        Ok(Self {
            id,
            config: Arc::new(config),
            registry,
            choices,
            selection,
            dataset: DatasetHolder::new(),
            aggregator: MetricsAggregator::new(simulator),
            loader,
            connections: Memo::new(),
            notifications: NotificationLog::new(),
        })
    }

    /// Handle the add-backend action
    ///
    /// Always produces a notification: a warning for empty or duplicate
    /// names, a message on success.
    pub fn on_add_backend(&mut self, raw: &str) -> Notification {
        let notification = match self.try_add_backend(raw) {
            Ok(name) => Notification::added(&name),
            Err(DashboardError::EmptyName) => Notification::empty_name(),
            Err(DashboardError::Registry(RegistryError::AlreadyExists { name })) => {
                Notification::duplicate(&name)
            }
            Err(err) => Notification::warning(err.to_string()),
        };
        self.notifications.push(notification)
    }

    /// Register a backend by name with the default kind
    ///
    /// The selection is left untouched; the name joins the sorted choices.
    /// Returns the trimmed name.
    ///
    /// # Errors
    /// - [`DashboardError::EmptyName`] if the name is blank
    /// - [`DashboardError::Registry`] if the name is taken
    pub fn try_add_backend(&mut self, raw: &str) -> DashboardResult<String> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(DashboardError::EmptyName);
        }
        self.registry.add(name, self.config.default_kind)?;

        if !self.choices.iter().any(|c| c == name) {
            self.choices.push(name.to_string());
            self.choices.sort();
        }
        tracing::info!(session = %self.id, backend = name, "backend added");
        Ok(name.to_string())
    }

    /// Handle the upload action
    ///
    /// `None` resets the dataset to empty and produces no notification.
    pub async fn on_upload(&mut self, file: Option<UploadedFile>) -> Option<Notification> {
        let Some(file) = file else {
            self.dataset.reset();
            return None;
        };

        let extension = file.extension();
        let notification = match self.try_upload(&file).await {
            Ok(_) => Notification::upload_succeeded(&extension),
            Err(err) => Notification::upload_failed(&extension, &UploadFailure(&err)),
        };
        Some(self.notifications.push(notification))
    }

    /// Load an upload into the dataset holder
    ///
    /// On failure the dataset is reset or retained per
    /// [`DashboardConfig::upload_failure`].
    ///
    /// # Errors
    /// Returns [`DashboardError::Load`] for unsupported, unreadable,
    /// oversized or malformed uploads
    pub async fn try_upload(&mut self, file: &UploadedFile) -> DashboardResult<LoadedDataset> {
        match self.loader.load(file).await {
            Ok(loaded) => {
                self.dataset.set(Arc::clone(&loaded.dataset));
                tracing::info!(
                    session = %self.id,
                    file = file.name(),
                    rows = loaded.dataset.row_count(),
                    cached = loaded.cached,
                    "dataset uploaded"
                );
                Ok(loaded)
            }
            Err(err) => {
                if self.config.upload_failure == UploadFailurePolicy::Reset {
                    self.dataset.reset();
                }
                tracing::warn!(session = %self.id, file = file.name(), error = %err, "upload rejected");
                Err(err.into())
            }
        }
    }

    /// Replace the selection
    ///
    /// Returns true if the selection changed.
    pub fn select<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.replace(names)
    }

    /// Edit a cell of the connections view
    ///
    /// # Errors
    /// Returns [`TableEditError`] if the edit is rejected
    pub fn edit_connection(
        &mut self,
        row: usize,
        column: &str,
        value: &str,
    ) -> Result<(), TableEditError> {
        self.refresh_connections().edit(row, column, value)
    }

    /// Current performance collection (memoized)
    #[must_use]
    pub fn performance(&self) -> PerformanceCollection {
        self.aggregator
            .performance(&self.registry, &self.selection, &self.dataset)
    }

    /// Dashboard title
    #[must_use]
    pub fn title(&self) -> String {
        projection::title(self.selection.names())
    }

    /// Summary values
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::from_records(&self.performance())
    }

    /// Chart description
    #[must_use]
    pub fn chart(&self) -> ChartSpec {
        ChartSpec::from_records(&self.performance())
    }

    /// Performance table rows
    #[must_use]
    pub fn performance_rows(&self) -> Vec<PerformanceRow> {
        projection::performance_rows(&self.performance())
    }

    /// Connections view, rebuilt if the registry changed
    pub fn connections_table(&mut self) -> &ConnectionsTable {
        self.refresh_connections()
    }

    fn refresh_connections(&mut self) -> &mut ConnectionsTable {
        let registry = &self.registry;
        self.connections
            .get_or_insert_with(registry.version(), || ConnectionsTable::from_registry(registry))
    }

    /// Everything a renderer needs, in one serializable value
    pub fn snapshot(&mut self) -> DashboardSnapshot {
        let performance = self.performance();
        let summary = Summary::from_records(&performance);
        DashboardSnapshot {
            session: self.id,
            title: self.title(),
            selection: self.selection.names().to_vec(),
            choices: self.choices.clone(),
            summary,
            summary_text: summary.display(),
            chart: ChartSpec::from_records(&performance),
            performance: projection::performance_rows(&performance),
            connections: self.connections_table().clone(),
            dataset_rows: self.dataset.current().row_count(),
            aggregator: self.aggregator.stats(),
            notifications: self.notifications.entries().to_vec(),
        }
    }

    /// Session identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Registered backends in registration order
    #[must_use]
    pub fn backends(&self) -> Vec<BackendConfig> {
        self.registry.list()
    }

    /// Backend registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Selection choices, sorted after every add
    #[inline]
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Selected names in order
    #[inline]
    #[must_use]
    pub fn selection(&self) -> &[String] {
        self.selection.names()
    }

    /// Current dataset
    #[inline]
    #[must_use]
    pub fn dataset(&self) -> &Arc<Dataset> {
        self.dataset.current()
    }

    /// Aggregator counters
    #[inline]
    #[must_use]
    pub fn aggregator_stats(&self) -> AggregatorStats {
        self.aggregator.stats()
    }

    /// Force the next projection read to recompute
    pub fn invalidate(&self) {
        self.aggregator.invalidate();
    }

    /// Notifications so far
    #[inline]
    #[must_use]
    pub fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    /// Upload loader
    #[inline]
    #[must_use]
    pub fn loader(&self) -> &DatasetLoader {
        &self.loader
    }
}

/// Serializable dashboard state
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// Owning session
    pub session: SessionId,
    /// Dashboard title
    pub title: String,
    /// Selected names in order
    pub selection: Vec<String>,
    /// Names offered for selection
    pub choices: Vec<String>,
    /// Summary numbers
    pub summary: Summary,
    /// Summary value-box strings
    pub summary_text: SummaryText,
    /// Bar chart description
    pub chart: ChartSpec,
    /// Performance table rows
    pub performance: Vec<PerformanceRow>,
    /// Connections table view
    pub connections: ConnectionsTable,
    /// Rows in the current dataset (0 when none uploaded)
    pub dataset_rows: usize,
    /// Aggregation counters
    pub aggregator: AggregatorStats,
    /// Notifications raised so far
    pub notifications: Vec<Notification>,
}

/// Reason text for a failed upload: the loader's message without the
/// session-level prefix
struct UploadFailure<'a>(&'a DashboardError);

impl std::fmt::Display for UploadFailure<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            DashboardError::Load(err) => write!(f, "{err}"),
            other => write!(f, "{other}"),
        }
    }
}
