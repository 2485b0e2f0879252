//! Server types and shared state.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::metrics::MetricsCollector;
use crate::scenarios::ScenarioStore;
use crate::storage::LogStore;
use crate::timeline::TimelineService;
use crate::traits::{ModelClient, TimeProvider};

/// Shared application state for all route handlers.
///
/// Cloned per request; every component is behind an `Arc` or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Timeline generation for `POST /api/scenarios`.
    pub timeline: TimelineService,
    /// Last generated scenarios, served by `GET /api/scenarios`.
    pub scenarios: Arc<ScenarioStore>,
    /// Markdown log directory.
    pub logs: LogStore,
    /// Clock for export timestamps and default years.
    pub clock: Arc<dyn TimeProvider>,
    /// Generation and export counters.
    pub metrics: Arc<MetricsCollector>,
    /// Directory holding `index.html`.
    pub static_dir: PathBuf,
}

impl AppState {
    /// Creates the application state from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration (log, static and TTL settings)
    /// * `client` - The model backend
    /// * `backend` - Backend name for logs and metrics
    /// * `clock` - Time source
    #[must_use]
    pub fn new(
        config: &Config,
        client: Arc<dyn ModelClient>,
        backend: &'static str,
        clock: Arc<dyn TimeProvider>,
    ) -> Self {
        let logs = LogStore::new(&config.log_dir);
        let metrics = Arc::new(MetricsCollector::new());
        let timeline = TimelineService::new(
            client,
            backend,
            Arc::clone(&clock),
            logs.clone(),
            Arc::clone(&metrics),
        );

        Self {
            timeline,
            scenarios: Arc::new(ScenarioStore::new(config.scenario_ttl_secs)),
            logs,
            clock,
            metrics,
            static_dir: PathBuf::from(&config.static_dir),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("timeline", &self.timeline)
            .field("logs", &self.logs)
            .field("static_dir", &self.static_dir)
            .finish_non_exhaustive()
    }
}

/// Successful `POST /api/export-session` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResponse {
    /// Always `true`.
    pub success: bool,
    /// Name of the written log file.
    pub filename: String,
}
