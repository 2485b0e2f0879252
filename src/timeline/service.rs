//! Timeline generation: prompt, model call, parse, log.

use std::sync::Arc;
use std::time::Instant;

use chrono::Datelike;
use tracing::{info, warn};

use super::parsing::{parse_timeline, ParsedTimeline};
use crate::markdown::render_timeline;
use crate::metrics::{MetricEvent, MetricsCollector};
use crate::prompts::timeline_prompt;
use crate::storage::{LogStore, SCENARIO_SLUG_FALLBACK};
use crate::traits::{CompletionRequest, ModelClient, TimeProvider};

/// Generates timelines for the web endpoint.
///
/// Model failures degrade to empty text, so [`TimelineService::generate`]
/// always returns at least one event.
#[derive(Clone)]
pub struct TimelineService {
    client: Arc<dyn ModelClient>,
    backend: &'static str,
    clock: Arc<dyn TimeProvider>,
    logs: LogStore,
    metrics: Arc<MetricsCollector>,
}

impl std::fmt::Debug for TimelineService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineService")
            .field("backend", &self.backend)
            .field("logs", &self.logs)
            .finish_non_exhaustive()
    }
}

impl TimelineService {
    /// Create a new service.
    #[must_use]
    pub fn new(
        client: Arc<dyn ModelClient>,
        backend: &'static str,
        clock: Arc<dyn TimeProvider>,
        logs: LogStore,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            client,
            backend,
            clock,
            logs,
            metrics,
        }
    }

    /// Generate a timeline for `topic`.
    ///
    /// The Markdown log is written before returning; a write failure is
    /// logged and otherwise ignored.
    pub async fn generate(&self, topic: &str) -> ParsedTimeline {
        let now = self.clock.now();
        let year = now.year();
        let request = CompletionRequest::new(timeline_prompt(topic, year));

        let start = Instant::now();
        let result = self.client.complete(request).await;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let (text, success) = match result {
            Ok(response) => (response.content, true),
            Err(e) => {
                warn!(
                    backend = self.backend,
                    error = %e,
                    "Model call failed, continuing with empty text"
                );
                (String::new(), false)
            }
        };

        let parsed = parse_timeline(&text, topic, year);
        info!(
            backend = self.backend,
            strategy = %parsed.strategy,
            events = parsed.events.len(),
            latency_ms = latency_ms,
            "Timeline generated"
        );
        self.metrics.record(MetricEvent::new(
            self.backend,
            parsed.strategy,
            latency_ms,
            success,
        ));

        let markdown = render_timeline(topic, &parsed.events);
        if let Err(e) = self
            .logs
            .save(&now, topic, SCENARIO_SLUG_FALLBACK, &markdown)
            .await
        {
            warn!(error = %e, "Failed to save timeline log");
        }

        parsed
    }
}
