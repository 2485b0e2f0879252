//! Metrics collection.
//!
//! This module provides:
//! - Per-backend latency and success tracking for timeline generation
//! - Counts of which parse strategy produced each timeline
//! - Session export counters
//!
//! Everything is in memory and resets on restart. `GET /api/metrics`
//! serves [`MetricsCollector::summary`].
//!
//! # Example
//!
//! ```
//! use scenario_timeline::metrics::{MetricEvent, MetricsCollector};
//! use scenario_timeline::timeline::ParseStrategy;
//!
//! let metrics = MetricsCollector::new();
//! metrics.record(MetricEvent::new("hosted", ParseStrategy::ArrayParse, 150, true));
//! metrics.record(MetricEvent::new("hosted", ParseStrategy::RawFallback, 90, false));
//!
//! let summary = metrics.summary();
//! assert_eq!(summary.total_generations, 2);
//! assert_eq!(summary.by_strategy["raw_fallback"], 1);
//! assert!((summary.by_backend["hosted"].success_rate - 0.5).abs() < f64::EPSILON);
//! ```

// Allow intentional numeric casts for metrics calculations
#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::timeline::ParseStrategy;

/// Maximum number of generation events kept; older ones are dropped.
const MAX_EVENTS: usize = 10_000;

/// One timeline generation.
#[derive(Debug, Clone, Serialize)]
pub struct MetricEvent {
    /// Backend that was called (`hosted`, `local`, or `none`).
    pub backend: String,
    /// Strategy that produced the returned events.
    pub strategy: ParseStrategy,
    /// Model call latency in milliseconds.
    pub latency_ms: u64,
    /// Whether the model call succeeded.
    pub success: bool,
    /// Timestamp of the event (Unix epoch seconds).
    pub timestamp: u64,
}

impl MetricEvent {
    /// Create a new metric event.
    #[must_use]
    pub fn new(
        backend: impl Into<String>,
        strategy: ParseStrategy,
        latency_ms: u64,
        success: bool,
    ) -> Self {
        Self {
            backend: backend.into(),
            strategy,
            latency_ms,
            success,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

/// Summary statistics for one backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BackendSummary {
    /// Total model calls.
    pub calls: u64,
    /// Successful calls.
    pub successful: u64,
    /// Failed calls.
    pub failed: u64,
    /// Average latency in milliseconds.
    pub avg_latency_ms: f64,
    /// Minimum latency in milliseconds.
    pub min_latency_ms: u64,
    /// Maximum latency in milliseconds.
    pub max_latency_ms: u64,
    /// Success rate (0.0-1.0).
    pub success_rate: f64,
}

/// Overall metrics summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsSummary {
    /// Timelines generated (within the retained window).
    pub total_generations: u64,
    /// Share of generations that ended in the raw-text fallback.
    pub fallback_rate: f64,
    /// Per-backend call statistics.
    pub by_backend: HashMap<String, BackendSummary>,
    /// Generations per parse strategy name.
    pub by_strategy: HashMap<String, u64>,
    /// Sessions exported successfully.
    pub exports_succeeded: u64,
    /// Session exports that failed with a filesystem error.
    pub exports_failed: u64,
}

/// Thread-safe metrics collector.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    events: RwLock<Vec<MetricEvent>>,
    exports_succeeded: AtomicU64,
    exports_failed: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a timeline generation.
    pub fn record(&self, event: MetricEvent) {
        match self.events.write() {
            Ok(mut events) => {
                if events.len() >= MAX_EVENTS {
                    events.remove(0);
                }
                events.push(event);
            }
            Err(poison_error) => {
                tracing::error!(
                    backend = %event.backend,
                    error = %poison_error,
                    "Failed to record metric event: RwLock poisoned"
                );
            }
        }
    }

    /// Record the outcome of a session export.
    pub fn record_export(&self, success: bool) {
        let counter = if success {
            &self.exports_succeeded
        } else {
            &self.exports_failed
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get summary statistics.
    #[must_use]
    pub fn summary(&self) -> MetricsSummary {
        let events = match self.events.read() {
            Ok(e) => e.clone(),
            Err(poison_error) => {
                tracing::warn!(
                    error = %poison_error,
                    "Reading events from poisoned lock, using recovered data"
                );
                poison_error.into_inner().clone()
            }
        };

        let mut by_backend: HashMap<String, Vec<&MetricEvent>> = HashMap::new();
        let mut by_strategy: HashMap<String, u64> = HashMap::new();
        for event in &events {
            by_backend.entry(event.backend.clone()).or_default().push(event);
            *by_strategy
                .entry(event.strategy.as_str().to_string())
                .or_default() += 1;
        }

        let backend_summaries = by_backend
            .into_iter()
            .map(|(backend, backend_events)| (backend, summarize(&backend_events)))
            .collect();

        let total = events.len() as u64;
        let fallbacks = by_strategy
            .get(ParseStrategy::RawFallback.as_str())
            .copied()
            .unwrap_or(0);
        let fallback_rate = if total > 0 {
            fallbacks as f64 / total as f64
        } else {
            0.0
        };

        MetricsSummary {
            total_generations: total,
            fallback_rate,
            by_backend: backend_summaries,
            by_strategy,
            exports_succeeded: self.exports_succeeded.load(Ordering::Relaxed),
            exports_failed: self.exports_failed.load(Ordering::Relaxed),
        }
    }
}

fn summarize(events: &[&MetricEvent]) -> BackendSummary {
    let calls = events.len() as u64;
    let successful = events.iter().filter(|e| e.success).count() as u64;
    let latencies: Vec<u64> = events.iter().map(|e| e.latency_ms).collect();
    let avg_latency_ms = if latencies.is_empty() {
        0.0
    } else {
        latencies.iter().sum::<u64>() as f64 / latencies.len() as f64
    };

    BackendSummary {
        calls,
        successful,
        failed: calls - successful,
        avg_latency_ms,
        min_latency_ms: latencies.iter().copied().min().unwrap_or(0),
        max_latency_ms: latencies.iter().copied().max().unwrap_or(0),
        success_rate: if calls > 0 {
            successful as f64 / calls as f64
        } else {
            0.0
        },
    }
}
