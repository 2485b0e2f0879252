//! In-memory store of the most recently generated scenarios.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use super::types::{sample_payload, ScenarioAggregate};

#[derive(Debug, Clone)]
struct Stored {
    aggregates: Vec<ScenarioAggregate>,
    stored_at: Instant,
}

/// Holds the last generated scenario aggregates.
///
/// Writes replace the whole set (last writer wins). With a non-zero TTL,
/// entries older than the TTL read as absent.
#[derive(Debug)]
pub struct ScenarioStore {
    inner: RwLock<Option<Stored>>,
    ttl: Option<Duration>,
}

impl Default for ScenarioStore {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ScenarioStore {
    /// Create an empty store. `ttl_secs == 0` disables expiry.
    #[must_use]
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            inner: RwLock::new(None),
            ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
        }
    }

    /// Replace the stored scenarios.
    pub fn replace(&self, aggregates: Vec<ScenarioAggregate>) {
        let stored = Stored {
            aggregates,
            stored_at: Instant::now(),
        };
        match self.inner.write() {
            Ok(mut guard) => *guard = Some(stored),
            Err(poison_error) => {
                tracing::warn!(
                    error = %poison_error,
                    "Writing scenarios through poisoned lock"
                );
                *poison_error.into_inner() = Some(stored);
            }
        }
    }

    /// Stored scenarios, or `None` if nothing (unexpired, non-empty) is stored.
    #[must_use]
    pub fn current(&self) -> Option<Vec<ScenarioAggregate>> {
        self.current_at(Instant::now())
    }

    /// Stored scenarios, falling back to the sample payload.
    #[must_use]
    pub fn current_or_sample(&self) -> Vec<ScenarioAggregate> {
        self.current().unwrap_or_else(sample_payload)
    }

    fn current_at(&self, now: Instant) -> Option<Vec<ScenarioAggregate>> {
        let guard = match self.inner.read() {
            Ok(guard) => guard,
            Err(poison_error) => {
                tracing::warn!(
                    error = %poison_error,
                    "Reading scenarios from poisoned lock, using recovered data"
                );
                poison_error.into_inner()
            }
        };
        let stored = guard.as_ref()?;

        if let Some(ttl) = self.ttl {
            if now.saturating_duration_since(stored.stored_at) > ttl {
                return None;
            }
        }
        if stored.aggregates.is_empty() {
            return None;
        }
        Some(stored.aggregates.clone())
    }
}
