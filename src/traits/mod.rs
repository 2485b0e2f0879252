//! Trait definitions for mockable dependencies.
//!
//! This module defines traits for:
//! - [`ModelClient`]: model backend abstraction
//! - [`TimeProvider`]: clock abstraction (current year, log timestamps)
//!
//! # Mocking
//!
//! Both traits are annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates mock implementations automatically for testing.
//!
//! # Example
//!
//! ```
//! use chrono::Datelike;
//! use scenario_timeline::traits::{RealTimeProvider, TimeProvider};
//!
//! let year = RealTimeProvider.now().year();
//! assert!(year >= 2024);
//! ```

mod types;

pub use types::{
    CompletionRequest, CompletionResponse, ResponseFormat, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TEMPERATURE,
};

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::error::GatewayError;

/// Model backend trait for mocking.
///
/// One call issues exactly one upstream HTTP request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send a completion request to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the backend is unreachable, answers with a
    /// non-2xx status, or returns a body that cannot be read.
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, GatewayError>;
}

/// Time provider trait for deterministic testing.
#[cfg_attr(test, mockall::automock)]
pub trait TimeProvider: Send + Sync {
    /// Get the current local time.
    fn now(&self) -> DateTime<Local>;
}

/// Real time provider using the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
