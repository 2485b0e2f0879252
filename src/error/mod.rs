//! Error types for the scenario timeline backend.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`GatewayError`]: Model backend (hosted or local) errors
//! - [`StorageError`]: Markdown log file errors
//! - [`ScenarioError`]: Scenario elaboration errors
//! - [`ConfigError`]: Configuration errors
//! - [`ApiError`]: HTTP-facing errors rendered as JSON bodies
//!
//! All errors implement `Send + Sync` for async compatibility.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Top-level application error.
///
/// This is the main error type returned by public API functions.
/// It wraps all subsystem errors for unified error handling.
#[derive(Debug, Error)]
pub enum AppError {
    /// Model gateway error.
    #[error("Model gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Scenario elaboration error.
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server I/O error (bind, accept, shutdown).
    #[error("Server error: {message}")]
    Server {
        /// Description of the server failure.
        message: String,
    },
}

/// Model gateway errors.
///
/// These errors represent failures when talking to either model backend.
/// The scenario request path never surfaces them; it degrades to empty text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Neither the hosted nor the local backend is configured.
    #[error("No model backend configured")]
    NotConfigured,

    /// Authentication failed due to an invalid API key.
    #[error("Authentication failed: invalid API key")]
    AuthenticationFailed,

    /// Request was rate limited.
    #[error("Rate limited: retry after {retry_after_seconds}s")]
    RateLimited {
        /// Seconds the backend asked us to wait.
        retry_after_seconds: u64,
    },

    /// Request timed out.
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// Network communication error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error.
        message: String,
    },

    /// Non-2xx status from the backend.
    #[error("Backend returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (may be empty).
        body: String,
    },

    /// Unexpected response shape from the backend.
    #[error("Unexpected response: {message}")]
    UnexpectedResponse {
        /// Description of what was unexpected.
        message: String,
    },
}

/// Storage errors.
///
/// These errors represent failures reading or writing Markdown log files.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Failed to create the log directory.
    #[error("Failed to create directory {path}: {message}")]
    CreateDirFailed {
        /// Directory path.
        path: String,
        /// Description of the failure.
        message: String,
    },

    /// Failed to write a log file.
    #[error("Failed to write {path}: {message}")]
    WriteFailed {
        /// File path.
        path: String,
        /// Description of the failure.
        message: String,
    },

    /// Failed to read a log file.
    #[error("Failed to read {path}: {message}")]
    ReadFailed {
        /// File path.
        path: String,
        /// Description of the failure.
        message: String,
    },

    /// Log file not found (or the name was rejected).
    #[error("Log not found: {filename}")]
    NotFound {
        /// The requested file name.
        filename: String,
    },
}

/// Scenario elaboration errors.
///
/// Raised by the CLI flow, where model output must match a fixed schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    /// The model call failed.
    #[error("Model call failed: {0}")]
    Gateway(#[from] GatewayError),

    /// JSON parsing failed.
    #[error("JSON parsing failed: {message}")]
    JsonParseFailed {
        /// Description of the parsing error.
        message: String,
    },

    /// The model returned no topics to choose from.
    #[error("No topics returned")]
    NoTopics,

    /// Terminal I/O failed.
    #[error("Terminal I/O failed: {message}")]
    Io {
        /// Description of the I/O error.
        message: String,
    },
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}

/// HTTP-facing errors.
///
/// Each variant maps to a status code and a JSON `{"error": ...}` body,
/// except [`ApiError::NotFound`] which answers with plain text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request validation failed (400).
    #[error("{message}")]
    BadRequest {
        /// Message returned to the client.
        message: String,
    },

    /// Resource not found (404).
    #[error("{message}")]
    NotFound {
        /// Message returned to the client.
        message: String,
    },

    /// Internal failure (500). Only the export path produces this.
    #[error("{message}")]
    Internal {
        /// Message returned to the client.
        message: String,
    },
}

impl ApiError {
    /// Creates a 400 error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a 404 error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a 500 error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::NotFound { message } => (status, message).into_response(),
            Self::BadRequest { message } | Self::Internal { message } => {
                (status, Json(serde_json::json!({ "error": message }))).into_response()
            }
        }
    }
}
