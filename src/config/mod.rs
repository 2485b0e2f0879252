//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading (with `.env` support via `dotenvy`)
//! - Model backend selection (hosted vs local)
//! - Configuration validation
//! - Secure API key storage via [`SecretString`]
//!
//! # Example
//!
//! ```
//! use scenario_timeline::config::{BackendConfig, Config, SecretString};
//!
//! // Use Config::from_env() in production
//! let config = Config {
//!     openai_api_key: Some(SecretString::new("sk-example-key")),
//!     openai_model: Some("gpt-4o-mini".to_string()),
//!     ..Config::default()
//! };
//!
//! assert!(matches!(config.backend(), Some(BackendConfig::Hosted { .. })));
//! // API key is protected from accidental logging
//! let debug = format!("{:?}", config);
//! assert!(debug.contains("<REDACTED>"));
//! assert!(!debug.contains("sk-example-key"));
//! ```

mod secret;
mod validation;

pub use secret::SecretString;
pub use validation::{validate_config, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS};

use crate::error::ConfigError;

/// Default hosted API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3003;

/// Default Markdown log directory.
pub const DEFAULT_LOG_DIR: &str = "./logs";

/// Default directory holding `index.html`.
pub const DEFAULT_STATIC_DIR: &str = ".";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default outbound model request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 120_000;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// The model backend selected from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// OpenAI-compatible chat completions API.
    Hosted {
        /// API key (redacted in debug output).
        api_key: SecretString,
        /// Model name.
        model: String,
        /// API base URL, without the `/chat/completions` suffix.
        base_url: String,
    },
    /// Local NDJSON text-completion endpoint (Ollama `generate` style).
    Local {
        /// Full endpoint URL.
        url: String,
        /// Model identifier, omitted from the request when unset.
        model: Option<String>,
    },
}

impl BackendConfig {
    /// Short name used in logs and metrics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Hosted { .. } => "hosted",
            Self::Local { .. } => "local",
        }
    }
}

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
/// Empty environment values are treated as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Hosted API key (protected from logging via [`SecretString`]).
    pub openai_api_key: Option<SecretString>,
    /// Hosted model name.
    pub openai_model: Option<String>,
    /// Hosted API base URL.
    pub openai_base_url: String,
    /// Local endpoint URL.
    pub api_url: Option<String>,
    /// Local model identifier.
    pub model_name: Option<String>,
    /// Run the interactive terminal flow before serving.
    pub cli_mode: bool,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Directory for Markdown logs.
    pub log_dir: String,
    /// Directory holding the front-end `index.html`.
    pub static_dir: String,
    /// Log level (error, warn, info, debug, trace) or an `EnvFilter` directive.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Outbound model request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Lifetime of stored scenarios in seconds (0 = never expire).
    pub scenario_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            api_url: None,
            model_name: None,
            cli_mode: false,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_dir: DEFAULT_LOG_DIR.to_string(),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::Text,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            scenario_ttl_secs: 0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Backend variables (all optional):
    /// - `OPENAI_API_KEY` + `OPENAI_MODEL`: select the hosted backend
    /// - `OPENAI_BASE_URL`: hosted base URL (default: `https://api.openai.com/v1`)
    /// - `API_URL` + `MODEL_NAME`: local backend
    ///
    /// Other optional variables (with defaults):
    /// - `CLI_MODE`: `"true"` runs the terminal flow first (default: off)
    /// - `HOST` / `PORT`: bind address (default: `127.0.0.1:3003`)
    /// - `LOG_DIR`: Markdown log directory (default: `./logs`)
    /// - `STATIC_DIR`: directory holding `index.html` (default: `.`)
    /// - `LOG_LEVEL`: logging level (default: `info`)
    /// - `LOG_FORMAT`: `text` or `json` (default: `text`)
    /// - `REQUEST_TIMEOUT_MS`: model request timeout (default: `120000`)
    /// - `SCENARIO_TTL_SECS`: stored scenario lifetime (default: `0`, never expire)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse, `LOG_FORMAT`
    /// is unknown, or any value fails validation (see [`validate_config`]).
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let log_format = match env_non_empty("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    var: "LOG_FORMAT".into(),
                    reason: format!("must be text or json, got {other}"),
                })
            }
        };

        let config = Self {
            openai_api_key: env_non_empty("OPENAI_API_KEY").map(SecretString::new),
            openai_model: env_non_empty("OPENAI_MODEL"),
            openai_base_url: env_non_empty("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
            api_url: env_non_empty("API_URL"),
            model_name: env_non_empty("MODEL_NAME"),
            cli_mode: env_non_empty("CLI_MODE").as_deref() == Some("true"),
            host: env_non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port: parse_env_u16("PORT", DEFAULT_PORT)?,
            log_dir: env_non_empty("LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.into()),
            static_dir: env_non_empty("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.into()),
            log_level: env_non_empty("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.into()),
            log_format,
            request_timeout_ms: parse_env_u64("REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?,
            scenario_ttl_secs: parse_env_u64("SCENARIO_TTL_SECS", 0)?,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Select the model backend.
    ///
    /// The hosted backend wins when both its key and model are present;
    /// otherwise the local endpoint is used if `API_URL` is set.
    /// Returns `None` when neither is configured.
    #[must_use]
    pub fn backend(&self) -> Option<BackendConfig> {
        if let (Some(api_key), Some(model)) = (&self.openai_api_key, &self.openai_model) {
            return Some(BackendConfig::Hosted {
                api_key: api_key.clone(),
                model: model.clone(),
                base_url: self.openai_base_url.clone(),
            });
        }

        self.api_url.as_ref().map(|url| BackendConfig::Local {
            url: url.clone(),
            model: self.model_name.clone(),
        })
    }

    /// Socket address string for the HTTP listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an environment variable as u64, using a default if not set.
fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    env_non_empty(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}

/// Parse an environment variable as u16, using a default if not set.
fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    env_non_empty(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be an integer between 1 and 65535".into(),
        })
    })
}
