//! Configuration validation.
//!
//! Range checks applied after [`Config::from_env`](super::Config::from_env)
//! has parsed every variable.

use super::Config;
use crate::error::ConfigError;

/// Minimum allowed model request timeout in milliseconds (1 second).
pub const MIN_TIMEOUT_MS: u64 = 1000;

/// Maximum allowed model request timeout in milliseconds (10 minutes).
pub const MAX_TIMEOUT_MS: u64 = 600_000;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `REQUEST_TIMEOUT_MS` must be between 1000 and 600000
/// - `PORT` must not be 0
/// - `LOG_DIR` must not be empty
/// - `OPENAI_BASE_URL` and `API_URL` must be http(s) URLs
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.request_timeout_ms < MIN_TIMEOUT_MS || config.request_timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::InvalidValue {
            var: "REQUEST_TIMEOUT_MS".into(),
            reason: format!("must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms"),
        });
    }

    if config.port == 0 {
        return Err(ConfigError::InvalidValue {
            var: "PORT".into(),
            reason: "must not be 0".into(),
        });
    }

    if config.log_dir.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "LOG_DIR".into(),
            reason: "must not be empty".into(),
        });
    }

    check_http_url("OPENAI_BASE_URL", &config.openai_base_url)?;
    if let Some(url) = &config.api_url {
        check_http_url("API_URL", url)?;
    }

    Ok(())
}

fn check_http_url(var: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            var: var.into(),
            reason: format!("must start with http:// or https://, got {url}"),
        })
    }
}
