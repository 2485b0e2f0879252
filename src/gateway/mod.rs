//! Model gateway.
//!
//! This module provides:
//! - [`HostedClient`]: OpenAI-compatible chat completions
//! - [`LocalClient`]: local NDJSON text completions
//! - [`ModelGateway`]: whichever of the two the configuration selects
//!
//! Every call issues exactly one HTTP request. There are no retries; a
//! request timeout bounds a hung upstream.
//!
//! # Example
//!
//! ```
//! use scenario_timeline::config::Config;
//! use scenario_timeline::gateway::ModelGateway;
//!
//! let config = Config {
//!     api_url: Some("http://localhost:11434/api/generate".into()),
//!     model_name: Some("llama3".into()),
//!     ..Config::default()
//! };
//! let gateway = ModelGateway::from_config(&config).unwrap();
//! assert_eq!(gateway.backend_name(), "local");
//! ```

mod hosted;
mod local;
mod ndjson;
mod types;

pub use hosted::{HostedClient, HOSTED_BACKEND};
pub use local::{LocalClient, LOCAL_BACKEND};
pub use ndjson::{parse_ndjson_line, ResponseAccumulator};
pub use types::{
    ApiResponseFormat, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice,
    ChoiceMessage, GenerateRequest, NamedSchema,
};

use async_trait::async_trait;

use crate::config::{BackendConfig, Config};
use crate::error::GatewayError;
use crate::traits::{CompletionRequest, CompletionResponse, ModelClient};

/// Backend name reported when nothing is configured.
pub const NO_BACKEND: &str = "none";

/// Maximum number of error body bytes kept in [`GatewayError::Status`].
const MAX_ERROR_BODY: usize = 500;

/// The configured model backend.
#[derive(Debug, Clone)]
pub enum ModelGateway {
    /// OpenAI-compatible hosted API.
    Hosted(HostedClient),
    /// Local NDJSON endpoint.
    Local(LocalClient),
    /// No backend configured; every call fails with [`GatewayError::NotConfigured`].
    Unconfigured,
}

impl ModelGateway {
    /// Build the gateway selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let timeout_ms = config.request_timeout_ms;
        match config.backend() {
            Some(BackendConfig::Hosted {
                api_key,
                model,
                base_url,
            }) => Ok(Self::Hosted(HostedClient::new(
                api_key, model, base_url, timeout_ms,
            )?)),
            Some(BackendConfig::Local { url, model }) => {
                Ok(Self::Local(LocalClient::new(url, model, timeout_ms)?))
            }
            None => {
                tracing::warn!(
                    "No model backend configured (set OPENAI_API_KEY + OPENAI_MODEL or API_URL)"
                );
                Ok(Self::Unconfigured)
            }
        }
    }

    /// Short backend name for logs and metrics.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Hosted(_) => HOSTED_BACKEND,
            Self::Local(_) => LOCAL_BACKEND,
            Self::Unconfigured => NO_BACKEND,
        }
    }
}

#[async_trait]
impl ModelClient for ModelGateway {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        match self {
            Self::Hosted(client) => client.complete(request).await,
            Self::Local(client) => client.complete(request).await,
            Self::Unconfigured => Err(GatewayError::NotConfigured),
        }
    }
}

/// Map a reqwest transport error to a gateway error.
pub(crate) fn map_send_error(e: &reqwest::Error, url: &str, timeout_ms: u64) -> GatewayError {
    if e.is_timeout() {
        tracing::error!(url = %url, timeout_ms = timeout_ms, "Model request timed out");
        GatewayError::Timeout { timeout_ms }
    } else {
        tracing::error!(url = %url, error = %e, "Model request failed");
        GatewayError::Network {
            message: e.to_string(),
        }
    }
}

/// Pass through 2xx responses; map everything else to a typed error.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();

    if status.as_u16() == 401 {
        return Err(GatewayError::AuthenticationFailed);
    }

    if status.as_u16() == 429 {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);
        return Err(GatewayError::RateLimited {
            retry_after_seconds: retry_after,
        });
    }

    if !status.is_success() {
        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|i| body.is_char_boundary(*i))
                .unwrap_or(0);
            body.truncate(cut);
        }
        return Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}
