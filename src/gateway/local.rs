//! Local NDJSON text-completion backend (Ollama `generate` style).

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;

use super::ndjson::ResponseAccumulator;
use super::types::GenerateRequest;
use super::{check_status, map_send_error};
use crate::error::GatewayError;
use crate::traits::{CompletionRequest, CompletionResponse, ModelClient};

/// Backend name reported in logs and metrics.
pub const LOCAL_BACKEND: &str = "local";

/// Client for a local endpoint that streams `{"response": "..."}` lines.
#[derive(Debug, Clone)]
pub struct LocalClient {
    client: Client,
    url: String,
    model: Option<String>,
    timeout_ms: u64,
}

impl LocalClient {
    /// Create a new local client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if the HTTP client cannot be built.
    pub fn new(
        url: impl Into<String>,
        model: Option<String>,
        timeout_ms: u64,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| GatewayError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            url: url.into(),
            model,
            timeout_ms,
        })
    }

    /// Get the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ModelClient for LocalClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        let body = GenerateRequest {
            model: self.model.clone(),
            prompt: request.prompt,
            format: request.response_format.map(|f| f.schema),
        };

        tracing::debug!(
            url = %self.url,
            model = ?self.model,
            structured = body.format.is_some(),
            "Starting local completion request"
        );

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(&e, &self.url, self.timeout_ms))?;

        tracing::debug!(status = %response.status(), "Local completion response received");

        let response = check_status(response).await?;

        let mut stream = response.bytes_stream();
        let mut accumulator = ResponseAccumulator::new();
        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| map_send_error(&e, &self.url, self.timeout_ms))?;
            accumulator.push_bytes(&bytes);
        }

        Ok(CompletionResponse::new(accumulator.finish(), LOCAL_BACKEND))
    }
}
