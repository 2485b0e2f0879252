//! OpenAI-compatible chat completions backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::{check_status, map_send_error};
use crate::config::SecretString;
use crate::error::GatewayError;
use crate::traits::{CompletionRequest, CompletionResponse, ModelClient};

/// Backend name reported in logs and metrics.
pub const HOSTED_BACKEND: &str = "hosted";

/// Client for `POST {base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct HostedClient {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    timeout_ms: u64,
}

impl HostedClient {
    /// Create a new hosted client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if the HTTP client cannot be built.
    pub fn new(
        api_key: SecretString,
        model: impl Into<String>,
        base_url: impl Into<String>,
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
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms,
        })
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_body(&self, request: CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(request.system_prompt),
                ChatMessage::user(request.prompt),
            ],
            temperature: request.temperature,
            response_format: request.response_format.map(Into::into),
        }
    }
}

#[async_trait]
impl ModelClient for HostedClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_body(request);
        let start = std::time::Instant::now();

        tracing::debug!(
            url = %url,
            model = %self.model,
            structured = body.response_format.is_some(),
            timeout_ms = self.timeout_ms,
            "Starting hosted completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(&e, &url, self.timeout_ms))?;

        tracing::debug!(
            url = %url,
            status = %response.status(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Hosted completion response received"
        );

        let response = check_status(response).await?;

        let parsed: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| GatewayError::UnexpectedResponse {
                    message: format!("Failed to parse response: {e}"),
                })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::UnexpectedResponse {
                message: "Response contained no choices".into(),
            })?;

        Ok(CompletionResponse::new(
            choice.message.content.unwrap_or_default(),
            HOSTED_BACKEND,
        ))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unused_async
)]
mod tests {
    use super::*;
    use crate::traits::ResponseFormat;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_client(server: &MockServer) -> HostedClient {
        HostedClient::new(
            SecretString::new("test-api-key"),
            "gpt-4o-mini",
            server.uri(),
            5_000,
        )
        .unwrap()
    }

    fn success_body(text: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": text}}]
        })
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            HostedClient::new(SecretString::new("k"), "m", "http://localhost:1/v1/", 1000).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1/v1");
        assert_eq!(client.model(), "m");
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let client =
            HostedClient::new(SecretString::new("sk-hidden"), "m", "http://x", 1000).unwrap();
        assert!(!format!("{client:?}").contains("sk-hidden"));
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "temperature": 0.7,
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant."},
                    {"role": "user", "content": "Hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("[]")))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let response = client.complete(CompletionRequest::new("Hello")).await.unwrap();

        assert_eq!(response.content, "[]");
        assert_eq!(response.backend, HOSTED_BACKEND);
    }

    #[tokio::test]
    async fn test_complete_sends_response_format() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "response_format": {"type": "json_schema", "json_schema": {"name": "topics"}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("{}")))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let request = CompletionRequest::new("x").with_response_format(ResponseFormat {
            name: "topics".into(),
            schema: json!({"type": "object"}),
        });
        assert!(client.complete(request).await.is_ok());
    }

    #[tokio::test]
    async fn test_complete_null_content_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": [{"message": {"content": null}}]})),
            )
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let response = client.complete(CompletionRequest::new("x")).await.unwrap();
        assert_eq!(response.content, "");
    }

    #[tokio::test]
    async fn test_complete_no_choices() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let err = client.complete(CompletionRequest::new("x")).await.unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_complete_auth_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let err = client.complete(CompletionRequest::new("x")).await.unwrap_err();
        assert_eq!(err, GatewayError::AuthenticationFailed);
    }

    #[tokio::test]
    async fn test_complete_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .append_header("retry-after", "30")
                    .set_body_string("Rate limited"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        match client.complete(CompletionRequest::new("x")).await.unwrap_err() {
            GatewayError::RateLimited {
                retry_after_seconds,
            } => assert_eq!(retry_after_seconds, 30),
            e => panic!("Wrong error type: {e:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let err = client.complete(CompletionRequest::new("x")).await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::Status {
                status: 500,
                body: "boom".into()
            }
        );
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let err = client.complete(CompletionRequest::new("x")).await.unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_complete_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(success_body("late"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client =
            HostedClient::new(SecretString::new("k"), "m", server.uri(), 50).unwrap();
        let err = client.complete(CompletionRequest::new("x")).await.unwrap_err();
        assert_eq!(err, GatewayError::Timeout { timeout_ms: 50 });
    }

    #[tokio::test]
    async fn test_complete_unreachable() {
        let client = HostedClient::new(
            SecretString::new("k"),
            "m",
            "http://127.0.0.1:9",
            1_000,
        )
        .unwrap();
        let err = client.complete(CompletionRequest::new("x")).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Network { .. } | GatewayError::Timeout { .. }
        ));
    }
}
