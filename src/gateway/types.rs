//! Wire types for the two model backends.

use serde::{Deserialize, Serialize};

use crate::traits::ResponseFormat;

// ============================================================================
// Hosted (OpenAI-compatible chat completions)
// ============================================================================

/// Chat completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model name.
    pub model: String,
    /// System and user messages.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Structured output constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ApiResponseFormat>,
}

/// One chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// `system` or `user`.
    pub role: &'static str,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    /// A user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// `response_format` object for JSON Schema structured outputs.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponseFormat {
    /// Always `json_schema`.
    #[serde(rename = "type")]
    pub type_: &'static str,
    /// Named schema.
    pub json_schema: NamedSchema,
}

/// Schema with the name the hosted API requires.
#[derive(Debug, Clone, Serialize)]
pub struct NamedSchema {
    /// Schema name.
    pub name: String,
    /// JSON Schema document.
    pub schema: serde_json::Value,
}

impl From<ResponseFormat> for ApiResponseFormat {
    fn from(format: ResponseFormat) -> Self {
        Self {
            type_: "json_schema",
            json_schema: NamedSchema {
                name: format.name,
                schema: format.schema,
            },
        }
    }
}

/// Chat completion response body (only the fields we read).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion choices.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The assistant message.
    pub message: ChoiceMessage,
}

/// Assistant message content.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// Text content; may be null.
    #[serde(default)]
    pub content: Option<String>,
}

// ============================================================================
// Local (Ollama-style generate endpoint)
// ============================================================================

/// Text-completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// The prompt.
    pub prompt: String,
    /// JSON Schema for structured output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_omits_absent_format() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage::system("s"), ChatMessage::user("u")],
            temperature: 0.7,
            response_format: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("response_format").is_none());
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "u");
    }

    #[test]
    fn test_response_format_conversion() {
        let format = ResponseFormat {
            name: "eta".into(),
            schema: json!({"type": "object"}),
        };
        let value = serde_json::to_value(ApiResponseFormat::from(format)).unwrap();
        assert_eq!(
            value,
            json!({"type": "json_schema", "json_schema": {"name": "eta", "schema": {"type": "object"}}})
        );
    }

    #[test]
    fn test_chat_response_null_content() {
        let response: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": null}}]})).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn test_chat_response_missing_choices() {
        let response: ChatCompletionResponse =
            serde_json::from_value(json!({"error": {"message": "bad"}})).unwrap();
        assert!(response.choices.is_empty());
    }

    #[test]
    fn test_generate_request_omits_model_when_unset() {
        let request = GenerateRequest {
            model: None,
            prompt: "p".into(),
            format: None,
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"prompt": "p"}));
    }
}
