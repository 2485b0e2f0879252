//! Shared types for the traits module.
//!
//! - [`CompletionRequest`]: one prompt sent to a model backend
//! - [`ResponseFormat`]: optional JSON Schema for structured output
//! - [`CompletionResponse`]: raw text returned by a backend

use schemars::JsonSchema;

/// System prompt sent with every hosted request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// JSON Schema the backend should constrain its output to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseFormat {
    /// Schema name (hosted APIs require one).
    pub name: String,
    /// The JSON Schema document.
    pub schema: serde_json::Value,
}

impl ResponseFormat {
    /// Derive a response format from a Rust type.
    ///
    /// # Example
    ///
    /// ```
    /// use scenario_timeline::traits::ResponseFormat;
    /// use scenario_timeline::scenarios::EtaEstimate;
    ///
    /// let format = ResponseFormat::for_type::<EtaEstimate>("eta");
    /// assert_eq!(format.name, "eta");
    /// assert_eq!(format.schema["type"], "object");
    /// ```
    #[must_use]
    pub fn for_type<T: JsonSchema>(name: impl Into<String>) -> Self {
        let schema = schemars::schema_for!(T);
        Self {
            name: name.into(),
            schema: serde_json::to_value(&schema).unwrap_or(serde_json::Value::Null),
        }
    }
}

/// A single completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// The user prompt.
    pub prompt: String,
    /// System prompt (hosted backend only).
    pub system_prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Structured output constraint, if any.
    pub response_format: Option<ResponseFormat>,
}

impl CompletionRequest {
    /// Create a free-text request with default system prompt and temperature.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            response_format: None,
        }
    }

    /// Constrain the output to a JSON Schema.
    #[must_use]
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Set the temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Completion response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Response text, reassembled from fragments for the local backend.
    pub content: String,
    /// Which backend answered (`hosted` or `local`).
    pub backend: &'static str,
}

impl CompletionResponse {
    /// Create a new completion response.
    #[must_use]
    pub fn new(content: impl Into<String>, backend: &'static str) -> Self {
        Self {
            content: content.into(),
            backend,
        }
    }
}
