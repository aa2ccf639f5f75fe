//! The contract between the pipeline and a generative-language service.
//!
//! The pipeline sends one [`InferenceRequest`] per document and gets back raw
//! text. That text is untrusted until [`parse_clauses`](crate::parse_clauses)
//! has validated it. There is exactly one attempt per request: a failure is
//! surfaced as [`InferenceError`] and the request ends there.

use async_trait::async_trait;

use crate::error::InferenceError;

/// Low temperature keeps extraction stable across runs.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8000;

/// Shape the service is asked to reply in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// A JSON document (`application/json`).
    StructuredJson,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::StructuredJson => "application/json",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub system_instruction: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub output_format: OutputFormat,
}

impl InferenceRequest {
    /// A structured-JSON request with the default sampling settings.
    pub fn structured(system_instruction: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_prompt: user_prompt.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            output_format: OutputFormat::StructuredJson,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// A generative-language backend.
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Run one request and return the raw reply text.
    async fn generate(&self, request: &InferenceRequest) -> Result<String, InferenceError>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}
