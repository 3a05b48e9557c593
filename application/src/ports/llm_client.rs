//! LLM client port
//!
//! Defines the interface for calling a language model provider.

use async_trait::async_trait;
use proposal_domain::{ModelSelector, TokenCount, ToolCall, ToolDefinition};
use thiserror::Error;

/// Errors that can occur during model calls
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A single-turn generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: ModelSelector,
    pub temperature: f32,
    pub system_prompt: String,
    pub user_prompt: String,
}

impl GenerationRequest {
    pub fn new(
        model: ModelSelector,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            model,
            temperature: 0.0,
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Client for a language model provider
///
/// Every call is a single turn: system prompt plus one user prompt.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Free-text generation.
    async fn generate_text(&self, request: &GenerationRequest) -> Result<String, LlmError>;

    /// Schema-constrained generation. Returns the raw JSON text produced by
    /// the model; callers parse it into their own types.
    async fn generate_structured(
        &self,
        request: &GenerationRequest,
        schema: &serde_json::Value,
    ) -> Result<String, LlmError>;

    /// Function-calling generation over `tools`. `None` means the model
    /// declined to call any tool.
    async fn generate_function_call(
        &self,
        request: &GenerationRequest,
        tools: &[ToolDefinition],
    ) -> Result<Option<ToolCall>, LlmError>;

    /// Embedding of `text`.
    async fn generate_embedding(
        &self,
        model: &ModelSelector,
        text: &str,
    ) -> Result<Vec<f32>, LlmError>;

    /// Token count of `text` for `model`.
    async fn count_tokens(&self, model: &ModelSelector, text: &str)
    -> Result<TokenCount, LlmError>;
}
