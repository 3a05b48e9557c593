//! Gemini client over the Generative Language REST API.

use super::types::{
    CountTokensResponse, EmbedContentResponse, GenerateContentResponse, count_tokens_body,
    embed_body, function_call_body, structured_body, text_body,
};
use async_trait::async_trait;
use proposal_application::ports::llm_client::{GenerationRequest, LlmClient, LlmError};
use proposal_domain::util::truncate_str;
use proposal_domain::{ModelSelector, TokenCount, ToolCall, ToolDefinition};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;

/// [`LlmClient`] backed by Gemini.
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    embedding_dimensions: usize,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::ConnectionError(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            embedding_dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_embedding_dimensions(mut self, dimensions: usize) -> Self {
        self.embedding_dimensions = dimensions;
        self
    }

    fn url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.endpoint, model, method)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        model: &str,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T, LlmError> {
        debug!("Gemini {} on {}", method, model);
        let response = self
            .client
            .post(self.url(model, method))
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                404 => LlmError::ModelNotAvailable(model.to_string()),
                code => LlmError::RequestFailed(format!(
                    "status {}: {}",
                    code,
                    truncate_str(&text, 500)
                )),
            });
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        body: serde_json::Value,
    ) -> Result<GenerateContentResponse, LlmError> {
        self.post(&request.model.model, "generateContent", &body)
            .await
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_text(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        self.generate(request, text_body(request)).await?.text()
    }

    async fn generate_structured(
        &self,
        request: &GenerationRequest,
        schema: &serde_json::Value,
    ) -> Result<String, LlmError> {
        self.generate(request, structured_body(request, schema))
            .await?
            .text()
    }

    async fn generate_function_call(
        &self,
        request: &GenerationRequest,
        tools: &[ToolDefinition],
    ) -> Result<Option<ToolCall>, LlmError> {
        if tools.is_empty() {
            return Ok(None);
        }
        self.generate(request, function_call_body(request, tools))
            .await?
            .function_call()
    }

    async fn generate_embedding(
        &self,
        model: &ModelSelector,
        text: &str,
    ) -> Result<Vec<f32>, LlmError> {
        let response: EmbedContentResponse = self
            .post(
                &model.model,
                "embedContent",
                &embed_body(&model.model, text, self.embedding_dimensions),
            )
            .await?;
        Ok(response.into_values())
    }

    async fn count_tokens(
        &self,
        model: &ModelSelector,
        text: &str,
    ) -> Result<TokenCount, LlmError> {
        let response: CountTokensResponse = self
            .post(&model.model, "countTokens", &count_tokens_body(text))
            .await?;
        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        let client = GeminiClient::new("key", Duration::from_secs(5))
            .unwrap()
            .with_endpoint("https://example.test/v1beta/");
        assert_eq!(
            client.url("gemini-2.5-flash", "generateContent"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
