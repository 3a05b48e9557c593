//! Gemini adapter for the [`LlmClient`](proposal_application::LlmClient) port.

mod client;
mod types;

pub use client::{DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_ENDPOINT, GeminiClient};
