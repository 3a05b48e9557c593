//! Search ports
//!
//! Clients for the web search index, the problem's document index and
//! page scraping.

use async_trait::async_trait;
use proposal_domain::{ProblemId, SearchHit, SearchResult};
use thiserror::Error;

/// Errors raised by search clients and scrapers
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Client for an external web search index.
#[async_trait]
pub trait WebSearchClient: Send + Sync {
    /// Up to `limit` hits for `query`.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError>;
}

/// Client for similarity search over a problem's documents.
#[async_trait]
pub trait DocumentSearchClient: Send + Sync {
    /// The `top_k` passages most similar to `embedding`.
    async fn search(
        &self,
        problem_id: &ProblemId,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>, SearchError>;
}

/// Fetches a page and extracts its readable text.
#[async_trait]
pub trait PageScraper: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<String, SearchError>;
}
