//! Google Custom Search JSON API client.

use super::map_reqwest_error;
use async_trait::async_trait;
use proposal_application::ports::search::{SearchError, WebSearchClient};
use proposal_domain::SearchHit;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// The API returns at most this many items per request.
const MAX_NUM: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
}

/// Keeps up to `limit` items, preferring links to `.html` pages when any
/// are present.
fn select_hits(items: Vec<SearchItem>, limit: usize) -> Vec<SearchHit> {
    let html: Vec<SearchItem> = items
        .iter()
        .filter(|item| item.link.to_lowercase().ends_with(".html"))
        .cloned()
        .collect();
    let source = if html.is_empty() { items } else { html };
    source
        .into_iter()
        .take(limit)
        .map(|item| SearchHit::new(item.title, item.link, item.snippet))
        .collect()
}

/// Web search through a Programmable Search Engine.
pub struct GoogleWebSearchClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

impl GoogleWebSearchClient {
    pub fn new(
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Other(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl WebSearchClient for GoogleWebSearchClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        let num = limit.clamp(1, MAX_NUM).to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;
        let hits = select_hits(body.items, limit);
        debug!("Web search '{}' returned {} hits", query, hits.len());
        Ok(hits)
    }
}
