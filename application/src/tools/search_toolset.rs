//! The search toolset: `web_search` and `document_search`.
//!
//! `web_search` asks the web index for up to `web_results` hits and scrapes
//! every hit concurrently, one task per URL. A failed scrape drops that hit
//! only. `document_search` embeds the query and looks up the `top_k` most
//! similar passages of the problem's documents.

use crate::ports::llm_client::LlmClient;
use crate::ports::search::{DocumentSearchClient, PageScraper, WebSearchClient};
use crate::ports::tool_executor::ToolExecutorPort;
use async_trait::async_trait;
use proposal_domain::tool::{DOCUMENT_SEARCH, WEB_SEARCH, document_search_tool, web_search_tool};
use proposal_domain::util::truncate_chars;
use proposal_domain::{
    ModelSelector, ProblemId, SearchResult, SearchResults, ToolCall, ToolDefinition, ToolError,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Default maximum characters kept from a scraped page.
pub const DEFAULT_MAX_PAGE_CHARS: usize = 5000;

struct WebBackend {
    index: Arc<dyn WebSearchClient>,
    scraper: Arc<dyn PageScraper>,
}

struct DocumentBackend {
    index: Arc<dyn DocumentSearchClient>,
    embedder: Arc<dyn LlmClient>,
    embedding_model: ModelSelector,
}

/// Search tools over the configured backends. A tool is only offered when
/// its backend is configured.
pub struct SearchToolset {
    web: Option<WebBackend>,
    documents: Option<DocumentBackend>,
    web_results: usize,
    top_k: usize,
    max_page_chars: usize,
}

impl Default for SearchToolset {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchToolset {
    pub fn new() -> Self {
        Self {
            web: None,
            documents: None,
            web_results: 5,
            top_k: 5,
            max_page_chars: DEFAULT_MAX_PAGE_CHARS,
        }
    }

    pub fn with_web(
        mut self,
        index: Arc<dyn WebSearchClient>,
        scraper: Arc<dyn PageScraper>,
    ) -> Self {
        self.web = Some(WebBackend { index, scraper });
        self
    }

    pub fn with_documents(
        mut self,
        index: Arc<dyn DocumentSearchClient>,
        embedder: Arc<dyn LlmClient>,
        embedding_model: ModelSelector,
    ) -> Self {
        self.documents = Some(DocumentBackend {
            index,
            embedder,
            embedding_model,
        });
        self
    }

    pub fn with_web_results(mut self, n: usize) -> Self {
        self.web_results = n;
        self
    }

    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    pub fn with_max_page_chars(mut self, max: usize) -> Self {
        self.max_page_chars = max;
        self
    }

    async fn web_search(&self, web: &WebBackend, query: &str) -> Result<SearchResults, ToolError> {
        let hits = web
            .index
            .search(query, self.web_results)
            .await
            .map_err(|e| ToolError::execution_failed(format!("web search failed: {}", e)))?;
        debug!("web_search '{}' returned {} hits", query, hits.len());

        let mut join_set = JoinSet::new();
        for (index, hit) in hits.into_iter().enumerate() {
            let scraper = Arc::clone(&web.scraper);
            join_set.spawn(async move {
                let page = scraper.scrape(&hit.url).await;
                (index, hit, page)
            });
        }

        let mut scraped = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, hit, Ok(text))) => {
                    let content = truncate_chars(&text, self.max_page_chars).to_string();
                    scraped.push((index, SearchResult::new(hit.title, content, hit.url)));
                }
                Ok((_, hit, Err(e))) => warn!("Scrape of {} failed: {}", hit.url, e),
                Err(e) => warn!("Scrape task join error: {}", e),
            }
        }
        scraped.sort_by_key(|(index, _)| *index);

        Ok(scraped.into_iter().map(|(_, result)| result).collect::<Vec<_>>().into())
    }

    async fn document_search(
        &self,
        documents: &DocumentBackend,
        problem_id: &ProblemId,
        query: &str,
    ) -> Result<SearchResults, ToolError> {
        let embedding = documents
            .embedder
            .generate_embedding(&documents.embedding_model, query)
            .await
            .map_err(|e| ToolError::execution_failed(format!("embedding failed: {}", e)))?;

        let results = documents
            .index
            .search(problem_id, &embedding, self.top_k)
            .await
            .map_err(|e| ToolError::execution_failed(format!("document search failed: {}", e)))?;
        debug!("document_search '{}' returned {} passages", query, results.len());
        Ok(SearchResults::new(results))
    }
}

#[async_trait]
impl ToolExecutorPort for SearchToolset {
    fn definitions(&self) -> Vec<ToolDefinition> {
        let mut tools = Vec::new();
        if self.web.is_some() {
            tools.push(web_search_tool());
        }
        if self.documents.is_some() {
            tools.push(document_search_tool());
        }
        tools
    }

    async fn execute(
        &self,
        problem_id: &ProblemId,
        call: &ToolCall,
    ) -> Result<SearchResults, ToolError> {
        let query = call
            .require_string("query")
            .map_err(ToolError::invalid_argument)?;

        match (call.tool_name.as_str(), &self.web, &self.documents) {
            (WEB_SEARCH, Some(web), _) => self.web_search(web, query).await,
            (DOCUMENT_SEARCH, _, Some(documents)) => {
                self.document_search(documents, problem_id, query).await
            }
            (name, _, _) => Err(ToolError::not_found(name)),
        }
    }
}
