//! Search result entities

use serde::{Deserialize, Serialize};

/// A single hit from a web search index, before its page is scraped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, url: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

/// One result returned by a search tool.
///
/// `source` locates the result: a URL for web results, a document path or
/// name for document results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub content: String,
    pub source: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            source: source.into(),
        }
    }
}

/// Results of one tool call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults(Vec<SearchResult>);

impl SearchResults {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self(results)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchResult> {
        self.0.iter()
    }

    /// Text block handed to synthesis.
    pub fn to_text_block(&self) -> String {
        let entries = self
            .0
            .iter()
            .map(|r| format!("Title: {}\nContent: {}\nURL: {}", r.title, r.content, r.source))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("SearchResults:\n{}", entries)
    }
}

impl From<Vec<SearchResult>> for SearchResults {
    fn from(results: Vec<SearchResult>) -> Self {
        Self(results)
    }
}

impl IntoIterator for SearchResults {
    type Item = SearchResult;
    type IntoIter = std::vec::IntoIter<SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
