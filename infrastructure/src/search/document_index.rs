//! In-memory document index with cosine similarity search.

use async_trait::async_trait;
use proposal_application::ports::llm_client::{LlmClient, LlmError};
use proposal_application::ports::search::{DocumentSearchClient, SearchError};
use proposal_domain::{ModelSelector, ProblemId, SearchResult, chunk_text};
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone)]
struct IndexedChunk {
    title: String,
    source: String,
    /// Context returned with a match.
    parent_content: String,
    embedding: Vec<f32>,
}

/// Chunk embeddings of each problem's documents, searched by brute force.
#[derive(Default)]
pub struct InMemoryDocumentIndex {
    chunks: RwLock<HashMap<ProblemId, Vec<IndexedChunk>>>,
}

impl InMemoryDocumentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks `text`, embeds every chunk with `embedder` and indexes the
    /// chunks under `problem_id`. Returns the number of chunks added.
    pub async fn add_document<L: LlmClient + ?Sized>(
        &self,
        embedder: &L,
        model: &ModelSelector,
        problem_id: &ProblemId,
        title: &str,
        source: &str,
        text: &str,
    ) -> Result<usize, LlmError> {
        let mut indexed = Vec::new();
        for chunk in chunk_text(text) {
            let embedding = embedder.generate_embedding(model, &chunk.content).await?;
            indexed.push(IndexedChunk {
                title: title.to_string(),
                source: source.to_string(),
                parent_content: chunk.parent_content,
                embedding,
            });
        }

        let added = indexed.len();
        self.chunks
            .write()
            .await
            .entry(problem_id.clone())
            .or_default()
            .extend(indexed);
        info!("Indexed {} chunks of '{}' for {}", added, title, problem_id);
        Ok(added)
    }

    pub async fn chunk_count(&self, problem_id: &ProblemId) -> usize {
        self.chunks
            .read()
            .await
            .get(problem_id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

/// Cosine similarity; zero vectors are similar to nothing.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl DocumentSearchClient for InMemoryDocumentIndex {
    async fn search(
        &self,
        problem_id: &ProblemId,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let chunks = self.chunks.read().await;
        let Some(chunks) = chunks.get(problem_id) else {
            return Ok(Vec::new());
        };

        let mut scored = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            if chunk.embedding.len() != embedding.len() {
                return Err(SearchError::InvalidResponse(format!(
                    "query embedding has {} dimensions, index has {}",
                    embedding.len(),
                    chunk.embedding.len()
                )));
            }
            scored.push((cosine_similarity(&chunk.embedding, embedding), chunk));
        }
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(_, chunk)| {
                SearchResult::new(
                    chunk.title.clone(),
                    chunk.parent_content.clone(),
                    chunk.source.clone(),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn index_with(chunks: Vec<(&str, Vec<f32>)>) -> InMemoryDocumentIndex {
        let index = InMemoryDocumentIndex::new();
        let indexed = chunks
            .into_iter()
            .map(|(title, embedding)| IndexedChunk {
                title: title.to_string(),
                source: format!("file://{title}.md"),
                parent_content: format!("{title} context"),
                embedding,
            })
            .collect();
        index
            .chunks
            .write()
            .await
            .insert(ProblemId::new("p-1"), indexed);
        index
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[tokio::test]
    async fn test_search_returns_top_k_by_similarity() {
        let index = index_with(vec![
            ("tariffs", vec![0.0, 1.0]),
            ("chargers", vec![1.0, 0.1]),
            ("grants", vec![0.7, 0.7]),
        ])
        .await;

        let results = index
            .search(&ProblemId::new("p-1"), &[1.0, 0.0], 2)
            .await
            .unwrap();

        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["chargers", "grants"]);
        assert_eq!(results[0].content, "chargers context");
        assert_eq!(results[0].source, "file://chargers.md");
    }

    #[tokio::test]
    async fn test_search_unknown_problem_is_empty() {
        let index = index_with(vec![("tariffs", vec![0.0, 1.0])]).await;
        let results = index
            .search(&ProblemId::new("other"), &[1.0, 0.0], 5)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_rejects_dimension_mismatch() {
        let index = index_with(vec![("tariffs", vec![0.0, 1.0])]).await;
        let err = index
            .search(&ProblemId::new("p-1"), &[1.0, 0.0, 0.0], 5)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidResponse(_)));
    }
}
