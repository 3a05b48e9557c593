//! Agent parameters: models and limits for one proposal run.

use proposal_domain::{ActionKind, ModelSelector, Provider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hard upper bound on search topics per decomposition.
pub const MAX_TOPICS: usize = 5;

/// How search actions are offered to the orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// A single function-calling search per action (`search`).
    Simple,
    /// Topic decomposition with parallel exploration
    /// (`externalSearch`, `internalSearch`).
    #[default]
    Decomposed,
}

impl SearchMode {
    /// Actions the orchestrator may choose from in this mode.
    pub fn catalog(&self) -> Vec<ActionKind> {
        let mut catalog = vec![ActionKind::Plan];
        match self {
            SearchMode::Simple => catalog.push(ActionKind::Search),
            SearchMode::Decomposed => {
                catalog.push(ActionKind::ExternalSearch);
                catalog.push(ActionKind::InternalSearch);
            }
        }
        catalog.extend([
            ActionKind::Analyze,
            ActionKind::Write,
            ActionKind::Review,
            ActionKind::Done,
        ]);
        catalog
    }
}

/// Which model serves which role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAssignment {
    /// Orchestrator, skipper, terminator and goal generation.
    pub decision: ModelSelector,
    /// Action executors and the search pipeline.
    pub executor: ModelSelector,
    /// History compaction and token counting.
    pub summarizer: ModelSelector,
    /// Query embeddings for document search.
    pub embedding: ModelSelector,
}

impl Default for ModelAssignment {
    fn default() -> Self {
        Self {
            decision: ModelSelector::gemini("gemini-2.5-flash"),
            executor: ModelSelector::gemini("gemini-2.5-flash"),
            summarizer: ModelSelector::gemini("gemini-2.5-flash"),
            embedding: ModelSelector::gemini("gemini-embedding-001"),
        }
    }
}

/// Token thresholds above which the history is compacted.
///
/// Lookup order: per-model override, per-provider override, provider default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarizeThresholds {
    #[serde(default)]
    pub providers: HashMap<Provider, u64>,
    #[serde(default)]
    pub models: HashMap<String, u64>,
}

impl SummarizeThresholds {
    pub fn threshold_for(&self, model: &ModelSelector) -> u64 {
        self.models
            .get(&model.model)
            .or_else(|| self.providers.get(&model.provider))
            .copied()
            .unwrap_or_else(|| model.provider.default_summarize_threshold())
    }

    pub fn with_model(mut self, model: impl Into<String>, threshold: u64) -> Self {
        self.models.insert(model.into(), threshold);
        self
    }

    pub fn with_provider(mut self, provider: Provider, threshold: u64) -> Self {
        self.providers.insert(provider, threshold);
        self
    }
}

/// Parameters of a proposal run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentParams {
    pub models: ModelAssignment,
    /// Sampling temperature for every generation call.
    pub temperature: f32,
    /// Iteration ceiling enforced by the terminator.
    pub max_iterations: usize,
    /// Topics per decomposition, capped at [`MAX_TOPICS`].
    pub max_topics: usize,
    /// Web results fetched per web search.
    pub web_results: usize,
    /// Passages returned per document search.
    pub document_top_k: usize,
    pub search_mode: SearchMode,
    pub summarize_thresholds: SummarizeThresholds,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            models: ModelAssignment::default(),
            temperature: 0.0,
            max_iterations: 3,
            max_topics: MAX_TOPICS,
            web_results: 5,
            document_top_k: 5,
            search_mode: SearchMode::default(),
            summarize_thresholds: SummarizeThresholds::default(),
        }
    }
}

impl AgentParams {
    // ==================== Builder Methods ====================

    pub fn with_models(mut self, models: ModelAssignment) -> Self {
        self.models = models;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_max_topics(mut self, max: usize) -> Self {
        self.max_topics = max;
        self
    }

    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    pub fn with_summarize_thresholds(mut self, thresholds: SummarizeThresholds) -> Self {
        self.summarize_thresholds = thresholds;
        self
    }

    /// Topic bound actually applied by the search pipeline.
    pub fn effective_max_topics(&self) -> usize {
        self.max_topics.clamp(1, MAX_TOPICS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = AgentParams::default();
        assert_eq!(params.max_iterations, 3);
        assert_eq!(params.max_topics, 5);
        assert_eq!(params.temperature, 0.0);
        assert_eq!(params.search_mode, SearchMode::Decomposed);
    }

    #[test]
    fn test_effective_max_topics_capped() {
        assert_eq!(AgentParams::default().with_max_topics(12).effective_max_topics(), 5);
        assert_eq!(AgentParams::default().with_max_topics(0).effective_max_topics(), 1);
        assert_eq!(AgentParams::default().with_max_topics(3).effective_max_topics(), 3);
    }

    #[test]
    fn test_catalog_per_mode() {
        let simple = SearchMode::Simple.catalog();
        assert!(simple.contains(&ActionKind::Search));
        assert!(!simple.contains(&ActionKind::ExternalSearch));

        let decomposed = SearchMode::Decomposed.catalog();
        assert!(decomposed.contains(&ActionKind::ExternalSearch));
        assert!(decomposed.contains(&ActionKind::InternalSearch));
        assert!(!decomposed.contains(&ActionKind::Search));
        assert_eq!(decomposed.last(), Some(&ActionKind::Done));
    }

    #[test]
    fn test_threshold_lookup_order() {
        let gemini = ModelSelector::gemini("gemini-2.5-pro");
        let openai = ModelSelector::new(Provider::OpenAi, "gpt-4.1");

        let thresholds = SummarizeThresholds::default();
        assert_eq!(thresholds.threshold_for(&gemini), 1_000_000);

        let thresholds = thresholds
            .with_provider(Provider::Gemini, 500_000)
            .with_model("gpt-4.1", 120_000);
        assert_eq!(thresholds.threshold_for(&gemini), 500_000);
        assert_eq!(thresholds.threshold_for(&openai), 120_000);
    }
}
