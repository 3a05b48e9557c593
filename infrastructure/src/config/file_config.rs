//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into [`AgentParams`] once
//! validated.

use proposal_application::config::{
    AgentParams, MAX_TOPICS, ModelAssignment, SearchMode, SummarizeThresholds,
};
use crate::gemini::{DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_ENDPOINT};
use crate::search::DEFAULT_SEARCH_ENDPOINT;
use proposal_application::tools::search_toolset::DEFAULT_MAX_PAGE_CHARS;
use proposal_domain::{ModelSelector, Provider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("agent.max_iterations cannot be 0")]
    ZeroIterations,

    #[error("agent.max_topics must be between 1 and {MAX_TOPICS}, got {0}")]
    InvalidTopicCount(usize),

    #[error("model name cannot be empty ({0})")]
    EmptyModelName(&'static str),

    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("search.max_page_chars cannot be 0")]
    ZeroScrapeLength,

    #[error("search.timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// `[llm]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    pub provider: String,
    /// Model for the orchestrator, skipper, terminator and goal.
    pub decision_model: String,
    /// Model for action executors and the search pipeline.
    pub executor_model: String,
    /// Model for history compaction and token counting.
    pub summarizer_model: String,
    pub embedding_model: String,
    pub embedding_dimensions: usize,
    pub temperature: f32,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            decision_model: "gemini-2.5-flash".to_string(),
            executor_model: "gemini-2.5-flash".to_string(),
            summarizer_model: "gemini-2.5-flash".to_string(),
            embedding_model: "gemini-embedding-001".to_string(),
            embedding_dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            temperature: 0.0,
            api_key_env: "GEMINI_API_KEY".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 120,
        }
    }
}

/// `[agent]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub max_iterations: usize,
    pub max_topics: usize,
    pub search_mode: SearchMode,
    /// Compaction thresholds in tokens, keyed by provider name.
    pub summarize_thresholds: HashMap<String, u64>,
    /// Per-model overrides of `summarize_thresholds`.
    pub model_summarize_thresholds: HashMap<String, u64>,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            max_topics: MAX_TOPICS,
            search_mode: SearchMode::default(),
            summarize_thresholds: HashMap::new(),
            model_summarize_thresholds: HashMap::new(),
        }
    }
}

/// `[search]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Web hits fetched and scraped per web search.
    pub web_results: usize,
    pub document_top_k: usize,
    pub max_page_chars: usize,
    /// Timeout for search and scrape requests.
    pub timeout_seconds: u64,
    pub endpoint: String,
    pub api_key_env: String,
    pub engine_id_env: String,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            web_results: 5,
            document_top_k: 5,
            max_page_chars: DEFAULT_MAX_PAGE_CHARS,
            timeout_seconds: 10,
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            api_key_env: "GOOGLE_CSE_API_KEY".to_string(),
            engine_id_env: "GOOGLE_CSE_ID".to_string(),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL run event log. Disabled when unset.
    pub event_log: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub llm: FileLlmConfig,
    pub agent: FileAgentConfig,
    pub search: FileSearchConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.agent.max_iterations == 0 {
            return Err(ConfigValidationError::ZeroIterations);
        }
        if !(1..=MAX_TOPICS).contains(&self.agent.max_topics) {
            return Err(ConfigValidationError::InvalidTopicCount(
                self.agent.max_topics,
            ));
        }

        for (field, name) in [
            ("llm.decision_model", &self.llm.decision_model),
            ("llm.executor_model", &self.llm.executor_model),
            ("llm.summarizer_model", &self.llm.summarizer_model),
            ("llm.embedding_model", &self.llm.embedding_model),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName(field));
            }
        }

        self.provider()?;
        for provider in self.agent.summarize_thresholds.keys() {
            parse_provider(provider)?;
        }

        if self.search.max_page_chars == 0 {
            return Err(ConfigValidationError::ZeroScrapeLength);
        }
        if self.search.timeout_seconds == 0 || self.llm.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn provider(&self) -> Result<Provider, ConfigValidationError> {
        parse_provider(&self.llm.provider)
    }

    /// Run parameters described by this configuration.
    pub fn to_agent_params(&self) -> Result<AgentParams, ConfigValidationError> {
        self.validate()?;
        let provider = self.provider()?;
        let selector = |model: &str| ModelSelector::new(provider, model.trim());

        let mut thresholds = SummarizeThresholds::default();
        for (name, threshold) in &self.agent.summarize_thresholds {
            thresholds = thresholds.with_provider(parse_provider(name)?, *threshold);
        }
        for (model, threshold) in &self.agent.model_summarize_thresholds {
            thresholds = thresholds.with_model(model.clone(), *threshold);
        }

        let mut params = AgentParams::default()
            .with_models(ModelAssignment {
                decision: selector(&self.llm.decision_model),
                executor: selector(&self.llm.executor_model),
                summarizer: selector(&self.llm.summarizer_model),
                embedding: selector(&self.llm.embedding_model),
            })
            .with_temperature(self.llm.temperature)
            .with_max_iterations(self.agent.max_iterations)
            .with_max_topics(self.agent.max_topics)
            .with_search_mode(self.agent.search_mode)
            .with_summarize_thresholds(thresholds);
        params.web_results = self.search.web_results;
        params.document_top_k = self.search.document_top_k;
        Ok(params)
    }
}

fn parse_provider(name: &str) -> Result<Provider, ConfigValidationError> {
    Provider::from_str(name).map_err(|_| ConfigValidationError::UnknownProvider(name.to_string()))
}
