//! History summarizer: keeps the prompt history within a token budget.

use crate::error::AgentError;
use crate::ports::llm_client::{GenerationRequest, LlmClient};
use proposal_domain::util::extract_urls;
use proposal_domain::{AgentPromptTemplate, ModelSelector};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct HistorySummarizer<L: LlmClient + 'static> {
    llm: Arc<L>,
    model: ModelSelector,
    temperature: f32,
    threshold: u64,
}

impl<L: LlmClient + 'static> HistorySummarizer<L> {
    pub fn new(llm: Arc<L>, model: ModelSelector) -> Self {
        let threshold = model.provider.default_summarize_threshold();
        Self {
            llm,
            model,
            temperature: 0.0,
            threshold,
        }
    }

    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Token-count check. Empty history never needs compaction.
    pub async fn needs_compaction(&self, history: &str) -> Result<bool, AgentError> {
        if history.trim().is_empty() {
            return Ok(false);
        }
        let count = self.llm.count_tokens(&self.model, history).await?;
        debug!(
            "History size: {} tokens (threshold {})",
            count.total_tokens, self.threshold
        );
        Ok(count.total_tokens > self.threshold)
    }

    /// Rewrites `history` to roughly two thirds of its length.
    ///
    /// The result keeps every URL of the input and is never longer than the
    /// input; see [`enforce_compaction_invariants`].
    pub async fn compact(&self, history: &str) -> Result<String, AgentError> {
        let request = GenerationRequest::new(
            self.model.clone(),
            AgentPromptTemplate::summarize_system(),
            AgentPromptTemplate::summarize_user(history),
        )
        .with_temperature(self.temperature);

        let rewritten = self.llm.generate_text(&request).await?;
        let compacted = enforce_compaction_invariants(history, rewritten.trim());
        info!(
            "Compacted history from {} to {} chars",
            history.chars().count(),
            compacted.chars().count()
        );
        Ok(compacted)
    }
}

/// After a failed compaction, the history must grow by this fraction
/// (1/4) before compaction is attempted again.
const RETRY_GROWTH_DIVISOR: usize = 4;

/// Remembers a compaction that could not shrink the history.
///
/// While the history has not grown by a quarter since then, neither the
/// token count nor the rewrite is repeated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompactionBackoff {
    stalled_at: Option<usize>,
}

impl CompactionBackoff {
    pub fn should_attempt(&self, history_chars: usize) -> bool {
        match self.stalled_at {
            Some(stalled) => history_chars >= stalled + stalled / RETRY_GROWTH_DIVISOR,
            None => true,
        }
    }

    pub fn record_stall(&mut self, history_chars: usize) {
        self.stalled_at = Some(history_chars);
    }

    pub fn reset(&mut self) {
        self.stalled_at = None;
    }
}

/// Repairs a model rewrite so it keeps every URL of `original` and is not
/// longer than it.
///
/// URLs the rewrite dropped are appended as a `Sources:` list. If the
/// result is still longer than the original, or the rewrite is empty, the
/// original is returned unchanged.
pub fn enforce_compaction_invariants(original: &str, rewritten: &str) -> String {
    if rewritten.is_empty() {
        warn!("Compaction returned empty text; keeping original history");
        return original.to_string();
    }

    let missing: Vec<&str> = extract_urls(original)
        .into_iter()
        .filter(|url| !rewritten.contains(url))
        .collect();

    let mut compacted = rewritten.to_string();
    if !missing.is_empty() {
        debug!("Restoring {} URLs dropped by compaction", missing.len());
        compacted.push_str("\n\nSources:");
        for url in missing {
            compacted.push_str("\n- ");
            compacted.push_str(url);
        }
    }

    if compacted.chars().count() > original.chars().count() {
        warn!("Compaction did not shrink the history; keeping original");
        return original.to_string();
    }
    compacted
}
