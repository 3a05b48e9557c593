//! Orchestrator: asks the model which action to run next.

use crate::config::SearchMode;
use crate::error::AgentError;
use crate::ports::llm_client::{GenerationRequest, LlmClient};
use crate::services::shared::generate_json;
use proposal_domain::{
    ActionDecision, ActionKind, AgentPromptTemplate, ModelSelector, RunState,
    select_least_frequent_action_excluding,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct RawDecision {
    action: String,
    #[serde(default)]
    reason: String,
}

/// Chooses the next action, by model or by the deterministic fallback.
pub struct Orchestrator<L: LlmClient + 'static> {
    llm: Arc<L>,
    model: ModelSelector,
    temperature: f32,
    catalog: Vec<ActionKind>,
}

impl<L: LlmClient + 'static> Orchestrator<L> {
    pub fn new(llm: Arc<L>, model: ModelSelector) -> Self {
        Self {
            llm,
            model,
            temperature: 0.0,
            catalog: SearchMode::default().catalog(),
        }
    }

    pub fn with_catalog(mut self, catalog: Vec<ActionKind>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn catalog(&self) -> &[ActionKind] {
        &self.catalog
    }

    fn schema(&self) -> serde_json::Value {
        let tags: Vec<&str> = self.catalog.iter().map(ActionKind::as_str).collect();
        serde_json::json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": tags,
                    "description": "The next action to take",
                },
                "reason": {
                    "type": "string",
                    "description": "Why this action is the best next step",
                },
            },
            "required": ["action", "reason"],
        })
    }

    /// Asks the model for the next action.
    ///
    /// A value outside the action enumeration is malformed output and is
    /// returned as an error, never replaced by a guess.
    pub async fn select_next_action(&self, state: &RunState) -> Result<ActionDecision, AgentError> {
        let request = GenerationRequest::new(
            self.model.clone(),
            AgentPromptTemplate::orchestrator_system(&self.catalog),
            AgentPromptTemplate::orchestrator_user(state),
        )
        .with_temperature(self.temperature);

        let raw: RawDecision =
            generate_json(self.llm.as_ref(), &request, &self.schema(), "orchestrator").await?;
        let kind = raw
            .action
            .parse::<ActionKind>()
            .map_err(|e| AgentError::malformed("orchestrator", e.to_string()))?;

        info!("Orchestrator selected {}", kind);
        debug!("Orchestrator reason: {}", raw.reason);
        Ok(ActionDecision::new(kind, raw.reason))
    }

    /// Deterministic replacement for a `rejected` choice.
    ///
    /// Never returns `rejected` itself or another kind of its fallback
    /// family.
    pub fn fallback(&self, state: &RunState, rejected: ActionKind) -> ActionKind {
        select_least_frequent_action_excluding(state.action_history(), Some(rejected))
    }
}
