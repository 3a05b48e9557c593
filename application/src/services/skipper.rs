//! Skipper: consistency guard that may veto the orchestrator's choice.

use crate::error::AgentError;
use crate::ports::llm_client::{GenerationRequest, LlmClient};
use crate::services::shared::generate_json;
use proposal_domain::{ActionKind, AgentPromptTemplate, ModelSelector, RunState, SkipDecision};
use std::sync::Arc;
use tracing::info;

pub struct Skipper<L: LlmClient + 'static> {
    llm: Arc<L>,
    model: ModelSelector,
    temperature: f32,
}

impl<L: LlmClient + 'static> Skipper<L> {
    pub fn new(llm: Arc<L>, model: ModelSelector) -> Self {
        Self {
            llm,
            model,
            temperature: 0.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "shouldSkip": {
                    "type": "boolean",
                    "description": "true when the proposed action should not run now",
                },
                "reason": {
                    "type": "string",
                    "description": "Which rule applies, and a better direction when skipping",
                },
            },
            "required": ["shouldSkip", "reason"],
        })
    }

    /// Decides whether `kind` should be skipped in the current state.
    ///
    /// Actions needing a capability the job has disabled are vetoed without
    /// consulting the model.
    pub async fn should_skip(
        &self,
        state: &RunState,
        kind: ActionKind,
    ) -> Result<SkipDecision, AgentError> {
        if kind == ActionKind::InternalSearch && !state.job().enable_internal_search {
            info!("Skipping {}: internal search disabled", kind);
            return Ok(SkipDecision::skip(
                "internal document search is disabled for this problem",
            ));
        }

        let request = GenerationRequest::new(
            self.model.clone(),
            AgentPromptTemplate::skipper_system(),
            AgentPromptTemplate::skipper_user(state, kind),
        )
        .with_temperature(self.temperature);

        let decision: SkipDecision =
            generate_json(self.llm.as_ref(), &request, &Self::schema(), "skipper").await?;
        if decision.should_skip {
            info!("Skipper vetoed {}: {}", kind, decision.reason);
        }
        Ok(decision)
    }
}
