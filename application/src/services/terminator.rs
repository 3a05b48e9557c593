//! Terminator: decides whether the loop stops.

use crate::error::AgentError;
use crate::ports::llm_client::{GenerationRequest, LlmClient};
use crate::services::shared::generate_json;
use proposal_domain::{AgentPromptTemplate, ModelSelector, RunState, TerminationDecision};
use std::sync::Arc;
use tracing::info;

/// Default iteration ceiling.
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

pub struct Terminator<L: LlmClient + 'static> {
    llm: Arc<L>,
    model: ModelSelector,
    temperature: f32,
    max_iterations: usize,
}

impl<L: LlmClient + 'static> Terminator<L> {
    pub fn new(llm: Arc<L>, model: ModelSelector) -> Self {
        Self {
            llm,
            model,
            temperature: 0.0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Whether the iteration ceiling has been reached. Never calls the model.
    pub fn is_ceiling_reached(&self, state: &RunState) -> bool {
        state.completed_iterations() >= self.max_iterations
    }

    /// Whether the next iteration is the last one the ceiling allows.
    pub fn is_final_iteration(&self, state: &RunState) -> bool {
        state.completed_iterations() + 1 == self.max_iterations
    }

    fn schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "shouldTerminate": {
                    "type": "boolean",
                    "description": "true only when the goal is demonstrably met",
                },
                "reason": {
                    "type": "string",
                    "description": "What is complete, or what is still missing",
                },
            },
            "required": ["shouldTerminate", "reason"],
        })
    }

    /// Decides whether to stop.
    ///
    /// Once the ceiling is reached this returns `shouldTerminate = true`
    /// without a model call, whatever the state contains.
    pub async fn should_terminate(&self, state: &RunState) -> Result<TerminationDecision, AgentError> {
        if self.is_ceiling_reached(state) {
            info!(
                "Iteration ceiling reached ({}/{})",
                state.completed_iterations(),
                self.max_iterations
            );
            return Ok(TerminationDecision::ceiling_reached());
        }

        let request = GenerationRequest::new(
            self.model.clone(),
            AgentPromptTemplate::terminator_system(),
            AgentPromptTemplate::terminator_user(state),
        )
        .with_temperature(self.temperature);

        let decision: TerminationDecision =
            generate_json(self.llm.as_ref(), &request, &Self::schema(), "terminator").await?;
        if decision.should_terminate {
            info!("Terminator stopped the run: {}", decision.reason);
        }
        Ok(decision)
    }
}
