//! Goal service: states what the finished proposal must achieve.

use crate::error::AgentError;
use crate::ports::llm_client::{GenerationRequest, LlmClient};
use proposal_domain::{AgentPromptTemplate, ModelSelector, RunState};
use std::sync::Arc;

pub struct GoalService<L: LlmClient + 'static> {
    llm: Arc<L>,
    model: ModelSelector,
    temperature: f32,
}

impl<L: LlmClient + 'static> GoalService<L> {
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

    /// Generates the goal statement from the problem and hearing transcript.
    pub async fn generate_goal(&self, state: &RunState) -> Result<String, AgentError> {
        let request = GenerationRequest::new(
            self.model.clone(),
            AgentPromptTemplate::goal_system(),
            AgentPromptTemplate::goal_user(state),
        )
        .with_temperature(self.temperature);

        let goal = self.llm.generate_text(&request).await?;
        let goal = goal.trim();
        if goal.is_empty() {
            return Err(AgentError::malformed("goal", "empty goal statement"));
        }
        Ok(goal.to_string())
    }
}
