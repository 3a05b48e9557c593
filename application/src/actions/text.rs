//! Free-text executors: plan, analyze and review.

use super::{ActionExecutor, ActionOutcome};
use crate::error::AgentError;
use crate::ports::llm_client::{GenerationRequest, LlmClient};
use async_trait::async_trait;
use proposal_domain::{ActionKind, ActionPromptTemplate, ActionRecord, ModelSelector, RunState};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Executor producing free text without touching the draft.
///
/// Used for `plan`, `analyze` and `review`; construction fails for any
/// other kind.
pub struct TextActionExecutor<L: LlmClient + 'static> {
    kind: ActionKind,
    llm: Arc<L>,
    model: ModelSelector,
    temperature: f32,
}

impl<L: LlmClient + 'static> TextActionExecutor<L> {
    pub fn new(kind: ActionKind, llm: Arc<L>, model: ModelSelector) -> Result<Self, AgentError> {
        match kind {
            ActionKind::Plan | ActionKind::Analyze | ActionKind::Review => Ok(Self {
                kind,
                llm,
                model,
                temperature: 0.0,
            }),
            other => Err(AgentError::UnsupportedAction(other)),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn system_prompt(&self) -> String {
        match self.kind {
            ActionKind::Plan => ActionPromptTemplate::plan_system(),
            ActionKind::Analyze => ActionPromptTemplate::analyze_system(),
            _ => ActionPromptTemplate::review_system(),
        }
    }

    fn instruction(&self) -> &'static str {
        match self.kind {
            ActionKind::Plan => "Create or update the plan for this proposal.",
            ActionKind::Analyze => "Analyze the information gathered so far.",
            _ => "Review the current content against the goal.",
        }
    }
}

#[async_trait]
impl<L: LlmClient + 'static> ActionExecutor for TextActionExecutor<L> {
    fn kind(&self) -> ActionKind {
        self.kind
    }

    async fn execute(
        &self,
        state: &RunState,
        _cancellation: &CancellationToken,
    ) -> Result<ActionOutcome, AgentError> {
        let instruction = self.instruction();
        let request = GenerationRequest::new(
            self.model.clone(),
            self.system_prompt(),
            ActionPromptTemplate::step_user(state, instruction),
        )
        .with_temperature(self.temperature);

        let text = self.llm.generate_text(&request).await?;
        debug!("{} produced {} chars", self.kind, text.len());
        let record = ActionRecord::new(
            state.problem().id.clone(),
            self.kind,
            instruction,
            text.trim(),
        )?;
        Ok(ActionOutcome::new(state.content(), record))
    }
}
