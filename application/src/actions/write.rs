//! Write executor: replaces the draft with a new version.

use super::{ActionExecutor, ActionOutcome};
use crate::error::AgentError;
use crate::ports::llm_client::{GenerationRequest, LlmClient};
use crate::services::shared::generate_json;
use async_trait::async_trait;
use proposal_domain::{ActionKind, ActionPromptTemplate, ActionRecord, ModelSelector, RunState};
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

const INSTRUCTION: &str = "Write the updated proposal.";
const DEFAULT_CHANGE_REASON: &str = "content updated";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Draft {
    content: String,
    #[serde(default)]
    change_reason: String,
}

pub struct WriteActionExecutor<L: LlmClient + 'static> {
    llm: Arc<L>,
    model: ModelSelector,
    temperature: f32,
}

impl<L: LlmClient + 'static> WriteActionExecutor<L> {
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
                "content": {
                    "type": "string",
                    "description": "The complete updated proposal in Markdown",
                },
                "changeReason": {
                    "type": "string",
                    "description": "What changed compared to the current content, and why",
                },
            },
            "required": ["content", "changeReason"],
        })
    }
}

#[async_trait]
impl<L: LlmClient + 'static> ActionExecutor for WriteActionExecutor<L> {
    fn kind(&self) -> ActionKind {
        ActionKind::Write
    }

    async fn execute(
        &self,
        state: &RunState,
        _cancellation: &CancellationToken,
    ) -> Result<ActionOutcome, AgentError> {
        let request = GenerationRequest::new(
            self.model.clone(),
            ActionPromptTemplate::write_system(),
            ActionPromptTemplate::step_user(state, INSTRUCTION),
        )
        .with_temperature(self.temperature);

        let draft: Draft =
            generate_json(self.llm.as_ref(), &request, &Self::schema(), "write").await?;
        if draft.content.trim().is_empty() {
            return Err(AgentError::malformed("write", "empty content"));
        }

        let reason = match draft.change_reason.trim() {
            "" => DEFAULT_CHANGE_REASON,
            reason => reason,
        };
        info!("Draft rewritten ({} chars): {}", draft.content.len(), reason);

        let record = ActionRecord::new(
            state.problem().id.clone(),
            ActionKind::Write,
            INSTRUCTION,
            reason,
        )?;
        Ok(ActionOutcome::new(draft.content, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockLlm, model, sample_state};
    use serde_json::json;

    #[tokio::test]
    async fn test_write_replaces_content() {
        let llm = Arc::new(MockLlm::new().with_structured([json!({
            "content": "# Fleet Electrification Proposal\n...",
            "changeReason": "Added cost table"
        })]));
        let executor = WriteActionExecutor::new(llm, model());

        let state = sample_state(false).with_content("old");
        let outcome = executor
            .execute(&state, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome.content, "# Fleet Electrification Proposal\n...");
        assert_eq!(outcome.record.kind, ActionKind::Write);
        assert_eq!(outcome.record.output(), "Added cost table");
    }

    #[tokio::test]
    async fn test_blank_reason_gets_default() {
        let llm = Arc::new(
            MockLlm::new().with_structured([json!({"content": "draft", "changeReason": " "})]),
        );
        let executor = WriteActionExecutor::new(llm, model());

        let outcome = executor
            .execute(&sample_state(false), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(outcome.record.output(), "content updated");
    }

    #[tokio::test]
    async fn test_empty_content_is_malformed() {
        let llm = Arc::new(
            MockLlm::new().with_structured([json!({"content": "", "changeReason": "cleared"})]),
        );
        let executor = WriteActionExecutor::new(llm, model());

        let err = executor
            .execute(&sample_state(false), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::MalformedOutput { stage: "write", .. }));
    }
}
