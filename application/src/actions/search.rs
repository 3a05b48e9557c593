//! Single-shot search executor (`search`).

use super::{ActionExecutor, ActionOutcome};
use crate::error::AgentError;
use crate::ports::llm_client::{GenerationRequest, LlmClient};
use crate::ports::tool_executor::ToolExecutorPort;
use async_trait::async_trait;
use proposal_domain::tool::DOCUMENT_SEARCH;
use proposal_domain::{
    ActionKind, ActionPromptTemplate, ActionRecord, ModelSelector, RunState,
    SearchPromptTemplate, ToolDefinition,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const INSTRUCTION: &str = "Search for the most important missing information.";
const NO_SEARCH: &str = "No search was performed: the model did not request a tool.";

/// One function call, at most one tool execution, one summary.
pub struct SearchActionExecutor<L: LlmClient + 'static, T: ToolExecutorPort + 'static> {
    llm: Arc<L>,
    tools: Arc<T>,
    model: ModelSelector,
    temperature: f32,
}

impl<L: LlmClient + 'static, T: ToolExecutorPort + 'static> SearchActionExecutor<L, T> {
    pub fn new(llm: Arc<L>, tools: Arc<T>, model: ModelSelector) -> Self {
        Self {
            llm,
            tools,
            model,
            temperature: 0.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Tools usable for this problem; document search needs the capability flag.
    fn offered_tools(&self, state: &RunState) -> Vec<ToolDefinition> {
        self.tools
            .definitions()
            .into_iter()
            .filter(|tool| tool.name != DOCUMENT_SEARCH || state.job().enable_internal_search)
            .collect()
    }

    async fn summarize(&self, state: &RunState, block: &str) -> Result<String, AgentError> {
        let request = GenerationRequest::new(
            self.model.clone(),
            SearchPromptTemplate::synthesize_system(),
            SearchPromptTemplate::synthesize_user(state.goal(), block),
        )
        .with_temperature(self.temperature);
        Ok(self.llm.generate_text(&request).await?.trim().to_string())
    }
}

#[async_trait]
impl<L: LlmClient + 'static, T: ToolExecutorPort + 'static> ActionExecutor
    for SearchActionExecutor<L, T>
{
    fn kind(&self) -> ActionKind {
        ActionKind::Search
    }

    async fn execute(
        &self,
        state: &RunState,
        cancellation: &CancellationToken,
    ) -> Result<ActionOutcome, AgentError> {
        let offered = self.offered_tools(state);
        let request = GenerationRequest::new(
            self.model.clone(),
            ActionPromptTemplate::search_system(),
            ActionPromptTemplate::step_user(state, INSTRUCTION),
        )
        .with_temperature(self.temperature);

        let problem_id = state.problem().id.clone();
        let Some(call) = self.llm.generate_function_call(&request, &offered).await? else {
            info!("Search declined by the model");
            let record = ActionRecord::new(problem_id, ActionKind::Search, "", NO_SEARCH)?;
            return Ok(ActionOutcome::new(state.content(), record));
        };

        let input = call.to_input_string();
        let output = if !offered.iter().any(|tool| tool.name == call.tool_name) {
            warn!("Model called unavailable tool {}", call.tool_name);
            format!("No results: tool {} is not available.", call.tool_name)
        } else {
            let results = tokio::select! {
                biased;
                _ = cancellation.cancelled() => return Err(AgentError::Cancelled),
                results = self.tools.execute(&problem_id, &call) => results,
            };
            match results {
                Ok(results) if !results.is_empty() => {
                    let summary = self.summarize(state, &results.to_text_block()).await?;
                    if summary.is_empty() {
                        format!("No usable results for {}.", input)
                    } else {
                        summary
                    }
                }
                Ok(_) => format!("No results for {}.", input),
                Err(e) => {
                    warn!("Search tool failed: {}", e);
                    format!("No results for {}: {}", input, e)
                }
            }
        };

        let record = ActionRecord::new(problem_id, ActionKind::Search, input, output)?;
        Ok(ActionOutcome::new(state.content(), record))
    }
}
