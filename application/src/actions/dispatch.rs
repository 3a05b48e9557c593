//! Action dispatch table.

use super::pipeline::{SearchPipeline, SearchPipelineExecutor, SearchScope};
use super::search::SearchActionExecutor;
use super::text::TextActionExecutor;
use super::write::WriteActionExecutor;
use super::{ActionExecutor, ActionOutcome};
use crate::config::AgentParams;
use crate::error::AgentError;
use crate::ports::llm_client::LlmClient;
use crate::ports::tool_executor::ToolExecutorPort;
use proposal_domain::{ActionKind, RunState};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Maps action kinds to executors. Unknown kinds fail closed.
#[derive(Default)]
pub struct ActionDispatcher {
    executors: HashMap<ActionKind, Arc<dyn ActionExecutor>>,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `executor` under its own kind, replacing any previous one.
    pub fn register(mut self, executor: Arc<dyn ActionExecutor>) -> Self {
        self.executors.insert(executor.kind(), executor);
        self
    }

    /// Table with an executor for every executable kind.
    pub fn standard<L, T>(llm: Arc<L>, tools: Arc<T>, params: &AgentParams) -> Result<Self, AgentError>
    where
        L: LlmClient + 'static,
        T: ToolExecutorPort + 'static,
    {
        let model = params.models.executor.clone();
        let temperature = params.temperature;

        let pipeline = Arc::new(
            SearchPipeline::new(Arc::clone(&llm), Arc::clone(&tools), model.clone())
                .with_max_topics(params.effective_max_topics())
                .with_temperature(temperature),
        );

        let mut dispatcher = Self::new();
        for kind in [ActionKind::Plan, ActionKind::Analyze, ActionKind::Review] {
            dispatcher = dispatcher.register(Arc::new(
                TextActionExecutor::new(kind, Arc::clone(&llm), model.clone())?
                    .with_temperature(temperature),
            ));
        }
        Ok(dispatcher
            .register(Arc::new(
                WriteActionExecutor::new(Arc::clone(&llm), model.clone())
                    .with_temperature(temperature),
            ))
            .register(Arc::new(
                SearchActionExecutor::new(Arc::clone(&llm), tools, model)
                    .with_temperature(temperature),
            ))
            .register(Arc::new(SearchPipelineExecutor::new(
                Arc::clone(&pipeline),
                SearchScope::External,
            )))
            .register(Arc::new(SearchPipelineExecutor::new(
                pipeline,
                SearchScope::Internal,
            ))))
    }

    pub fn supports(&self, kind: ActionKind) -> bool {
        self.executors.contains_key(&kind)
    }

    pub fn get(&self, kind: ActionKind) -> Result<Arc<dyn ActionExecutor>, AgentError> {
        self.executors
            .get(&kind)
            .cloned()
            .ok_or(AgentError::UnsupportedAction(kind))
    }

    pub async fn execute(
        &self,
        kind: ActionKind,
        state: &RunState,
        cancellation: &CancellationToken,
    ) -> Result<ActionOutcome, AgentError> {
        self.get(kind)?.execute(state, cancellation).await
    }
}
