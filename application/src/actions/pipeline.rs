//! Decompose / explore / synthesize search pipeline.
//!
//! 1. **Decompose**: one structured call turns the state's information gaps
//!    into at most [`MAX_TOPICS`] search topics.
//! 2. **Explore**: one spawned task per topic lets the model call a search
//!    tool and serializes the results. Tasks report into a bounded channel
//!    sized to the topic count; a supervisor drains the `JoinSet` and then
//!    drops the last sender so the collector finishes. A failed or panicking
//!    task only loses its own topic.
//! 3. **Synthesize**: each collected block is summarized by one call, in
//!    collection order, and the notes are joined with newlines.

use super::{ActionExecutor, ActionOutcome};
use crate::config::agent_params::MAX_TOPICS;
use crate::error::AgentError;
use crate::ports::llm_client::{GenerationRequest, LlmClient, LlmError};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::services::shared::generate_json;
use async_trait::async_trait;
use proposal_domain::tool::{DOCUMENT_SEARCH, WEB_SEARCH};
use proposal_domain::{
    ActionKind, ActionRecord, ModelSelector, ProblemId, RunState, SearchPromptTemplate,
    ToolDefinition, ToolError,
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const NO_FINDINGS: &str = "No findings: none of the search topics returned usable results.";
const NO_TOPICS: &str = "No findings: no open search topics were identified.";

/// Where a pipeline run searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// The public web (`web_search`).
    External,
    /// The problem's own documents (`document_search`).
    Internal,
}

impl SearchScope {
    pub fn kind(&self) -> ActionKind {
        match self {
            SearchScope::External => ActionKind::ExternalSearch,
            SearchScope::Internal => ActionKind::InternalSearch,
        }
    }

    pub fn tool_name(&self) -> &'static str {
        match self {
            SearchScope::External => WEB_SEARCH,
            SearchScope::Internal => DOCUMENT_SEARCH,
        }
    }
}

/// Why an explore task contributed nothing.
#[derive(Error, Debug)]
enum ExploreError {
    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("tool failed: {0}")]
    Tool(#[from] ToolError),

    #[error("cancelled")]
    Cancelled,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Decomposition {
    #[serde(default)]
    search_topics: Vec<String>,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub topics: Vec<String>,
    pub notes: Vec<String>,
}

pub struct SearchPipeline<L: LlmClient + 'static, T: ToolExecutorPort + 'static> {
    llm: Arc<L>,
    tools: Arc<T>,
    model: ModelSelector,
    temperature: f32,
    max_topics: usize,
}

impl<L: LlmClient + 'static, T: ToolExecutorPort + 'static> SearchPipeline<L, T> {
    pub fn new(llm: Arc<L>, tools: Arc<T>, model: ModelSelector) -> Self {
        Self {
            llm,
            tools,
            model,
            temperature: 0.0,
            max_topics: MAX_TOPICS,
        }
    }

    /// Sets the topic bound, capped at [`MAX_TOPICS`].
    pub fn with_max_topics(mut self, max_topics: usize) -> Self {
        self.max_topics = max_topics.clamp(1, MAX_TOPICS);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn decompose_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "searchTopics": {
                    "type": "array",
                    "items": { "type": "string" },
                    "maxItems": self.max_topics,
                    "description": "Independent search topics, one short phrase each",
                },
            },
            "required": ["searchTopics"],
        })
    }

    /// Stage 1: derive at most `max_topics` non-blank topics.
    pub async fn decompose(
        &self,
        state: &RunState,
        scope: SearchScope,
    ) -> Result<Vec<String>, AgentError> {
        let request = GenerationRequest::new(
            self.model.clone(),
            SearchPromptTemplate::decompose_system(
                self.max_topics,
                scope == SearchScope::Internal,
            ),
            SearchPromptTemplate::decompose_user(state),
        )
        .with_temperature(self.temperature);

        let decomposition: Decomposition = generate_json(
            self.llm.as_ref(),
            &request,
            &self.decompose_schema(),
            "decompose",
        )
        .await?;

        let proposed = decomposition.search_topics.len();
        let topics: Vec<String> = decomposition
            .search_topics
            .into_iter()
            .map(|topic| topic.trim().to_string())
            .filter(|topic| !topic.is_empty())
            .take(self.max_topics)
            .collect();
        if proposed > topics.len() {
            debug!("Decompose proposed {} topics, keeping {}", proposed, topics.len());
        }
        Ok(topics)
    }

    /// Stage 2: explore every topic concurrently.
    ///
    /// Returns the result blocks in completion order. Failed, panicking and
    /// cancelled tasks contribute nothing.
    pub async fn explore(
        &self,
        problem_id: &ProblemId,
        goal: &str,
        topics: Vec<String>,
        scope: SearchScope,
        cancellation: &CancellationToken,
    ) -> Vec<String> {
        if topics.is_empty() {
            return Vec::new();
        }

        let offered: Vec<ToolDefinition> = self
            .tools
            .definitions()
            .into_iter()
            .filter(|tool| tool.name == scope.tool_name())
            .collect();
        if offered.is_empty() {
            warn!("{} is not available; skipping exploration", scope.tool_name());
            return Vec::new();
        }

        let (tx, mut rx) = mpsc::channel::<String>(topics.len());
        let mut join_set = JoinSet::new();

        for topic in topics {
            let llm = Arc::clone(&self.llm);
            let tools = Arc::clone(&self.tools);
            let offered = offered.clone();
            let problem_id = problem_id.clone();
            let tx = tx.clone();
            let cancellation = cancellation.clone();
            let request = GenerationRequest::new(
                self.model.clone(),
                SearchPromptTemplate::explore_system(),
                SearchPromptTemplate::explore_user(goal, &topic),
            )
            .with_temperature(self.temperature);

            join_set.spawn(async move {
                let result = tokio::select! {
                    biased;
                    _ = cancellation.cancelled() => Err(ExploreError::Cancelled),
                    result = explore_topic(llm.as_ref(), tools.as_ref(), &request, &offered, &problem_id) => result,
                };
                let outcome = match result {
                    Ok(Some(block)) => {
                        // capacity equals the topic count, so this never waits
                        let _ = tx.send(block).await;
                        Ok(true)
                    }
                    Ok(None) => Ok(false),
                    Err(e) => Err(e),
                };
                (topic, outcome)
            });
        }

        let supervisor = async move {
            while let Some(joined) = join_set.join_next().await {
                match joined {
                    Ok((topic, Ok(true))) => debug!("Explored topic '{}'", topic),
                    Ok((topic, Ok(false))) => debug!("No results for topic '{}'", topic),
                    Ok((topic, Err(e))) => warn!("Explore task for '{}' failed: {}", topic, e),
                    Err(e) => warn!("Explore task join error: {}", e),
                }
            }
            drop(tx);
        };

        let collector = async {
            let mut blocks = Vec::new();
            while let Some(block) = rx.recv().await {
                blocks.push(block);
            }
            blocks
        };

        let ((), blocks) = tokio::join!(supervisor, collector);
        blocks
    }

    /// Stage 3: summarize each block, sequentially and in order.
    pub async fn synthesize(&self, goal: &str, blocks: &[String]) -> Result<Vec<String>, AgentError> {
        let mut notes = Vec::with_capacity(blocks.len());
        for block in blocks {
            let request = GenerationRequest::new(
                self.model.clone(),
                SearchPromptTemplate::synthesize_system(),
                SearchPromptTemplate::synthesize_user(goal, block),
            )
            .with_temperature(self.temperature);

            let note = self.llm.generate_text(&request).await?;
            let note = note.trim();
            if !note.is_empty() {
                notes.push(note.to_string());
            }
        }
        Ok(notes)
    }

    /// Runs all three stages.
    pub async fn run(
        &self,
        state: &RunState,
        scope: SearchScope,
        cancellation: &CancellationToken,
    ) -> Result<SearchReport, AgentError> {
        if cancellation.is_cancelled() {
            return Err(AgentError::Cancelled);
        }

        let topics = self.decompose(state, scope).await?;
        info!("{} decomposed into {} topics", scope.kind(), topics.len());

        let blocks = self
            .explore(
                &state.problem().id,
                state.goal(),
                topics.clone(),
                scope,
                cancellation,
            )
            .await;
        if cancellation.is_cancelled() {
            return Err(AgentError::Cancelled);
        }
        info!("{} of {} topics returned results", blocks.len(), topics.len());

        let notes = self.synthesize(state.goal(), &blocks).await?;
        Ok(SearchReport { topics, notes })
    }
}

/// Body of one explore task.
async fn explore_topic<L, T>(
    llm: &L,
    tools: &T,
    request: &GenerationRequest,
    offered: &[ToolDefinition],
    problem_id: &ProblemId,
) -> Result<Option<String>, ExploreError>
where
    L: LlmClient + ?Sized,
    T: ToolExecutorPort + ?Sized,
{
    let Some(call) = llm.generate_function_call(request, offered).await? else {
        return Ok(None);
    };
    if !offered.iter().any(|tool| tool.name == call.tool_name) {
        return Err(ToolError::not_found(call.tool_name).into());
    }

    let results = tools.execute(problem_id, &call).await?;
    if results.is_empty() {
        return Ok(None);
    }
    Ok(Some(results.to_text_block()))
}

/// Executor for `externalSearch` and `internalSearch`.
pub struct SearchPipelineExecutor<L: LlmClient + 'static, T: ToolExecutorPort + 'static> {
    pipeline: Arc<SearchPipeline<L, T>>,
    scope: SearchScope,
}

impl<L: LlmClient + 'static, T: ToolExecutorPort + 'static> SearchPipelineExecutor<L, T> {
    pub fn new(pipeline: Arc<SearchPipeline<L, T>>, scope: SearchScope) -> Self {
        Self { pipeline, scope }
    }
}

#[async_trait]
impl<L: LlmClient + 'static, T: ToolExecutorPort + 'static> ActionExecutor
    for SearchPipelineExecutor<L, T>
{
    fn kind(&self) -> ActionKind {
        self.scope.kind()
    }

    async fn execute(
        &self,
        state: &RunState,
        cancellation: &CancellationToken,
    ) -> Result<ActionOutcome, AgentError> {
        let report = self.pipeline.run(state, self.scope, cancellation).await?;

        let output = if report.notes.is_empty() {
            let note = if report.topics.is_empty() {
                NO_TOPICS
            } else {
                NO_FINDINGS
            };
            note.to_string()
        } else {
            report.notes.join("\n")
        };
        let record = ActionRecord::new(
            state.problem().id.clone(),
            self.scope.kind(),
            report.topics.join("\n"),
            output,
        )?;
        Ok(ActionOutcome::new(state.content(), record))
    }
}
