//! Scripted port fakes shared by the unit tests of this crate.

use crate::ports::action_store::{ActionStore, StoreError};
use crate::ports::llm_client::{GenerationRequest, LlmClient, LlmError};
use crate::ports::run_event_logger::{RunEvent, RunEventLogger};
use crate::ports::tool_executor::ToolExecutorPort;
use async_trait::async_trait;
use proposal_domain::tool::{document_search_tool, web_search_tool};
use proposal_domain::{
    ActionRecord, HearingMessage, HearingRole, JobConfig, ModelSelector, Problem, ProblemId,
    RunState, SearchResult, SearchResults, TokenCount, ToolCall, ToolDefinition, ToolError,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

type FunctionCallResponder =
    Box<dyn Fn(&GenerationRequest, &[ToolDefinition]) -> Result<Option<ToolCall>, LlmError> + Send + Sync>;

/// LLM fake with scripted text and structured responses.
///
/// Function calls are answered by a responder; the default one calls the
/// first offered tool with the prompt's topic (or `"general"`) as query.
pub(crate) struct MockLlm {
    texts: Mutex<VecDeque<Result<String, LlmError>>>,
    structured: Mutex<VecDeque<Result<String, LlmError>>>,
    function_call: FunctionCallResponder,
    pub structured_requests: Mutex<Vec<GenerationRequest>>,
    pub text_calls: AtomicUsize,
    pub structured_calls: AtomicUsize,
    pub function_calls: AtomicUsize,
    pub token_calls: AtomicUsize,
    pub embedding_calls: AtomicUsize,
}

impl MockLlm {
    pub fn new() -> Self {
        Self {
            texts: Mutex::new(VecDeque::new()),
            structured: Mutex::new(VecDeque::new()),
            function_call: Box::new(|request, tools| {
                let Some(tool) = tools.first() else {
                    return Ok(None);
                };
                let query = topic_of(&request.user_prompt).unwrap_or("general");
                Ok(Some(ToolCall::new(tool.name.clone()).with_arg("query", query)))
            }),
            structured_requests: Mutex::new(Vec::new()),
            text_calls: AtomicUsize::new(0),
            structured_calls: AtomicUsize::new(0),
            function_calls: AtomicUsize::new(0),
            token_calls: AtomicUsize::new(0),
            embedding_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_texts<'a>(self, texts: impl IntoIterator<Item = &'a str>) -> Self {
        self.texts
            .lock()
            .unwrap()
            .extend(texts.into_iter().map(|t| Ok(t.to_string())));
        self
    }

    pub fn with_structured(self, values: impl IntoIterator<Item = serde_json::Value>) -> Self {
        self.structured
            .lock()
            .unwrap()
            .extend(values.into_iter().map(|v| Ok(v.to_string())));
        self
    }

    pub fn with_raw_structured(self, raw: &str) -> Self {
        self.structured.lock().unwrap().push_back(Ok(raw.to_string()));
        self
    }

    pub fn with_structured_error(self, error: LlmError) -> Self {
        self.structured.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_function_calls(
        mut self,
        responder: impl Fn(&GenerationRequest, &[ToolDefinition]) -> Result<Option<ToolCall>, LlmError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.function_call = Box::new(responder);
        self
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Text after `## Topic\n` in a prompt.
pub(crate) fn topic_of(prompt: &str) -> Option<&str> {
    prompt
        .split_once("## Topic\n")
        .map(|(_, rest)| rest.lines().next().unwrap_or("").trim())
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn generate_text(&self, _request: &GenerationRequest) -> Result<String, LlmError> {
        let n = self.text_calls.fetch_add(1, Ordering::SeqCst);
        match self.texts.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(format!("generated text {}", n + 1)),
        }
    }

    async fn generate_structured(
        &self,
        request: &GenerationRequest,
        _schema: &serde_json::Value,
    ) -> Result<String, LlmError> {
        self.structured_calls.fetch_add(1, Ordering::SeqCst);
        self.structured_requests.lock().unwrap().push(request.clone());
        self.structured
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Other("no scripted structured response".into())))
    }

    async fn generate_function_call(
        &self,
        request: &GenerationRequest,
        tools: &[ToolDefinition],
    ) -> Result<Option<ToolCall>, LlmError> {
        self.function_calls.fetch_add(1, Ordering::SeqCst);
        (self.function_call)(request, tools)
    }

    async fn generate_embedding(
        &self,
        _model: &ModelSelector,
        _text: &str,
    ) -> Result<Vec<f32>, LlmError> {
        self.embedding_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![1.0, 0.0])
    }

    async fn count_tokens(
        &self,
        _model: &ModelSelector,
        text: &str,
    ) -> Result<TokenCount, LlmError> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        Ok(TokenCount {
            total_tokens: text.chars().count() as u64,
        })
    }
}

/// Tool fake. Queries containing `panic` panic, queries containing `fail`
/// return an execution error, anything else yields one result.
pub(crate) struct MockTools {
    tools: Vec<ToolDefinition>,
    pub calls: Mutex<Vec<ToolCall>>,
}

impl MockTools {
    pub fn new() -> Self {
        Self {
            tools: vec![web_search_tool(), document_search_tool()],
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn only(tools: Vec<ToolDefinition>) -> Self {
        Self {
            tools,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ToolExecutorPort for MockTools {
    fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.clone()
    }

    async fn execute(
        &self,
        _problem_id: &ProblemId,
        call: &ToolCall,
    ) -> Result<SearchResults, ToolError> {
        self.calls.lock().unwrap().push(call.clone());
        let query = call
            .require_string("query")
            .map_err(ToolError::invalid_argument)?
            .to_string();
        if query.contains("panic") {
            panic!("tool blew up on {query}");
        }
        if query.contains("fail") {
            return Err(ToolError::execution_failed(format!("search failed for {query}")));
        }
        Ok(SearchResults::new(vec![SearchResult::new(
            format!("About {query}"),
            format!("Facts on {query}"),
            format!("https://example.com/{}", query.replace(' ', "-")),
        )]))
    }
}

/// Action store fake keeping records in insertion order.
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub records: Mutex<Vec<ActionRecord>>,
}

#[async_trait]
impl ActionStore for MemoryStore {
    async fn create(&self, record: ActionRecord) -> Result<ActionRecord, StoreError> {
        let record = match record.created_at {
            Some(_) => record,
            None => record.with_created_at(chrono::Utc::now()),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_problem(
        &self,
        problem_id: &ProblemId,
    ) -> Result<Vec<ActionRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.problem_id == problem_id)
            .cloned()
            .collect())
    }

    async fn delete_by_problem(&self, problem_id: &ProblemId) -> Result<usize, StoreError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| &r.problem_id != problem_id);
        Ok(before - records.len())
    }
}

/// Event logger fake recording event types.
#[derive(Default)]
pub(crate) struct RecordingLogger {
    pub events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingLogger {
    pub fn types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

impl RunEventLogger for RecordingLogger {
    fn log(&self, event: RunEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

pub(crate) fn sample_state(enable_internal_search: bool) -> RunState {
    let problem = Problem::new(
        "problem-1",
        "Fleet electrification",
        "Plan the switch of 40 delivery vans to electric vehicles.",
    )
    .unwrap();
    let hearing = vec![
        HearingMessage::new(HearingRole::Assistant, "What is the budget?"),
        HearingMessage::new(HearingRole::User, "1.2M EUR over three years").with_field("budget"),
    ];
    let mut state = RunState::new(
        problem,
        hearing,
        JobConfig::default().with_internal_search(enable_internal_search),
    );
    state.set_goal("A costed rollout plan the board can approve");
    state
}

pub(crate) fn model() -> ModelSelector {
    ModelSelector::gemini("test-model")
}
