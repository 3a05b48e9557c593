//! Type definitions for the RunProposal use case.

use proposal_domain::{ActionRecord, HearingMessage, JobConfig, Problem, RunState};

/// Input for one proposal run
#[derive(Debug, Clone)]
pub struct RunProposalInput {
    pub problem: Problem,
    pub hearing: Vec<HearingMessage>,
    pub job: JobConfig,
    /// Existing draft to refine instead of starting from scratch.
    pub initial_content: Option<String>,
    /// Goal to use instead of generating one.
    pub goal: Option<String>,
}

impl RunProposalInput {
    pub fn new(problem: Problem) -> Self {
        Self {
            problem,
            hearing: Vec::new(),
            job: JobConfig::default(),
            initial_content: None,
            goal: None,
        }
    }

    pub fn with_hearing(mut self, hearing: Vec<HearingMessage>) -> Self {
        self.hearing = hearing;
        self
    }

    pub fn with_job(mut self, job: JobConfig) -> Self {
        self.job = job;
        self
    }

    pub fn with_initial_content(mut self, content: impl Into<String>) -> Self {
        self.initial_content = Some(content.into());
        self
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    pub(super) fn into_state(self) -> RunState {
        let mut state = RunState::new(self.problem, self.hearing, self.job);
        if let Some(content) = self.initial_content {
            state.set_content(content);
        }
        if let Some(goal) = self.goal {
            state.set_goal(goal);
        }
        state
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The orchestrator chose `done`.
    Done(String),
    /// The terminator stopped the run (model decision or iteration ceiling).
    Terminated(String),
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::Done(_) => "done",
            StopReason::Terminated(_) => "terminated",
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            StopReason::Done(reason) | StopReason::Terminated(reason) => reason,
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.reason())
    }
}

/// Result of a completed proposal run
#[derive(Debug, Clone)]
pub struct RunProposalOutput {
    pub goal: String,
    /// Final proposal content.
    pub content: String,
    /// Prompt history at the end of the run (possibly compacted).
    pub history: String,
    /// Records of every executed action, in execution order.
    pub records: Vec<ActionRecord>,
    pub iterations: usize,
    pub stop_reason: StopReason,
}
