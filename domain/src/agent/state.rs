//! Shared run state for one proposal run.

use crate::action::ActionKind;
use crate::problem::{HearingMessage, JobConfig, Problem};
use serde::{Deserialize, Serialize};

/// Mutable context threaded through one run of the proposal loop.
///
/// The run driver owns the state exclusively. Services and executors only
/// borrow it; their results are applied by the driver through the mutating
/// methods below.
///
/// `problem`, `hearing` and `job` never change after construction. `history`
/// only grows, except when the summarizer replaces it with a compacted
/// rewrite via [`RunState::replace_history`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    problem: Problem,
    hearing: Vec<HearingMessage>,
    job: JobConfig,
    goal: String,
    content: String,
    history: String,
    action_history: Vec<ActionKind>,
    completed_iterations: usize,
}

impl RunState {
    pub fn new(problem: Problem, hearing: Vec<HearingMessage>, job: JobConfig) -> Self {
        Self {
            problem,
            hearing,
            job,
            goal: String::new(),
            content: String::new(),
            history: String::new(),
            action_history: Vec::new(),
            completed_iterations: 0,
        }
    }

    /// Seeds the draft, e.g. when refining an existing proposal.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn hearing(&self) -> &[HearingMessage] {
        &self.hearing
    }

    pub fn job(&self) -> &JobConfig {
        &self.job
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn history(&self) -> &str {
        &self.history
    }

    /// Kinds of the actions executed so far, oldest first.
    pub fn action_history(&self) -> &[ActionKind] {
        &self.action_history
    }

    pub fn completed_iterations(&self) -> usize {
        self.completed_iterations
    }

    /// Whether an action of `kind` has completed in this run.
    pub fn has_executed(&self, kind: ActionKind) -> bool {
        self.action_history.contains(&kind)
    }

    // ==================== Mutation ====================

    pub fn set_goal(&mut self, goal: impl Into<String>) {
        self.goal = goal.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Appends an entry of the form `=== kind ===\n<text>`.
    pub fn append_history(&mut self, kind: ActionKind, text: &str) {
        if !self.history.is_empty() {
            self.history.push_str("\n\n");
        }
        self.history.push_str(&format!("=== {} ===\n{}", kind, text.trim()));
    }

    /// Replaces the history with a compacted rewrite.
    pub fn replace_history(&mut self, compacted: impl Into<String>) {
        self.history = compacted.into();
    }

    /// Marks one iteration as completed with `kind`.
    pub fn complete_iteration(&mut self, kind: ActionKind) {
        self.action_history.push(kind);
        self.completed_iterations += 1;
    }

    // ==================== Rendering ====================

    /// `Step N: kind` lines for every executed action.
    pub fn action_history_text(&self) -> String {
        self.action_history
            .iter()
            .enumerate()
            .map(|(i, kind)| format!("Step {}: {}", i + 1, kind))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn hearing_transcript(&self) -> String {
        self.hearing
            .iter()
            .map(HearingMessage::to_transcript_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Problem and hearing only; used before a goal exists.
    pub fn to_problem_prompt(&self) -> String {
        let mut out = format!(
            "## Problem\nTitle: {}\nDescription:\n{}\n",
            self.problem.title,
            or_none(&self.problem.description)
        );
        out.push_str(&format!(
            "\n## Hearing Transcript\n{}\n",
            or_none(&self.hearing_transcript())
        ));
        out
    }

    /// Full natural-language rendering of the state for model prompts.
    pub fn to_prompt(&self) -> String {
        let mut out = format!("## Goal\n{}\n\n", or_none(&self.goal));
        out.push_str(&self.to_problem_prompt());
        out.push_str(&format!("\n## Current Content\n{}\n", or_none(&self.content)));
        out.push_str(&format!("\n## History\n{}\n", or_none(&self.history)));
        out.push_str(&format!(
            "\n## Action History\n{}\n",
            or_none(&self.action_history_text())
        ));
        let internal = if self.job.enable_internal_search {
            "enabled"
        } else {
            "disabled"
        };
        out.push_str(&format!(
            "\n## Capabilities\nInternal document search: {}\n",
            internal
        ));
        out
    }
}

fn or_none(text: &str) -> &str {
    if text.trim().is_empty() { "(none)" } else { text }
}
