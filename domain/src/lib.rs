//! Domain layer for proposal-agent
//!
//! This crate contains the core entities and value objects of the proposal
//! loop. It has no dependencies on infrastructure or application concerns.
//!
//! # Core Concepts
//!
//! ## Actions
//!
//! Each iteration of the loop runs one [`ActionKind`] and records its outcome
//! as an [`ActionRecord`]. When the model-driven choice of action is vetoed,
//! [`select_least_frequent_action`] provides a deterministic replacement.
//!
//! ## Run State
//!
//! [`RunState`] is the shared context of one run: the problem, the hearing
//! transcript, the goal, the current draft and the accumulated history.

pub mod action;
pub mod agent;
pub mod core;
pub mod document;
pub mod evaluation;
pub mod llm;
pub mod problem;
pub mod prompt;
pub mod search;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use action::{
    ActionId, ActionKind, ActionOutput, ActionRecord, FALLBACK_WINDOW,
    select_least_frequent_action, select_least_frequent_action_excluding,
};
pub use agent::{
    ActionDecision, FORCED_WRITE_REASON, LOOP_CEILING_REASON, RunState, SkipDecision,
    TerminationDecision,
};
pub use core::error::DomainError;
pub use document::{TextChunk, chunk_text};
pub use evaluation::Judgment;
pub use llm::{ModelSelector, Provider, TokenCount};
pub use problem::{HearingMessage, HearingRole, JobConfig, Problem, ProblemId};
pub use prompt::{
    ActionPromptTemplate, AgentPromptTemplate, JudgePromptTemplate, SearchPromptTemplate,
};
pub use search::{SearchHit, SearchResult, SearchResults};
pub use tool::{ToolCall, ToolDefinition, ToolError, ToolParameter};
