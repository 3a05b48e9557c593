//! Application layer for the proposal agent
//!
//! This crate contains use cases, services, action executors, port
//! definitions, and application configuration.
//! It depends only on the domain layer.

pub mod actions;
pub mod config;
pub mod error;
pub mod ports;
pub mod services;
pub mod tools;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use actions::{ActionDispatcher, ActionExecutor, ActionOutcome};
pub use config::{AgentParams, ModelAssignment, SearchMode, SummarizeThresholds};
pub use error::AgentError;
pub use ports::{
    action_store::{ActionStore, StoreError},
    llm_client::{GenerationRequest, LlmClient, LlmError},
    run_event_logger::{NoRunEventLogger, RunEvent, RunEventLogger},
    search::{DocumentSearchClient, PageScraper, SearchError, WebSearchClient},
    tool_executor::ToolExecutorPort,
};
pub use services::RunJudge;
pub use tools::SearchToolset;
pub use use_cases::evaluate_proposal::{
    EvaluateProposalUseCase, EvaluationReport, EvaluationRun,
};
pub use use_cases::run_proposal::{
    RunProposalInput, RunProposalOutput, RunProposalUseCase, StopReason,
};
