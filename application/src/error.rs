//! Application error type shared by services, executors and the run driver.

use crate::ports::action_store::StoreError;
use crate::ports::llm_client::LlmError;
use proposal_domain::{ActionKind, DomainError};
use thiserror::Error;

/// Errors that abort a proposal run.
///
/// Per-topic explore failures and tool errors never surface here; they are
/// recovered inside the search executors.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Malformed {stage} output: {message}")]
    MalformedOutput {
        stage: &'static str,
        message: String,
    },

    #[error("Unsupported action kind: {0}")]
    UnsupportedAction(ActionKind),

    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Action store error: {0}")]
    Store(#[from] StoreError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl AgentError {
    pub fn malformed(stage: &'static str, message: impl Into<String>) -> Self {
        AgentError::MalformedOutput {
            stage,
            message: message.into(),
        }
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AgentError::Cancelled)
    }
}
