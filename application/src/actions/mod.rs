//! Action executors
//!
//! One executor per executable [`ActionKind`], looked up through the
//! [`ActionDispatcher`]. Each executor reads the run state and returns the
//! new content together with the record of what it did; applying the
//! outcome to the state is left to the run driver.

pub mod dispatch;
pub mod pipeline;
pub mod search;
pub mod text;
pub mod write;

use crate::error::AgentError;
use async_trait::async_trait;
use proposal_domain::{ActionKind, ActionRecord, RunState};
use tokio_util::sync::CancellationToken;

pub use dispatch::ActionDispatcher;
pub use pipeline::{SearchPipeline, SearchPipelineExecutor, SearchScope};
pub use search::SearchActionExecutor;
pub use text::TextActionExecutor;
pub use write::WriteActionExecutor;

/// Result of executing one action.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    /// Draft content after the action.
    pub content: String,
    pub record: ActionRecord,
}

impl ActionOutcome {
    pub fn new(content: impl Into<String>, record: ActionRecord) -> Self {
        Self {
            content: content.into(),
            record,
        }
    }
}

/// Executes one kind of action against the run state.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    fn kind(&self) -> ActionKind;

    /// Runs the action. `cancellation` reaches every task the executor
    /// spawns.
    async fn execute(
        &self,
        state: &RunState,
        cancellation: &CancellationToken,
    ) -> Result<ActionOutcome, AgentError>;
}
