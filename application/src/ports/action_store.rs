//! Action store port
//!
//! Durable storage for the action records produced during a run.

use async_trait::async_trait;
use proposal_domain::{ActionRecord, ProblemId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Storage for action records.
#[async_trait]
pub trait ActionStore: Send + Sync {
    /// Persists `record`, stamping its creation time when absent, and
    /// returns the stored record.
    async fn create(&self, record: ActionRecord) -> Result<ActionRecord, StoreError>;

    /// All records of a problem, oldest first.
    async fn find_by_problem(&self, problem_id: &ProblemId)
    -> Result<Vec<ActionRecord>, StoreError>;

    /// Deletes all records of a problem and returns how many were removed.
    async fn delete_by_problem(&self, problem_id: &ProblemId) -> Result<usize, StoreError>;
}
