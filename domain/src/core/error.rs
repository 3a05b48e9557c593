//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid action kind: {0}")]
    InvalidActionKind(String),

    #[error("Action output is required")]
    EmptyActionOutput,

    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Invalid provider: {0}")]
    InvalidProvider(String),
}

impl DomainError {
    /// Check if this error was raised while validating a value
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyActionOutput | DomainError::InvalidProblem(_)
        )
    }
}
