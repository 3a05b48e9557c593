//! Action records: the persisted outcome of one executed action.

use super::kind::ActionKind;
use crate::core::error::DomainError;
use crate::problem::ProblemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an action record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a new random (v4) identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output text of an action. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionOutput(String);

impl ActionOutput {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::EmptyActionOutput);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ActionOutput {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActionOutput> for String {
    fn from(output: ActionOutput) -> Self {
        output.0
    }
}

/// Record of one executed action.
///
/// Records are created by executors after a successful model call and handed
/// to the action store. They are never mutated afterwards except for the
/// creation timestamp, which the store stamps when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: ActionId,
    pub problem_id: ProblemId,
    pub kind: ActionKind,
    /// What the action was asked to do (may be empty).
    pub input: String,
    output: ActionOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ActionRecord {
    /// Creates a record, failing when `output` is empty.
    pub fn new(
        problem_id: ProblemId,
        kind: ActionKind,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: ActionId::generate(),
            problem_id,
            kind,
            input: input.into(),
            output: ActionOutput::new(output)?,
            created_at: None,
        })
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn output(&self) -> &str {
        self.output.as_str()
    }
}
