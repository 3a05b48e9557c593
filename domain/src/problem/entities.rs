//! Problem entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier of a problem, assigned by the owning system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProblemId(String);

impl ProblemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProblemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ProblemId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for ProblemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A problem to write a proposal for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: ProblemId,
    pub title: String,
    pub description: String,
}

impl Problem {
    /// Creates a problem. The title must not be blank.
    pub fn new(
        id: impl Into<ProblemId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::InvalidProblem("title is required".to_string()));
        }
        Ok(Self {
            id: id.into(),
            title,
            description: description.into(),
        })
    }
}

/// Speaker of a hearing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HearingRole {
    Assistant,
    User,
}

impl HearingRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            HearingRole::Assistant => "assistant",
            HearingRole::User => "user",
        }
    }
}

impl std::fmt::Display for HearingRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One message of the hearing held with the user before the run.
///
/// `field` names the problem field the message was collected for, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HearingMessage {
    pub role: HearingRole,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl HearingMessage {
    pub fn new(role: HearingRole, message: impl Into<String>) -> Self {
        Self {
            role,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Renders as `role: message [field]`.
    pub fn to_transcript_line(&self) -> String {
        match &self.field {
            Some(field) => format!("{}: {} [{}]", self.role, self.message, field),
            None => format!("{}: {}", self.role, self.message),
        }
    }
}

/// Per-problem capability flags, owned by the job configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub enable_internal_search: bool,
}

impl JobConfig {
    pub fn with_internal_search(mut self, enabled: bool) -> Self {
        self.enable_internal_search = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_requires_title() {
        assert!(Problem::new("p-1", "  ", "desc").is_err());
        let problem = Problem::new("p-1", "New CRM rollout", "desc").unwrap();
        assert_eq!(problem.id.as_str(), "p-1");
    }

    #[test]
    fn test_transcript_line() {
        let msg = HearingMessage::new(HearingRole::User, "About 40 people").with_field("team size");
        assert_eq!(msg.to_transcript_line(), "user: About 40 people [team size]");

        let msg = HearingMessage::new(HearingRole::Assistant, "How big is the team?");
        assert_eq!(msg.to_transcript_line(), "assistant: How big is the team?");
    }

    #[test]
    fn test_job_config_default_disables_internal_search() {
        assert!(!JobConfig::default().enable_internal_search);
        assert!(JobConfig::default().with_internal_search(true).enable_internal_search);
    }
}
