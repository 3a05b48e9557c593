//! Problem file format.
//!
//! ```toml
//! id = "fleet-2026"            # optional, generated when absent
//! title = "Fleet electrification"
//! description = "Switch 40 delivery vans to electric."
//! enable_internal_search = true
//!
//! [[hearing]]
//! role = "assistant"
//! message = "What is the budget?"
//!
//! [[hearing]]
//! role = "user"
//! message = "1.2M EUR over three years"
//! field = "budget"
//! ```

use anyhow::{Context, Result};
use proposal_application::RunProposalInput;
use proposal_domain::{HearingMessage, JobConfig, Problem, ProblemId};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct ProblemFile {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enable_internal_search: bool,
    /// Existing draft to refine.
    pub content: Option<String>,
    /// Fixed goal; generated when absent.
    pub goal: Option<String>,
    #[serde(default)]
    pub hearing: Vec<HearingMessage>,
}

impl ProblemFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read problem file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse problem file {}", path.display()))
    }

    pub fn into_input(self) -> Result<RunProposalInput> {
        let id = self.id.map(ProblemId::new).unwrap_or_else(ProblemId::generate);
        let problem = Problem::new(id, self.title, self.description)?;
        let mut input = RunProposalInput::new(problem)
            .with_hearing(self.hearing)
            .with_job(JobConfig::default().with_internal_search(self.enable_internal_search));
        if let Some(content) = self.content {
            input = input.with_initial_content(content);
        }
        if let Some(goal) = self.goal {
            input = input.with_goal(goal);
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proposal_domain::HearingRole;

    #[test]
    fn test_parse_problem_file() {
        let file: ProblemFile = toml::from_str(
            r#"
id = "fleet-2026"
title = "Fleet electrification"
description = "Switch 40 delivery vans to electric."
enable_internal_search = true

[[hearing]]
role = "assistant"
message = "What is the budget?"

[[hearing]]
role = "user"
message = "1.2M EUR over three years"
field = "budget"
"#,
        )
        .unwrap();

        let input = file.into_input().unwrap();
        assert_eq!(input.problem.id.as_str(), "fleet-2026");
        assert!(input.job.enable_internal_search);
        assert_eq!(input.hearing.len(), 2);
        assert_eq!(input.hearing[1].role, HearingRole::User);
        assert_eq!(input.hearing[1].field.as_deref(), Some("budget"));
        assert!(input.goal.is_none());
    }

    #[test]
    fn test_minimal_problem_file_generates_id() {
        let file: ProblemFile = toml::from_str("title = \"Solar roofs\"").unwrap();
        let input = file.into_input().unwrap();
        assert!(!input.problem.id.as_str().is_empty());
        assert!(!input.job.enable_internal_search);
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let file: ProblemFile = toml::from_str("title = \"  \"").unwrap();
        assert!(file.into_input().is_err());
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = ProblemFile::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
