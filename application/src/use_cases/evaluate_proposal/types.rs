//! Type definitions for the EvaluateProposal use case.

use proposal_domain::Judgment;
use serde::Serialize;

/// Outcome of one evaluated run.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRun {
    /// 1-based run number.
    pub run: usize,
    pub duration_ms: u64,
    pub iterations: usize,
    /// `done` or `terminated`; empty when the run failed.
    pub stop_reason: String,
    pub action_count: usize,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judgment: Option<Judgment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvaluationRun {
    pub(super) fn failed(run: usize, duration_ms: u64, error: String) -> Self {
        Self {
            run,
            duration_ms,
            iterations: 0,
            stop_reason: String::new(),
            action_count: 0,
            content: String::new(),
            judgment: None,
            error: Some(error),
        }
    }
}

/// Report over all runs of one problem
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub problem_id: String,
    pub judge_rounds: usize,
    pub runs: Vec<EvaluationRun>,
    /// Mean overall score of the judged runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_overall: Option<f64>,
    pub goal_achieved_runs: usize,
}

impl EvaluationReport {
    pub(super) fn new(problem_id: String, judge_rounds: usize, runs: Vec<EvaluationRun>) -> Self {
        let scores: Vec<f64> = runs
            .iter()
            .filter_map(|r| r.judgment.as_ref())
            .map(|j| f64::from(j.overall_score))
            .collect();
        let mean_overall =
            (!scores.is_empty()).then(|| scores.iter().sum::<f64>() / scores.len() as f64);
        let goal_achieved_runs = runs
            .iter()
            .filter(|r| r.judgment.as_ref().is_some_and(|j| j.goal_achieved))
            .count();

        Self {
            problem_id,
            judge_rounds,
            runs,
            mean_overall,
            goal_achieved_runs,
        }
    }

    pub fn failed_runs(&self) -> usize {
        self.runs.iter().filter(|r| r.error.is_some()).count()
    }
}
