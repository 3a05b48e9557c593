//! Run judge: scores a finished run with a judge model.
//!
//! The judge is asked several times with a slightly higher temperature each
//! round and the verdicts are merged with [`Judgment::aggregate`].

use crate::error::AgentError;
use crate::ports::llm_client::{GenerationRequest, LlmClient};
use crate::services::shared::generate_json;
use proposal_domain::evaluation::{JUDGMENT_SCORE_MAX, JUDGMENT_SCORE_MIN};
use proposal_domain::{ActionRecord, JudgePromptTemplate, Judgment, ModelSelector, Problem};
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_JUDGE_ROUNDS: usize = 3;

/// Temperature added per judging round, starting from 0.0.
const ROUND_TEMPERATURE_STEP: f32 = 0.1;

pub struct RunJudge<L: LlmClient + 'static> {
    llm: Arc<L>,
    model: ModelSelector,
    rounds: usize,
}

impl<L: LlmClient + 'static> RunJudge<L> {
    pub fn new(llm: Arc<L>, model: ModelSelector) -> Self {
        Self {
            llm,
            model,
            rounds: DEFAULT_JUDGE_ROUNDS,
        }
    }

    /// Number of judging rounds, at least one.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds.max(1);
        self
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    fn schema() -> serde_json::Value {
        let score = |description: &str| {
            serde_json::json!({
                "type": "integer",
                "minimum": JUDGMENT_SCORE_MIN,
                "maximum": JUDGMENT_SCORE_MAX,
                "description": description,
            })
        };
        serde_json::json!({
            "type": "object",
            "properties": {
                "overall_score": score("Overall score"),
                "reliability": score("Sources and references"),
                "logical_consistency": score("Logical consistency"),
                "practicality": score("Practicality and feasibility"),
                "completeness": score("Coverage and completeness"),
                "action_appropriateness": score("Appropriateness of the executed actions"),
                "goal_achievement": score("Degree of goal achievement"),
                "goal_achieved": { "type": "boolean", "description": "Whether the goal was fully met" },
                "summary": { "type": "string", "description": "Overall evaluation" },
                "strengths": { "type": "string", "description": "What was done well" },
                "weaknesses": { "type": "string", "description": "What should be improved" },
                "reasoning": { "type": "string", "description": "Reasoning behind the scores" },
            },
            "required": [
                "overall_score", "reliability", "logical_consistency", "practicality",
                "completeness", "action_appropriateness", "goal_achievement",
                "goal_achieved", "summary", "strengths", "weaknesses", "reasoning",
            ],
        })
    }

    /// Judges one finished run. Any failing round fails the judgment.
    pub async fn judge(
        &self,
        problem: &Problem,
        goal: &str,
        records: &[ActionRecord],
        content: &str,
    ) -> Result<Judgment, AgentError> {
        let user_prompt = JudgePromptTemplate::user(problem, goal, records, content);
        let schema = Self::schema();

        let mut verdicts = Vec::with_capacity(self.rounds);
        for round in 0..self.rounds {
            let request = GenerationRequest::new(
                self.model.clone(),
                JudgePromptTemplate::system(),
                user_prompt.clone(),
            )
            .with_temperature(round as f32 * ROUND_TEMPERATURE_STEP);

            let verdict: Judgment =
                generate_json(self.llm.as_ref(), &request, &schema, "judge").await?;
            debug!("Judge round {}: overall {}", round + 1, verdict.overall_score);
            verdicts.push(verdict.clamped());
        }

        let judgment = Judgment::aggregate(&verdicts)
            .ok_or_else(|| AgentError::malformed("judge", "no judging rounds"))?;
        info!(
            "Judged run: overall {}/{}, goal achieved: {}",
            judgment.overall_score, JUDGMENT_SCORE_MAX, judgment.goal_achieved
        );
        Ok(judgment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockLlm, model, sample_state};
    use proposal_domain::{ActionKind, ProblemId};
    use serde_json::json;

    fn verdict(score: u8, achieved: bool, summary: &str) -> serde_json::Value {
        json!({
            "overall_score": score,
            "reliability": score,
            "logical_consistency": score,
            "practicality": score,
            "completeness": score,
            "action_appropriateness": score,
            "goal_achievement": score,
            "goal_achieved": achieved,
            "summary": summary,
            "strengths": "",
            "weaknesses": "",
            "reasoning": "",
        })
    }

    fn records() -> Vec<ActionRecord> {
        vec![
            ActionRecord::new(ProblemId::new("problem-1"), ActionKind::Write, "", "# Draft")
                .unwrap(),
        ]
    }

    #[tokio::test]
    async fn test_judge_merges_rounds_with_rising_temperature() {
        let llm = Arc::new(MockLlm::new().with_structured([
            verdict(6, true, "ok"),
            verdict(8, true, "detailed and convincing"),
            verdict(15, false, "fine"),
        ]));
        let judge = RunJudge::new(llm.clone(), model());
        let state = sample_state(false);

        let judgment = judge
            .judge(state.problem(), state.goal(), &records(), "# Draft")
            .await
            .unwrap();

        // 15 is clamped to 10 before merging: (6 + 8 + 10) / 3
        assert_eq!(judgment.overall_score, 8);
        assert!(judgment.goal_achieved);
        assert_eq!(judgment.summary, "detailed and convincing");

        let requests = llm.structured_requests.lock().unwrap();
        let temperatures: Vec<f32> = requests.iter().map(|r| r.temperature).collect();
        assert_eq!(temperatures.len(), 3);
        assert_eq!(temperatures[0], 0.0);
        assert!(temperatures[2] > temperatures[1] && temperatures[1] > temperatures[0]);
        assert!(requests[0].user_prompt.contains("Fleet electrification"));
        assert!(requests[0].user_prompt.contains("### Action 1: write"));
    }

    #[tokio::test]
    async fn test_malformed_verdict_fails() {
        let llm = Arc::new(MockLlm::new().with_structured([json!({ "overall_score": "great" })]));
        let judge = RunJudge::new(llm, model()).with_rounds(1);
        let state = sample_state(false);

        let err = judge
            .judge(state.problem(), state.goal(), &records(), "# Draft")
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::MalformedOutput { stage: "judge", .. }));
    }

    #[test]
    fn test_rounds_at_least_one() {
        let judge = RunJudge::new(Arc::new(MockLlm::new()), model()).with_rounds(0);
        assert_eq!(judge.rounds(), 1);
    }
}
