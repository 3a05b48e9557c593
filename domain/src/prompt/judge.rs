//! Prompt templates for judging a finished run.

use crate::action::ActionRecord;
use crate::problem::Problem;
use crate::util::truncate_chars;

/// Per-field cap on action input and output shown to the judge.
pub const JUDGE_ACTION_EXCERPT_CHARS: usize = 500;

/// Templates for the evaluation judge
pub struct JudgePromptTemplate;

impl JudgePromptTemplate {
    pub fn system() -> String {
        r#"You evaluate the work of an autonomous consultant that wrote a client proposal.

Work through it step by step:
1. Understand the problem and what deliverable the client expects.
2. Go through the executed actions: what was each one for, and did it move the work forward?
3. Read the final proposal: is the solution clear, concrete, feasible and consistent?
4. Judge how well the goal was met.

Score each criterion from 1 to 10:
- reliability: a sources section exists and cites primary or official sources with
  author or organization, title, year and URL. 1-2 means no sources at all.
- logical_consistency: no leaps in reasoning, every claim has a stated basis.
- practicality: concrete and actionable, figures can be traced and reproduced.
- completeness: every element the deliverable needs is covered.
- action_appropriateness: actions were strategic and efficient, with no stalls or
  pointless repetition.
- goal_achievement: the stated goal is fully met and the deliverable is explicit.
- overall_score: weigh reliability and goal achievement most, then the balance of the rest.

Set goal_achieved to true only if the proposal fully delivers what the goal asks for.
Be objective and constructive, and ground every judgement in specific evidence."#
            .to_string()
    }

    pub fn user(problem: &Problem, goal: &str, records: &[ActionRecord], content: &str) -> String {
        let mut out = format!(
            "## Problem\nTitle: {}\n{}\n\n## Goal\n{}\n\n## Executed Actions\n{} actions were executed.\n",
            problem.title,
            problem.description,
            goal,
            records.len()
        );
        for (step, record) in records.iter().enumerate() {
            out.push_str(&format!("\n### Action {}: {}\n", step + 1, record.kind));
            if !record.input.is_empty() {
                out.push_str(&format!(
                    "Input:\n{}\n",
                    truncate_chars(&record.input, JUDGE_ACTION_EXCERPT_CHARS)
                ));
            }
            out.push_str(&format!(
                "Output:\n{}\n",
                truncate_chars(record.output(), JUDGE_ACTION_EXCERPT_CHARS)
            ));
        }
        out.push_str(&format!("\n## Final Proposal\n{}\n", content));
        out.push_str("\nEvaluate this run.");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use crate::problem::ProblemId;

    #[test]
    fn test_user_prompt_lists_actions_and_truncates() {
        let problem = Problem::new("p", "Depot solar", "Cover the depot roofs").unwrap();
        let records = vec![
            ActionRecord::new(ProblemId::new("p"), ActionKind::Plan, "", "1. research").unwrap(),
            ActionRecord::new(
                ProblemId::new("p"),
                ActionKind::Search,
                "query=panel prices",
                "x".repeat(800),
            )
            .unwrap(),
        ];

        let prompt = JudgePromptTemplate::user(&problem, "A funded plan", &records, "# Proposal");

        assert!(prompt.contains("2 actions were executed."));
        assert!(prompt.contains("### Action 1: plan\nOutput:\n1. research"));
        assert!(prompt.contains("Input:\nquery=panel prices"));
        assert!(!prompt.contains(&"x".repeat(501)));
        assert!(prompt.contains("## Final Proposal\n# Proposal"));
    }
}
