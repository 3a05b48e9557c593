//! Prompt templates for the control loop: goal, orchestrator, skipper,
//! terminator and history compaction.

use crate::action::ActionKind;
use crate::agent::RunState;

/// Templates for the control-loop services
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    pub fn goal_system() -> String {
        r#"You are a consultant preparing a written proposal for a client.
Read the problem and the hearing transcript and state the goal of the proposal:
what the finished document must achieve, for whom, and how its quality will be judged.
Answer with the goal statement only, in at most five sentences. Do not invent facts
that are not in the problem or the transcript."#
            .to_string()
    }

    pub fn goal_user(state: &RunState) -> String {
        format!(
            "{}\nWrite the goal statement for this proposal.",
            state.to_problem_prompt()
        )
    }

    pub fn orchestrator_system(catalog: &[ActionKind]) -> String {
        let actions = catalog
            .iter()
            .map(|kind| format!("- **{}**: {}", kind, kind.description()))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You coordinate an agent that writes a proposal document step by step.
Each step you choose exactly one action from the list below.

## Available Actions

{actions}

## Guidelines

1. Start with a plan when there is none yet.
2. Search when the plan or the draft depends on facts that are not known yet.
3. Analyze before writing when new information has arrived.
4. Review a draft before declaring it done.
5. Avoid repeating the same action without a new purpose.
6. Choose done only when the current content fully meets the goal.

Respond with the chosen action and a short reason."#
        )
    }

    pub fn orchestrator_user(state: &RunState) -> String {
        format!("{}\nChoose the next action.", state.to_prompt())
    }

    pub fn skipper_system() -> String {
        r#"You check whether the next action of a proposal-writing agent should be skipped.

Skip the action when any of the following holds:
1. It contradicts an explicit earlier directive in the history (for example a plan step
   that says searching is finished).
2. It needs a capability that is disabled for this problem. Internal document search
   must be skipped when internal document search is disabled.
3. The same action was just run for the same purpose and nothing new has arrived since.

Do not skip when a new objective justifies running the action again. When you skip,
explain which rule applies and suggest a more useful direction."#
            .to_string()
    }

    pub fn skipper_user(state: &RunState, kind: ActionKind) -> String {
        format!(
            "{}\n## Proposed Action\n{}: {}\n\nShould this action be skipped?",
            state.to_prompt(),
            kind,
            kind.description()
        )
    }

    pub fn terminator_system() -> String {
        r#"You decide whether a proposal-writing agent has finished.

Terminate only when the goal is demonstrably met: the current content is a complete
proposal that covers every point of the goal and reaches the expected quality.
Continue when content is missing, unreviewed, or still has open questions."#
            .to_string()
    }

    pub fn terminator_user(state: &RunState) -> String {
        format!("{}\nShould the work stop now?", state.to_prompt())
    }

    pub fn summarize_system() -> String {
        r#"You compress the working history of a proposal-writing agent.

Rewrite the history to roughly two thirds of its current length.
- Keep the chronological order and the cause and effect between steps
  (plan, then search, then write, then review).
- Copy every URL exactly as it appears. Never shorten, change or drop a URL.
- Keep every number, date, amount and other quantitative fact.
- Never add information that is not in the history.

Answer with the rewritten history only."#
            .to_string()
    }

    pub fn summarize_user(history: &str) -> String {
        format!("## History\n{}", history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{JobConfig, Problem};

    #[test]
    fn test_orchestrator_system_lists_catalog() {
        let prompt = AgentPromptTemplate::orchestrator_system(&[
            ActionKind::Plan,
            ActionKind::Write,
            ActionKind::Done,
        ]);
        assert!(prompt.contains("- **plan**"));
        assert!(prompt.contains("- **write**"));
        assert!(prompt.contains("- **done**"));
        assert!(!prompt.contains("- **review**"));
    }

    #[test]
    fn test_skipper_user_names_action() {
        let problem = Problem::new("p", "title", "desc").unwrap();
        let state = RunState::new(problem, vec![], JobConfig::default());
        let prompt = AgentPromptTemplate::skipper_user(&state, ActionKind::InternalSearch);
        assert!(prompt.contains("## Proposed Action\ninternalSearch:"));
        assert!(prompt.contains("Internal document search: disabled"));
    }
}
