//! Prompt templates for the action executors.

use crate::agent::RunState;

/// Templates for plan, analyze, write, review and single-shot search
pub struct ActionPromptTemplate;

impl ActionPromptTemplate {
    pub fn plan_system() -> String {
        r#"You plan the work on a client proposal.
Break the goal into concrete steps, name the information that is still missing and
where it could be found, and say what the finished document must contain.
Refine the existing plan when there is one instead of starting over."#
            .to_string()
    }

    pub fn analyze_system() -> String {
        r#"You analyze the information gathered for a client proposal.
Compare options, weigh costs, risks and benefits, and derive conclusions that the
proposal can rely on. Cite the sources (URLs or documents) each conclusion is based on.
Point out contradictions and gaps."#
            .to_string()
    }

    pub fn write_system() -> String {
        r#"You write the proposal document.
Produce the complete, updated proposal in Markdown, building on the current content and
on everything in the history. Keep references to sources. Do not invent figures.
Also state in one or two sentences what you changed and why."#
            .to_string()
    }

    pub fn review_system() -> String {
        r#"You review a proposal draft like a demanding client would.
Check it against the goal: completeness, correctness, structure, persuasiveness and
clarity. List concrete, actionable improvements in order of importance.
If there is no draft yet, say what must be written first."#
            .to_string()
    }

    pub fn search_system() -> String {
        r#"You gather information for a client proposal.
Pick the single most valuable piece of missing information and call one search tool
to find it. Use precise queries."#
            .to_string()
    }

    /// User prompt shared by the text executors.
    pub fn step_user(state: &RunState, instruction: &str) -> String {
        format!("{}\n## Task\n{}", state.to_prompt(), instruction)
    }
}
