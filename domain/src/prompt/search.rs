//! Prompt templates for the decompose/explore/synthesize search pipeline.

use crate::agent::RunState;

/// Templates for the search pipeline stages
pub struct SearchPromptTemplate;

impl SearchPromptTemplate {
    pub fn decompose_system(max_topics: usize, internal: bool) -> String {
        let source = if internal {
            "the documents attached to this problem"
        } else {
            "the public web"
        };
        format!(
            r#"You prepare research for a client proposal.
Identify the most important information gaps in the current state and turn them into
at most {max_topics} independent search topics to look up in {source}.
Each topic is one short, specific phrase. Do not repeat topics that the history
already answers."#
        )
    }

    pub fn decompose_user(state: &RunState) -> String {
        format!("{}\nList the search topics.", state.to_prompt())
    }

    pub fn explore_system() -> String {
        r#"You research one topic for a client proposal.
Call the search tool that is most likely to answer the topic, with a precise query.
If no tool can help, answer without calling one."#
            .to_string()
    }

    pub fn explore_user(goal: &str, topic: &str) -> String {
        format!("## Goal\n{}\n\n## Topic\n{}", goal, topic)
    }

    pub fn synthesize_system() -> String {
        r#"You condense search results into research notes for a client proposal.
Keep only facts relevant to the goal. Keep numbers and dates exact and cite the URL
or document name next to each fact. Never add facts that are not in the results."#
            .to_string()
    }

    pub fn synthesize_user(goal: &str, block: &str) -> String {
        format!("## Goal\n{}\n\n{}\n\nWrite the research notes.", goal, block)
    }
}
