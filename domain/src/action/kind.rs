//! Action kinds: the closed set of steps the agent can take.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of action taken in one iteration of the proposal loop.
///
/// The set is closed: tags outside of it are rejected by [`FromStr`] and by
/// serde deserialization alike.
///
/// | Kind | Executable | Counted by fallback |
/// |------|:---:|:---:|
/// | `plan`, `analyze`, `write`, `review` | yes | yes |
/// | `search`, `externalSearch`, `internalSearch` | yes | as `search` |
/// | `done` | no (ends the run) | no |
/// | `orchestrator`, `reflection`, `summarize` | no (bookkeeping) | no |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Plan,
    Search,
    ExternalSearch,
    InternalSearch,
    Analyze,
    Write,
    Review,
    Done,
    Orchestrator,
    Reflection,
    Summarize,
}

impl ActionKind {
    pub const ALL: [ActionKind; 11] = [
        ActionKind::Plan,
        ActionKind::Search,
        ActionKind::ExternalSearch,
        ActionKind::InternalSearch,
        ActionKind::Analyze,
        ActionKind::Write,
        ActionKind::Review,
        ActionKind::Done,
        ActionKind::Orchestrator,
        ActionKind::Reflection,
        ActionKind::Summarize,
    ];

    /// Candidates considered by the least-frequent fallback, in tie-break order.
    pub const FALLBACK_CANDIDATES: [ActionKind; 5] = [
        ActionKind::Plan,
        ActionKind::Search,
        ActionKind::Analyze,
        ActionKind::Write,
        ActionKind::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Plan => "plan",
            ActionKind::Search => "search",
            ActionKind::ExternalSearch => "externalSearch",
            ActionKind::InternalSearch => "internalSearch",
            ActionKind::Analyze => "analyze",
            ActionKind::Write => "write",
            ActionKind::Review => "review",
            ActionKind::Done => "done",
            ActionKind::Orchestrator => "orchestrator",
            ActionKind::Reflection => "reflection",
            ActionKind::Summarize => "summarize",
        }
    }

    /// Whether an executor exists for this kind.
    pub fn is_executable(&self) -> bool {
        matches!(
            self,
            ActionKind::Plan
                | ActionKind::Search
                | ActionKind::ExternalSearch
                | ActionKind::InternalSearch
                | ActionKind::Analyze
                | ActionKind::Write
                | ActionKind::Review
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ActionKind::Done)
    }

    pub fn is_search(&self) -> bool {
        matches!(
            self,
            ActionKind::Search | ActionKind::ExternalSearch | ActionKind::InternalSearch
        )
    }

    /// The fallback bucket this kind is counted under, if any.
    ///
    /// Search variants fold into [`ActionKind::Search`]; terminal and
    /// bookkeeping kinds are not counted.
    pub fn fallback_family(&self) -> Option<ActionKind> {
        match self {
            ActionKind::Plan | ActionKind::Analyze | ActionKind::Write | ActionKind::Review => {
                Some(*self)
            }
            kind if kind.is_search() => Some(ActionKind::Search),
            _ => None,
        }
    }

    /// Short description shown to the orchestrator in the action catalog.
    pub fn description(&self) -> &'static str {
        match self {
            ActionKind::Plan => {
                "Draw up or revise the plan: break the goal into steps and decide what information is still missing."
            }
            ActionKind::Search => {
                "Run a single web or document search for one specific piece of missing information."
            }
            ActionKind::ExternalSearch => {
                "Split the open questions into several topics and research them on the web in parallel."
            }
            ActionKind::InternalSearch => {
                "Split the open questions into several topics and research them in the problem's own documents."
            }
            ActionKind::Analyze => {
                "Analyze the collected information, compare options and derive conclusions for the proposal."
            }
            ActionKind::Write => "Write or rewrite the proposal draft using everything gathered so far.",
            ActionKind::Review => {
                "Review the current draft critically and list concrete improvements."
            }
            ActionKind::Done => "The proposal is complete and meets the goal; stop working.",
            ActionKind::Orchestrator => "Decision made by the orchestrator.",
            ActionKind::Reflection => "Reflection on the progress so far.",
            ActionKind::Summarize => "Compaction of the working history.",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| DomainError::InvalidActionKind(tag.to_string()))
    }
}
