//! Decisions made by the control-loop services each iteration.

use crate::action::ActionKind;
use serde::{Deserialize, Serialize};

/// Reason reported when the iteration ceiling stops the loop.
pub const LOOP_CEILING_REASON: &str = "loop ceiling reached";

/// Reason recorded when the last allowed iteration is turned into a `write`.
pub const FORCED_WRITE_REASON: &str =
    "last allowed iteration and no draft written yet; forcing write";

/// The orchestrator's choice of next action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDecision {
    pub kind: ActionKind,
    pub reason: String,
}

impl ActionDecision {
    pub fn new(kind: ActionKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// The `write` decision that replaces the orchestrator on the last
    /// allowed iteration of a run that has not written a draft.
    pub fn forced_write() -> Self {
        Self::new(ActionKind::Write, FORCED_WRITE_REASON)
    }
}

/// The skipper's verdict on a chosen action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipDecision {
    pub should_skip: bool,
    #[serde(default)]
    pub reason: String,
}

impl SkipDecision {
    pub fn skip(reason: impl Into<String>) -> Self {
        Self {
            should_skip: true,
            reason: reason.into(),
        }
    }

    pub fn proceed(reason: impl Into<String>) -> Self {
        Self {
            should_skip: false,
            reason: reason.into(),
        }
    }
}

/// The terminator's verdict on whether to stop the loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminationDecision {
    pub should_terminate: bool,
    #[serde(default)]
    pub reason: String,
}

impl TerminationDecision {
    pub fn terminate(reason: impl Into<String>) -> Self {
        Self {
            should_terminate: true,
            reason: reason.into(),
        }
    }

    pub fn proceed(reason: impl Into<String>) -> Self {
        Self {
            should_terminate: false,
            reason: reason.into(),
        }
    }

    pub fn ceiling_reached() -> Self {
        Self::terminate(LOOP_CEILING_REASON)
    }
}
