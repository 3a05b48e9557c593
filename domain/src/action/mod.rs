//! Action domain
//!
//! An action is one step of the proposal loop. The orchestrator picks an
//! [`ActionKind`], an executor runs it, and the outcome is captured as an
//! [`ActionRecord`].

pub mod fallback;
pub mod kind;
pub mod record;

pub use fallback::{
    FALLBACK_WINDOW, select_least_frequent_action, select_least_frequent_action_excluding,
};
pub use kind::ActionKind;
pub use record::{ActionId, ActionOutput, ActionRecord};
