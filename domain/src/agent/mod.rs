//! Agent domain
//!
//! The shared [`RunState`] threaded through one proposal run, and the
//! decision values produced by the control-loop services.

pub mod decision;
pub mod state;

pub use decision::{
    ActionDecision, FORCED_WRITE_REASON, LOOP_CEILING_REASON, SkipDecision, TerminationDecision,
};
pub use state::RunState;
