//! Problem domain
//!
//! The problem is the user's request the agent writes a proposal for. It is
//! owned externally and read-only for the duration of a run.

pub mod entities;

pub use entities::{HearingMessage, HearingRole, JobConfig, Problem, ProblemId};
