//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod evaluate_proposal;
pub mod run_proposal;
