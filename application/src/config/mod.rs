//! Application-level configuration.
//!
//! - [`AgentParams`]: models, loop limits and search limits of a run
//! - [`SummarizeThresholds`]: when the history gets compacted

pub mod agent_params;

pub use agent_params::{
    AgentParams, MAX_TOPICS, ModelAssignment, SearchMode, SummarizeThresholds,
};
