//! Prompt domain
//!
//! Templates for every model call made during a proposal run.

pub mod action;
pub mod agent;
pub mod judge;
pub mod search;

pub use action::ActionPromptTemplate;
pub use agent::AgentPromptTemplate;
pub use judge::JudgePromptTemplate;
pub use search::SearchPromptTemplate;
