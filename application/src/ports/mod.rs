//! Ports (interfaces) for external dependencies
//!
//! Everything the proposal loop consumes from the outside world goes through
//! one of these traits. Adapters live in the infrastructure layer.

pub mod action_store;
pub mod llm_client;
pub mod run_event_logger;
pub mod search;
pub mod tool_executor;
