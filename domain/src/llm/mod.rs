//! Language model value objects
//!
//! Provider-neutral descriptions of which model to call and how.

pub mod model;

pub use model::{ModelSelector, Provider, TokenCount};
