//! Infrastructure layer for proposal-agent
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod search;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileLlmConfig,
    FileLoggingConfig, FileSearchConfig,
};
pub use gemini::GeminiClient;
pub use logging::JsonlRunEventLogger;
pub use search::{GoogleWebSearchClient, HtmlPageScraper, InMemoryDocumentIndex};
pub use store::InMemoryActionStore;
