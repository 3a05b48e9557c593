//! Tool domain
//!
//! Definitions of the tools the model may call through function calling,
//! and the calls it produces. Only the search toolset exists:
//!
//! | Tool | Backed by |
//! |------|-----------|
//! | `web_search` | web search index + concurrent page scraping |
//! | `document_search` | embedding similarity over the problem's documents |

pub mod catalog;
pub mod entities;
pub mod value_objects;

pub use catalog::{DOCUMENT_SEARCH, WEB_SEARCH, document_search_tool, web_search_tool};
pub use entities::{ToolCall, ToolDefinition, ToolParameter};
pub use value_objects::ToolError;
