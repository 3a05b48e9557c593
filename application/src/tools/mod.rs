//! Tool implementations built on the search ports.

pub mod search_toolset;

pub use search_toolset::SearchToolset;
