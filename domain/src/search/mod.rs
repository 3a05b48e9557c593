//! Search domain
//!
//! The uniform result shape returned by every search tool and consumed by
//! synthesis.

pub mod entities;

pub use entities::{SearchHit, SearchResult, SearchResults};
