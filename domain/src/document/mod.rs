//! Document chunking for similarity search.

mod chunker;

pub use chunker::{CHUNK_OVERLAP, CHUNK_SIZE, PARENT_CHUNK_SIZE, TextChunk, chunk_text};
