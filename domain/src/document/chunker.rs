//! Fixed-size chunking with overlapping context windows.
//!
//! The text is cut into consecutive centers of [`CHUNK_SIZE`] characters.
//! Each chunk embeds its center plus [`CHUNK_OVERLAP`] characters on either
//! side, and carries a wider parent window (up to [`PARENT_CHUNK_SIZE`]
//! characters) that search results return as context.

/// Characters in the center of each chunk.
pub const CHUNK_SIZE: usize = 200;
/// Characters added on each side of the center for the embedded content.
pub const CHUNK_OVERLAP: usize = 50;
/// Maximum characters of the parent window.
pub const PARENT_CHUNK_SIZE: usize = 1000;

/// A chunk and its surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Text that gets embedded.
    pub content: String,
    /// Wider window returned to the model.
    pub parent_content: String,
}

/// Splits `text` into chunks after collapsing all whitespace runs into a
/// single space. Blank input yields no chunks.
pub fn chunk_text(text: &str) -> Vec<TextChunk> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars: Vec<char> = normalized.chars().collect();
    let total = chars.len();
    let half_parent = (PARENT_CHUNK_SIZE - CHUNK_SIZE) / 2;
    let window = |start: usize, end: usize| chars[start..end].iter().collect::<String>();

    (0..total)
        .step_by(CHUNK_SIZE)
        .map(|center_start| {
            let center_end = (center_start + CHUNK_SIZE).min(total);
            TextChunk {
                content: window(
                    center_start.saturating_sub(CHUNK_OVERLAP),
                    (center_end + CHUNK_OVERLAP).min(total),
                ),
                parent_content: window(
                    center_start.saturating_sub(half_parent),
                    (center_end + half_parent).min(total),
                ),
            }
        })
        .collect()
}
