use serde::Serialize;

use super::error::BudgetError;
use super::tokens::estimate_tokens;

/// A contiguous slice of the source text, sized for a model call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// The text content of this chunk
    pub text: String,
    /// Metadata about the chunk
    pub metadata: ChunkMetadata,
}

/// Metadata for a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkMetadata {
    /// Position of this chunk in the sequence
    pub index: usize,
    /// Character offset in the source text (start, inclusive)
    pub start_offset: usize,
    /// Character offset in the source text (end, exclusive)
    pub end_offset: usize,
    /// Estimated token count
    pub token_count: usize,
}

impl Chunk {
    /// Length of the chunk in characters
    pub fn char_len(&self) -> usize {
        self.metadata.end_offset - self.metadata.start_offset
    }
}

/// Split `text` into windows of `chunk_size` characters, each starting
/// `chunk_size - overlap` characters after the previous one.
///
/// Offsets count Unicode scalar values, so a window never cuts through a
/// multi-byte character. Empty text yields no chunks. The configuration is
/// checked before anything is produced: a zero `chunk_size`, or an `overlap`
/// that would stop the window from advancing, is rejected.
pub fn split_into_chunks(
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<Chunk>, BudgetError> {
    if chunk_size == 0 {
        return Err(BudgetError::invalid("chunk size must be positive"));
    }
    if overlap >= chunk_size {
        return Err(BudgetError::invalid(format!(
            "chunk overlap ({}) must be smaller than chunk size ({})",
            overlap, chunk_size
        )));
    }

    if text.is_empty() {
        return Ok(vec![]);
    }

    // Byte position of every char boundary, plus the end of the string
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = boundaries.len() - 1;
    let step = chunk_size - overlap;

    let mut chunks = Vec::with_capacity(char_len.div_ceil(step));
    let mut start = 0;

    while start < char_len {
        let end = start.saturating_add(chunk_size).min(char_len);
        let slice = &text[boundaries[start]..boundaries[end]];

        chunks.push(Chunk {
            text: slice.to_string(),
            metadata: ChunkMetadata {
                index: chunks.len(),
                start_offset: start,
                end_offset: end,
                token_count: estimate_tokens(slice),
            },
        });

        start += step;
    }

    Ok(chunks)
}
