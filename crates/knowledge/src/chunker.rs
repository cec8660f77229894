//! Text chunking with configurable size and overlap.
//!
//! Sizes and offsets are counted in characters, so a chunk boundary never
//! lands inside a multi-byte character.

use crate::error::{RetrievalError, RetrievalResult};

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between consecutive chunks in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Splits text into fixed-size, overlapping windows.
///
/// A `Chunker` can only be built with `chunk_size > 0` and
/// `overlap < chunk_size`, so chunking itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    chunk_size: usize,
    overlap: usize,
}

impl Chunker {
    /// Create a chunker, validating the window parameters.
    pub fn new(chunk_size: usize, overlap: usize) -> RetrievalResult<Self> {
        if chunk_size == 0 {
            return Err(RetrievalError::InvalidConfiguration(
                "chunk size must be greater than zero".to_string(),
            ));
        }

        if overlap >= chunk_size {
            return Err(RetrievalError::InvalidConfiguration(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Chunk text into overlapping segments.
    ///
    /// Windows start at character offsets `0, step, 2*step, ...` where
    /// `step = chunk_size - overlap`, and continue while the start offset is
    /// inside the text. The last window may be shorter than `chunk_size`.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every character start, plus the end of the text
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_len = boundaries.len() - 1;
        let step = self.chunk_size - self.overlap;

        let mut chunks = Vec::with_capacity(char_len / step + 1);
        let mut start = 0;

        while start < char_len {
            let end = start.saturating_add(self.chunk_size).min(char_len);
            chunks.push(text[boundaries[start]..boundaries[end]].to_string());
            start = start.saturating_add(step);
        }

        tracing::debug!(
            "Chunked {} characters into {} chunks (size: {}, overlap: {})",
            char_len,
            chunks.len(),
            self.chunk_size,
            self.overlap
        );

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}
