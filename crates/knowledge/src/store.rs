//! Positional store of chunk texts and their document metadata.

use crate::error::{RetrievalError, RetrievalResult};
use crate::types::Metadata;
use std::sync::Arc;

/// Append-only chunk storage.
///
/// Chunk `i` in the store corresponds to row `i` of the vector index.
#[derive(Debug, Default)]
pub struct KnowledgeStore {
    chunks: Vec<String>,
    metadata: Vec<Arc<Metadata>>,
}

impl KnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append chunks that share one metadata handle.
    pub fn append(&mut self, chunks: Vec<String>, metadata: Arc<Metadata>) {
        self.metadata
            .extend(std::iter::repeat_with(|| Arc::clone(&metadata)).take(chunks.len()));
        self.chunks.extend(chunks);
    }

    /// Look up a chunk and its metadata by position.
    pub fn get(&self, index: usize) -> RetrievalResult<(&str, &Arc<Metadata>)> {
        match (self.chunks.get(index), self.metadata.get(index)) {
            (Some(chunk), Some(metadata)) => Ok((chunk.as_str(), metadata)),
            _ => Err(RetrievalError::IndexOutOfRange {
                index,
                len: self.len(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
