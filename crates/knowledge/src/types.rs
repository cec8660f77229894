//! Retrieval type definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String metadata attached to every chunk of one document.
pub type Metadata = BTreeMap<String, String>;

/// Metadata applied when a document is added without any.
pub fn default_metadata() -> Metadata {
    Metadata::from([
        ("source".to_string(), "user_upload".to_string()),
        ("type".to_string(), "legal_document".to_string()),
    ])
}

/// A chunk returned by similarity search, in rank order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievedChunk {
    /// Chunk text
    pub content: String,

    /// Metadata of the document the chunk came from
    pub metadata: Metadata,

    /// Squared Euclidean distance to the query (lower is closer)
    pub distance: f32,

    /// Chunk position in the knowledge store
    pub position: usize,
}

/// Maximum characters of chunk text shown in a source reference.
pub const MAX_SOURCE_PREVIEW: usize = 200;

/// User-facing reference to a chunk used to answer a query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceRef {
    /// Chunk preview, truncated with "..." when longer than the limit
    pub content: String,

    /// `source` metadata of the chunk, or "Unknown"
    pub source: String,
}

impl SourceRef {
    pub fn from_chunk(chunk: &RetrievedChunk) -> Self {
        let mut content: String = chunk.content.chars().take(MAX_SOURCE_PREVIEW).collect();
        if chunk.content.chars().count() > MAX_SOURCE_PREVIEW {
            content.push_str("...");
        }

        Self {
            content,
            source: chunk
                .metadata
                .get("source")
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Snapshot of an engine's corpus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineStats {
    /// Documents that produced at least one chunk
    pub documents: usize,

    /// Chunks in the store (equal to vectors in the index)
    pub chunks: usize,

    /// Index dimension, once known
    pub dimension: Option<usize>,
}
