//! Legal document retrieval and assistant flows.
//!
//! Documents are split into overlapping character windows, embedded, and kept
//! in an in-memory vector index. Retrieved chunks ground the LLM answers of
//! the chat, document question, summary and classification flows. Chat turns
//! share a `ChatSession` so follow-up questions keep their context.

pub mod analysis;
pub mod assistant;
pub mod chunker;
pub mod config;
pub mod conversation;
pub mod embeddings;
pub mod engine;
pub mod error;
pub mod parser;
pub mod rag;
pub mod store;
pub mod types;
pub mod vector_index;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use analysis::{classify, summarize, Classification, DocumentCategory, DocumentSummary};
pub use assistant::AssistantOptions;
pub use chunker::Chunker;
pub use config::RetrievalConfig;
pub use conversation::ask_query;
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use engine::RetrievalEngine;
pub use error::{RetrievalError, RetrievalResult};
pub use rag::{ask_document, rag_chat, RagResponse};
pub use store::KnowledgeStore;
pub use types::{default_metadata, EngineStats, Metadata, RetrievedChunk, SourceRef};
pub use vector_index::{FlatL2Index, Neighbor, VectorIndex};
