//! RAG (Retrieval-Augmented Generation) answering.
//!
//! Answers legal questions from retrieved document context using the LLM.

pub mod chat;
pub mod types;

pub use chat::{ask_document, rag_chat};
pub use types::RagResponse;
