//! RAG response types.

use crate::types::SourceRef;
use serde::{Deserialize, Serialize};

/// Answer synthesized from retrieved context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagResponse {
    /// Natural language answer from the LLM
    pub answer: String,

    /// Chunks the answer was grounded on, in rank order
    pub sources: Vec<SourceRef>,

    /// Whether any context was retrieved for the question
    pub has_context: bool,
}
