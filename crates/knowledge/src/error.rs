//! Retrieval error taxonomy.

use lexibot_core::AppError;
use thiserror::Error;

/// Errors raised by the retrieval engine and its components.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RetrievalError {
    #[error("Invalid retrieval configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Chunk index {index} out of range (store holds {len} chunks)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot search an empty corpus")]
    EmptyCorpusQuery,

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Result type alias for retrieval operations.
pub type RetrievalResult<T> = Result<T, RetrievalError>;

impl From<RetrievalError> for AppError {
    fn from(err: RetrievalError) -> Self {
        AppError::Knowledge(err.to_string())
    }
}
