//! Whole-document analysis: summaries and category classification.

pub mod classify;
pub mod summarize;

pub use classify::{classify, parse_classification, Classification, DocumentCategory};
pub use summarize::{summarize, DocumentSummary};

/// Characters of document text handled by one LLM call.
pub const ANALYSIS_WINDOW_CHARS: usize = 6000;
