//! Map-reduce summarization of long legal documents.

use super::ANALYSIS_WINDOW_CHARS;
use crate::assistant::{generate, AssistantOptions};
use crate::chunker::Chunker;
use lexibot_core::{AppError, AppResult};
use lexibot_llm::LlmClient;
use lexibot_prompt::templates;
use serde::{Deserialize, Serialize};

/// Separator between part summaries in the combine prompt.
pub const PART_SEPARATOR: &str = "\n\n---\n\n";

/// Final summary plus the intermediate per-part summaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSummary {
    /// Structured summary (Overview, Key Clauses, Risks, Recommendations)
    pub summary: String,

    /// One summary per 6000-character part, in document order
    pub part_summaries: Vec<String>,
}

/// Summarize a document of any length.
///
/// The text is split into consecutive non-overlapping parts, each part is
/// summarized as `part i/n`, and the part summaries are combined into one
/// structured summary.
pub async fn summarize(
    llm: &dyn LlmClient,
    options: &AssistantOptions,
    text: &str,
) -> AppResult<DocumentSummary> {
    if text.trim().is_empty() {
        return Err(AppError::Knowledge(
            "Document contains no text to summarize".to_string(),
        ));
    }

    let parts = Chunker::new(ANALYSIS_WINDOW_CHARS, 0)?.chunk(text);
    let total = parts.len().to_string();

    tracing::info!("Summarizing document in {} parts", parts.len());

    let mut part_summaries = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        let number = (i + 1).to_string();
        let summary = generate(
            llm,
            options,
            templates::SUMMARY_PART_ID,
            &[
                ("part", number.as_str()),
                ("total", total.as_str()),
                ("text", part.as_str()),
            ],
        )
        .await?;

        tracing::debug!("Summarized part {}/{}", number, total);
        part_summaries.push(summary);
    }

    let combined = part_summaries.join(PART_SEPARATOR);
    let summary = generate(
        llm,
        options,
        templates::SUMMARY_COMBINE_ID,
        &[("summaries", combined.as_str())],
    )
    .await?;

    Ok(DocumentSummary {
        summary,
        part_summaries,
    })
}
