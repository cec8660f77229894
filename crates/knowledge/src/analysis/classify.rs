//! Legal document category classification.

use super::ANALYSIS_WINDOW_CHARS;
use crate::assistant::{generate, AssistantOptions};
use lexibot_core::AppResult;
use lexibot_llm::LlmClient;
use lexibot_prompt::templates;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Document categories the classifier may answer with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DocumentCategory {
    Agreement,
    Petition,
    Notice,
    Judgment,
    Other,
}

impl DocumentCategory {
    /// Parse a label case-insensitively; unknown labels become `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "agreement" => Self::Agreement,
            "petition" => Self::Petition,
            "notice" => Self::Notice,
            "judgment" | "judgement" => Self::Judgment,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agreement => "Agreement",
            Self::Petition => "Petition",
            Self::Notice => "Notice",
            Self::Judgment => "Judgment",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    pub category: DocumentCategory,

    /// Model confidence in [0, 1]
    pub confidence: f32,
}

impl Classification {
    fn fallback() -> Self {
        Self {
            category: DocumentCategory::Other,
            confidence: 0.0,
        }
    }
}

/// Classify a document from its first 6000 characters.
pub async fn classify(
    llm: &dyn LlmClient,
    options: &AssistantOptions,
    text: &str,
) -> AppResult<Classification> {
    let excerpt: String = text.chars().take(ANALYSIS_WINDOW_CHARS).collect();

    let reply = generate(
        llm,
        options,
        templates::CLASSIFY_ID,
        &[("text", excerpt.as_str())],
    )
    .await?;

    let classification = parse_classification(&reply);
    tracing::info!(
        "Classified document as {} ({:.2})",
        classification.category,
        classification.confidence
    );

    Ok(classification)
}

/// Parse a model reply such as ```` ```json {"category": "Notice", "confidence": 0.9} ``` ````.
///
/// Markdown fences are stripped first. Anything that is not a JSON object
/// with a `category` falls back to `Other` with zero confidence.
pub fn parse_classification(reply: &str) -> Classification {
    let cleaned = reply.trim().replace("```json", "").replace("```", "");

    let value: Value = match serde_json::from_str(cleaned.trim()) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Unparseable classification reply: {}", e);
            return Classification::fallback();
        }
    };

    let Some(label) = value.get("category").and_then(Value::as_str) else {
        tracing::warn!("Classification reply has no category");
        return Classification::fallback();
    };

    let confidence = match value.get("confidence") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };

    let confidence = if confidence.is_finite() {
        confidence.clamp(0.0, 1.0) as f32
    } else {
        0.0
    };

    Classification {
        category: DocumentCategory::from_label(label),
        confidence,
    }
}
