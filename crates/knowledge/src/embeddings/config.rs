//! Embedding configuration types.

use crate::error::{RetrievalError, RetrievalResult};
use serde::{Deserialize, Serialize};

/// Embedding configuration for a retrieval engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingConfig {
    /// Provider name: "trigram", "ollama"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier (provider-specific)
    #[serde(default = "default_model")]
    pub model: String,

    /// Embedding vector dimensions
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// Whether to normalize embeddings to unit length
    #[serde(default = "default_normalize")]
    pub normalize: bool,

    /// Maximum number of texts sent to the provider per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Custom provider endpoint (Ollama base URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds for HTTP providers
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "trigram".to_string()
}

fn default_model() -> String {
    "trigram-v1".to_string()
}

fn default_dimensions() -> usize {
    384
}

fn default_normalize() -> bool {
    true
}

fn default_batch_size() -> usize {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            dimensions: default_dimensions(),
            normalize: default_normalize(),
            batch_size: default_batch_size(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmbeddingConfig {
    /// Check that the settings can produce a working provider.
    pub fn validate(&self) -> RetrievalResult<()> {
        if self.dimensions == 0 {
            return Err(RetrievalError::InvalidConfiguration(
                "embedding dimensions must be greater than zero".to_string(),
            ));
        }

        if self.batch_size == 0 {
            return Err(RetrievalError::InvalidConfiguration(
                "embedding batch size must be greater than zero".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(RetrievalError::InvalidConfiguration(
                "embedding model cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
