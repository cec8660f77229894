//! Retrieval configuration management.
//!
//! Settings live under the `retrieval:` key of the workspace config file
//! (`.lexibot/config.yaml`), next to the sections read by `AppConfig`.

use crate::chunker::{Chunker, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::embeddings::EmbeddingConfig;
use crate::error::{RetrievalError, RetrievalResult};
use lexibot_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of chunks retrieved per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Retrieval engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    /// Chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Chunks retrieved per query when the caller does not say
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_chunk_overlap() -> usize {
    DEFAULT_CHUNK_OVERLAP
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
            embedding: EmbeddingConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    retrieval: Option<RetrievalConfig>,
}

impl RetrievalConfig {
    /// Load retrieval settings from a workspace config file.
    ///
    /// A missing file or a file without a `retrieval:` section yields the
    /// defaults. The result is validated before it is returned.
    pub fn load(config_path: &Path) -> AppResult<Self> {
        let config = if config_path.exists() {
            let content = fs::read_to_string(config_path).map_err(|e| {
                AppError::Config(format!("Failed to read config at {:?}: {}", config_path, e))
            })?;

            let file: ConfigFile = serde_yaml::from_str(&content).map_err(|e| {
                AppError::Config(format!(
                    "Failed to parse config at {:?}: {}",
                    config_path, e
                ))
            })?;

            file.retrieval.unwrap_or_default()
        } else {
            tracing::debug!(
                "No config file at {:?}, using default retrieval settings",
                config_path
            );
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Check chunking, top-k and embedding settings.
    pub fn validate(&self) -> RetrievalResult<()> {
        self.chunker()?;

        if self.top_k == 0 {
            return Err(RetrievalError::InvalidConfiguration(
                "top-k must be greater than zero".to_string(),
            ));
        }

        self.embedding.validate()
    }

    /// Build the chunker described by these settings.
    pub fn chunker(&self) -> RetrievalResult<Chunker> {
        Chunker::new(self.chunk_size, self.chunk_overlap)
    }
}
