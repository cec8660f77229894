//! Command handlers for the LexiBot CLI.
//!
//! This module organizes all CLI commands into separate submodules, plus the
//! wiring they share: engine construction, document ingestion and the LLM
//! client.

pub mod ask;
pub mod chat;
pub mod document;
pub mod prompts;
pub mod search;
pub mod session;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use document::{AskDocCommand, ClassifyCommand, SummarizeCommand};
pub use prompts::PromptsCommand;
pub use search::SearchCommand;

use lexibot_core::{config::AppConfig, AppResult};
use lexibot_knowledge::{
    create_provider, parser, AssistantOptions, EmbeddingProvider, Metadata, RetrievalConfig,
    RetrievalEngine,
};
use lexibot_llm::{create_client, LlmClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Retrieval settings from the workspace config file.
pub fn retrieval_config(config: &AppConfig) -> AppResult<RetrievalConfig> {
    RetrievalConfig::load(&config.config_path())
}

/// Embedding provider described by the workspace config.
pub async fn embedding_provider(config: &AppConfig) -> AppResult<Arc<dyn EmbeddingProvider>> {
    create_provider(&retrieval_config(config)?.embedding).await
}

/// Build an empty engine from the workspace config.
pub async fn build_engine(config: &AppConfig) -> AppResult<RetrievalEngine> {
    RetrievalEngine::from_config(&retrieval_config(config)?).await
}

/// Index every document under `paths`, returning `(documents, chunks)`.
pub async fn ingest(engine: &RetrievalEngine, paths: &[PathBuf]) -> AppResult<(usize, usize)> {
    let documents = parser::collect_documents(paths)?;
    let mut chunks = 0;

    for path in &documents {
        let text = parser::read_document(path)?;
        let added = engine.add_document(&text, Some(document_metadata(path))).await?;
        tracing::debug!("Indexed {:?} ({} chunks)", path, added);
        chunks += added;
    }

    tracing::info!("Indexed {} documents ({} chunks)", documents.len(), chunks);
    Ok((documents.len(), chunks))
}

/// Metadata recorded for a document read from disk.
pub fn document_metadata(path: &Path) -> Metadata {
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    Metadata::from([
        ("source".to_string(), source),
        ("path".to_string(), path.to_string_lossy().into_owned()),
        ("type".to_string(), "legal_document".to_string()),
    ])
}

/// Create the LLM client for the active provider.
pub fn llm_client(config: &AppConfig) -> AppResult<Arc<dyn LlmClient>> {
    config.validate()?;

    let endpoint = config.provider_endpoint(&config.provider);
    let api_key = config.resolve_api_key(&config.provider);
    create_client(&config.provider, endpoint.as_deref(), api_key.as_deref())
}

/// Options shared by every LLM-backed command.
pub fn assistant_options(config: &AppConfig) -> AssistantOptions {
    AssistantOptions::new(config.model.as_str()).with_workspace(config.workspace.clone())
}
