//! Search command handler.
//!
//! Indexes documents into a fresh engine and prints the nearest chunks.

use clap::Args;
use lexibot_core::{config::AppConfig, AppError, AppResult};
use std::path::PathBuf;

/// Search documents for the passages closest to a query
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Query text
    pub query: String,

    /// Files or directories to index
    #[arg(long = "path", required = true)]
    pub paths: Vec<PathBuf>,

    /// Number of chunks to retrieve (default: retrieval.topK)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing search command");

        let engine = super::build_engine(config).await?;
        let (documents, chunks) = super::ingest(&engine, &self.paths).await?;
        let hits = engine.search_similar(&self.query, self.top_k).await?;

        if self.json {
            let output = serde_json::json!({
                "query": self.query,
                "documents": documents,
                "chunks": chunks,
                "results": hits,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        if hits.is_empty() {
            return Err(AppError::Knowledge(
                "No text found in the given paths".to_string(),
            ));
        }

        println!(
            "Searched {} chunks from {} documents\n",
            chunks, documents
        );
        for (rank, hit) in hits.iter().enumerate() {
            let source = hit.metadata.get("source").map_or("Unknown", String::as_str);
            println!(
                "{}. {} (chunk {}, distance {:.4})",
                rank + 1,
                source,
                hit.position,
                hit.distance
            );
            println!("{}\n", hit.content.trim());
        }

        Ok(())
    }
}
