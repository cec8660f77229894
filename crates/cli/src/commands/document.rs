//! Single-document command handlers: question answering, summary and
//! classification.

use clap::Args;
use lexibot_core::{config::AppConfig, AppResult};
use lexibot_knowledge::{ask_document, classify, parser, summarize};
use std::path::PathBuf;

/// Ask a question about one document
#[derive(Args, Debug)]
pub struct AskDocCommand {
    /// Document to read (.txt or .md)
    pub file: PathBuf,

    /// The question to ask
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskDocCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask-doc command for {:?}", self.file);

        let text = parser::read_document(&self.file)?;
        let llm = super::llm_client(config)?;
        let embedder = super::embedding_provider(config).await?;
        let options = super::assistant_options(config);

        let response = ask_document(embedder, llm.as_ref(), &options, &text, &self.query).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            println!("{}", response.answer);
        }

        Ok(())
    }
}

/// Summarize a legal document
#[derive(Args, Debug)]
pub struct SummarizeCommand {
    /// Document to read (.txt or .md)
    pub file: PathBuf,

    /// Output as JSON (includes per-part summaries)
    #[arg(long)]
    pub json: bool,
}

impl SummarizeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing summarize command for {:?}", self.file);

        let text = parser::read_document(&self.file)?;
        let llm = super::llm_client(config)?;
        let options = super::assistant_options(config);

        let summary = summarize(llm.as_ref(), &options, &text).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("{}", summary.summary);
        }

        Ok(())
    }
}

/// Classify a legal document (Agreement, Petition, Notice, Judgment, Other)
#[derive(Args, Debug)]
pub struct ClassifyCommand {
    /// Document to read (.txt or .md)
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ClassifyCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing classify command for {:?}", self.file);

        let text = parser::read_document(&self.file)?;
        let llm = super::llm_client(config)?;
        let options = super::assistant_options(config);

        let classification = classify(llm.as_ref(), &options, &text).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&classification)?);
        } else {
            println!(
                "{} (confidence {:.2})",
                classification.category, classification.confidence
            );
        }

        Ok(())
    }
}
