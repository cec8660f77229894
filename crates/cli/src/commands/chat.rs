//! Chat command handler.
//!
//! Answers legal questions from indexed documents using RAG, keeping the
//! conversation so follow-up questions can refer to earlier answers.

use super::session::{check_query, next_question, open_session, save_session, stdin_questions};
use clap::Args;
use lexibot_core::{config::AppConfig, AppResult};
use lexibot_knowledge::{rag_chat, AssistantOptions, RagResponse, RetrievalEngine};
use lexibot_llm::{ChatSession, LlmClient};
use std::path::PathBuf;

/// Ask the legal assistant a question grounded in your documents
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// The question to ask (optional with --interactive)
    pub query: Option<String>,

    /// Files or directories to use as the knowledge base
    #[arg(long = "path")]
    pub paths: Vec<PathBuf>,

    /// Conversation file to resume and update
    #[arg(long)]
    pub session: Option<PathBuf>,

    /// Keep asking questions read from stdin
    #[arg(short, long)]
    pub interactive: bool,

    /// Temperature for response generation (0.0-2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");
        check_query(self.query.as_deref(), self.interactive)?;

        let llm = super::llm_client(config)?;
        let engine = super::build_engine(config).await?;
        if !self.paths.is_empty() {
            super::ingest(&engine, &self.paths).await?;
        }

        let mut options = super::assistant_options(config);
        options.temperature = self.temperature;

        let mut session = open_session(self.session.as_deref())?;

        if let Some(query) = &self.query {
            self.turn(&engine, llm.as_ref(), &options, &mut session, query)
                .await?;
        }

        if self.interactive {
            let mut questions = stdin_questions();
            while let Some(query) = next_question(&mut questions).await? {
                if let Err(e) = self
                    .turn(&engine, llm.as_ref(), &options, &mut session, &query)
                    .await
                {
                    tracing::error!("Chat turn failed: {}", e);
                    eprintln!("Error: {}", e);
                }
            }
        }

        Ok(())
    }

    async fn turn(
        &self,
        engine: &RetrievalEngine,
        llm: &dyn LlmClient,
        options: &AssistantOptions,
        session: &mut ChatSession,
        query: &str,
    ) -> AppResult<()> {
        let response = rag_chat(engine, llm, options, session, query).await?;
        save_session(session, self.session.as_deref())?;
        self.print(&response)
    }

    fn print(&self, response: &RagResponse) -> AppResult<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(response)?);
            return Ok(());
        }

        println!("{}", response.answer);

        if !response.has_context {
            println!("\n(No document context was found; answer is from general knowledge.)");
        }

        if !response.sources.is_empty() {
            println!("\nSources:");
            for (i, source) in response.sources.iter().enumerate() {
                println!("  {}. {}: {}", i + 1, source.source, source.content.trim());
            }
        }

        Ok(())
    }
}
