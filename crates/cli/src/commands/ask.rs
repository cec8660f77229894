//! Ask command handler.
//!
//! Plain conversation with the assistant, without document retrieval.

use super::session::{check_query, next_question, open_session, save_session, stdin_questions};
use clap::Args;
use lexibot_core::{config::AppConfig, AppResult};
use lexibot_knowledge::{ask_query, AssistantOptions};
use lexibot_llm::{ChatSession, LlmClient};
use std::path::PathBuf;

/// Chat with the legal assistant without searching documents
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask (optional with --interactive)
    pub query: Option<String>,

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

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        check_query(self.query.as_deref(), self.interactive)?;

        let llm = super::llm_client(config)?;
        let mut options = super::assistant_options(config);
        options.temperature = self.temperature;

        let mut session = open_session(self.session.as_deref())?;

        if let Some(query) = &self.query {
            self.turn(llm.as_ref(), &options, &mut session, query).await?;
        }

        if self.interactive {
            let mut questions = stdin_questions();
            while let Some(query) = next_question(&mut questions).await? {
                if let Err(e) = self.turn(llm.as_ref(), &options, &mut session, &query).await {
                    tracing::error!("Chat turn failed: {}", e);
                    eprintln!("Error: {}", e);
                }
            }
        }

        Ok(())
    }

    async fn turn(
        &self,
        llm: &dyn LlmClient,
        options: &AssistantOptions,
        session: &mut ChatSession,
        query: &str,
    ) -> AppResult<()> {
        let answer = ask_query(session, llm, options, query).await?;
        save_session(session, self.session.as_deref())?;

        if self.json {
            let output = serde_json::json!({ "answer": answer, "sources": [] });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }
}
