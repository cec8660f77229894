//! Prompts command handler.

use clap::Args;
use lexibot_core::{config::AppConfig, AppResult};
use lexibot_prompt::list_prompts;

/// List available prompt templates (built-in and workspace overrides)
#[derive(Args, Debug)]
pub struct PromptsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl PromptsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let prompts = list_prompts(&config.workspace)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&prompts)?);
        } else {
            for id in prompts {
                println!("{}", id);
            }
        }

        Ok(())
    }
}
