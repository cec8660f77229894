//! LexiBot CLI
//!
//! Main entry point for the lexibot command-line tool.
//! Provides document search, grounded and free-form legal chat with
//! conversation memory, summaries and classification over local text files.

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    AskCommand, AskDocCommand, ChatCommand, ClassifyCommand, PromptsCommand, SearchCommand,
    SummarizeCommand,
};
use lexibot_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// LexiBot - legal document assistant with retrieval-augmented answers
#[derive(Parser, Debug)]
#[command(name = "lexibot")]
#[command(about = "Legal document assistant with retrieval-augmented answers", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "LEXIBOT_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file (default: <workspace>/.lexibot/config.yaml)
    #[arg(short, long, global = true, env = "LEXIBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (gemini, ollama)
    #[arg(short, long, global = true, env = "LEXIBOT_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "LEXIBOT_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find the passages closest to a query
    Search(SearchCommand),

    /// Ask a question grounded in your documents
    Chat(ChatCommand),

    /// Chat with the assistant without searching documents
    Ask(AskCommand),

    /// Ask a question about a single document
    AskDoc(AskDocCommand),

    /// Summarize a legal document
    Summarize(SummarizeCommand),

    /// Classify a legal document
    Classify(ClassifyCommand),

    /// List available prompt templates
    Prompts(PromptsCommand),
}

/// Load configuration: defaults, config file, environment, then CLI flags.
fn resolve_config(cli: &Cli) -> AppResult<AppConfig> {
    let mut config = AppConfig::load()?;

    // A workspace or config file named on the command line brings its own YAML
    let requested = cli.config.clone().or_else(|| {
        cli.workspace
            .as_ref()
            .map(|ws| ws.join(".lexibot").join("config.yaml"))
    });
    if let Some(path) = requested {
        if path != config.config_path() && path.exists() {
            config = config.merge_yaml(&path)?;
        }
    }

    Ok(config.with_overrides(
        cli.workspace.clone(),
        cli.config.clone(),
        cli.provider.clone(),
        cli.model.clone(),
        cli.log_level.clone(),
        cli.verbose,
        cli.no_color,
    ))
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("LexiBot CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Search(_) => "search",
        Commands::Chat(_) => "chat",
        Commands::Ask(_) => "ask",
        Commands::AskDoc(_) => "ask-doc",
        Commands::Summarize(_) => "summarize",
        Commands::Classify(_) => "classify",
        Commands::Prompts(_) => "prompts",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Search(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::AskDoc(cmd) => cmd.execute(&config).await,
        Commands::Summarize(cmd) => cmd.execute(&config).await,
        Commands::Classify(cmd) => cmd.execute(&config).await,
        Commands::Prompts(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
