//! Prompt system for LexiBot.
//!
//! - Built-in legal prompt templates (RAG chat, document Q&A, summaries, classification)
//! - Per-workspace YAML overrides
//! - Handlebars rendering

pub mod builder;
pub mod loader;
pub mod templates;
pub mod types;

pub use builder::{build_prompt, render_template};
pub use loader::{list_prompts, load_prompt};
pub use types::{BuiltPrompt, PromptTemplate};
