//! Prompt loader with per-workspace overrides.
//!
//! A workspace may override any built-in template by placing `<id>.yml` in
//! `.lexibot/prompts/`.

use crate::templates;
use crate::types::PromptTemplate;
use lexibot_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

fn prompts_dir(workspace_path: &Path) -> PathBuf {
    workspace_path.join(".lexibot").join("prompts")
}

/// Load a prompt template by ID.
///
/// The workspace override wins over the built-in template.
///
/// # Example
/// ```no_run
/// use lexibot_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Some(Path::new(".")), "legal.rag.chat")?;
/// println!("Loaded prompt: {}", prompt.id);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: Option<&Path>, prompt_id: &str) -> AppResult<PromptTemplate> {
    if let Some(workspace) = workspace_path {
        let prompt_file = prompts_dir(workspace).join(format!("{}.yml", prompt_id));

        if prompt_file.exists() {
            tracing::debug!("Loading prompt override from: {:?}", prompt_file);

            let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
                AppError::Prompt(format!(
                    "Failed to read prompt file {:?}: {}",
                    prompt_file, e
                ))
            })?;

            let template: PromptTemplate = serde_yaml::from_str(&contents).map_err(|e| {
                AppError::Prompt(format!(
                    "Failed to parse prompt YAML {:?}: {}",
                    prompt_file, e
                ))
            })?;

            validate_prompt(&template, prompt_id)?;
            return Ok(template);
        }
    }

    templates::builtin(prompt_id)
        .ok_or_else(|| AppError::Prompt(format!("Unknown prompt: {}", prompt_id)))
}

/// List every prompt ID available: built-ins plus workspace overrides.
pub fn list_prompts(workspace_path: &Path) -> AppResult<Vec<String>> {
    let mut prompt_ids: Vec<String> = templates::builtin_ids()
        .iter()
        .map(|id| id.to_string())
        .collect();

    let dir = prompts_dir(workspace_path);
    if dir.exists() {
        for entry in walkdir::WalkDir::new(&dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if !prompt_ids.iter().any(|id| id == stem) {
                        prompt_ids.push(stem.to_string());
                    }
                }
            }
        }
    }

    prompt_ids.sort();
    Ok(prompt_ids)
}

fn validate_prompt(template: &PromptTemplate, expected_id: &str) -> AppResult<()> {
    if template.id != expected_id {
        return Err(AppError::Prompt(format!(
            "Prompt file declares id '{}' but was loaded as '{}'",
            template.id, expected_id
        )));
    }

    if template.template.trim().is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    Ok(())
}
