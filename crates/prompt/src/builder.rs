//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptTemplate};
use lexibot_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build a prompt from a template and input variables.
///
/// Rendering is strict: a variable referenced by the template but missing
/// from `variables` is an error rather than an empty string.
///
/// # Example
/// ```no_run
/// use lexibot_prompt::{build_prompt, load_prompt};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let template = load_prompt(None, "legal.classify")?;
/// let mut vars = HashMap::new();
/// vars.insert("text".to_string(), "THIS NOTICE is served upon...".to_string());
///
/// let built = build_prompt(&template, vars)?;
/// println!("User prompt: {}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    template: &PromptTemplate,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", template.id);

    let user = render_template(&template.template, &variables)?;

    Ok(BuiltPrompt {
        system: template.system.clone(),
        user,
        source_prompt_id: template.id.clone(),
        resolved_variables: variables,
    })
}

/// Render a Handlebars template with variables.
pub fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Prompts are plain text
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
