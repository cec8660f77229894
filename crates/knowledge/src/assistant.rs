//! Shared plumbing for the LLM-backed assistant flows.

use lexibot_core::AppResult;
use lexibot_llm::{ChatSession, LlmClient, LlmRequest};
use lexibot_prompt::{build_prompt, load_prompt};
use std::collections::HashMap;
use std::path::PathBuf;

/// Settings applied to every LLM call of an assistant flow.
#[derive(Debug, Clone, Default)]
pub struct AssistantOptions {
    /// Model identifier passed to the provider
    pub model: String,

    /// Workspace whose `.lexibot/prompts/` may override built-in templates
    pub workspace: Option<PathBuf>,

    pub temperature: Option<f32>,

    pub max_tokens: Option<u32>,
}

impl AssistantOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_workspace(mut self, workspace: impl Into<PathBuf>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    /// Request for `prompt` carrying the model and sampling settings.
    pub(crate) fn request(&self, prompt: impl Into<String>) -> LlmRequest {
        let mut request = LlmRequest::new(prompt, self.model.as_str());
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        request
    }
}

/// Render prompt `prompt_id` with `variables` and return the model's reply.
pub(crate) async fn generate(
    llm: &dyn LlmClient,
    options: &AssistantOptions,
    prompt_id: &str,
    variables: &[(&str, &str)],
) -> AppResult<String> {
    let request = render_request(options, prompt_id, variables)?;
    send(llm, &request, prompt_id).await
}

/// Send `request` as the next turn of `session`.
///
/// The session's turns go out as history. The exchange is recorded only
/// when the model answers, so a failed call leaves the session unchanged.
pub(crate) async fn converse(
    llm: &dyn LlmClient,
    session: &mut ChatSession,
    request: LlmRequest,
    label: &str,
) -> AppResult<String> {
    let request = request.with_history(session.turns());
    let answer = send(llm, &request, label).await?;

    session.record_exchange(request.prompt, answer.as_str());
    tracing::debug!("Session now holds {} turns", session.len());

    Ok(answer)
}

/// Build the request for prompt `prompt_id` without sending it.
pub(crate) fn render_request(
    options: &AssistantOptions,
    prompt_id: &str,
    variables: &[(&str, &str)],
) -> AppResult<LlmRequest> {
    let template = load_prompt(options.workspace.as_deref(), prompt_id)?;
    let variables: HashMap<String, String> = variables
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let built = build_prompt(&template, variables)?;

    let mut request = options.request(built.user);
    if let Some(system) = built.system {
        request = request.with_system(system);
    }
    Ok(request)
}

async fn send(llm: &dyn LlmClient, request: &LlmRequest, label: &str) -> AppResult<String> {
    tracing::debug!(
        "Calling {} with prompt '{}' ({} chars, {} history turns)",
        llm.provider_name(),
        label,
        request.prompt.len(),
        request.history.len()
    );

    let response = llm.complete(request).await?;
    Ok(response.content)
}
