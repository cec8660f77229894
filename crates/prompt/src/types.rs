//! Prompt types for LexiBot.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A prompt template, either built in or loaded from the workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptTemplate {
    /// Unique prompt identifier (e.g., "legal.rag.chat")
    pub id: String,

    /// Optional system instruction sent alongside the user message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Template string with Handlebars syntax
    pub template: String,
}

impl PromptTemplate {
    pub fn new(id: impl Into<String>, system: Option<&str>, template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            system: system.map(str::to_string),
            template: template.into(),
        }
    }
}

/// A fully rendered prompt ready for LLM execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message (optional)
    pub system: Option<String>,

    /// User message (required)
    pub user: String,

    /// Source template ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Template variables that were resolved
    #[serde(rename = "resolvedVariables")]
    pub resolved_variables: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_deserialization() {
        let yaml = r#"
id: legal.rag.chat
system: "You are LegalSetu"
template: "{{query}}"
"#;

        let template: PromptTemplate = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(template.id, "legal.rag.chat");
        assert_eq!(template.system.as_deref(), Some("You are LegalSetu"));
        assert_eq!(template.template, "{{query}}");
    }

    #[test]
    fn test_system_is_optional() {
        let template: PromptTemplate =
            serde_yaml::from_str("id: x\ntemplate: \"{{text}}\"\n").unwrap();
        assert!(template.system.is_none());
    }
}
