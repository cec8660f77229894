//! Built-in legal assistant prompt templates.

use crate::types::PromptTemplate;

pub const RAG_CHAT_ID: &str = "legal.rag.chat";
pub const DOCUMENT_QUESTION_ID: &str = "legal.document.question";
pub const SUMMARY_PART_ID: &str = "legal.summary.part";
pub const SUMMARY_COMBINE_ID: &str = "legal.summary.combine";
pub const CLASSIFY_ID: &str = "legal.classify";

const ASSISTANT_PERSONA: &str = "You are LegalSetu, an AI legal assistant.";

const RAG_CHAT: &str = "Based on the following legal context from uploaded documents, \
please answer the user's question accurately and helpfully.

RELEVANT LEGAL CONTEXT:
{{context}}

USER QUESTION: {{query}}

Please provide a comprehensive legal answer based on the context above.
If the context doesn't contain relevant information, use your general legal knowledge but indicate this clearly.
Always cite relevant sources when possible.";

const DOCUMENT_QUESTION: &str = "Use the document context below to answer the user's question accurately and concisely.
If information is not found in context, say \"Not found in document.\"

Context:
{{context}}

Question: {{query}}";

const SUMMARY_PART: &str =
    "Summarize the following legal document part {{part}}/{{total}}:\n\n{{text}}";

const SUMMARY_COMBINE: &str = "Combine these partial summaries into a final structured legal summary \
with sections like: 'Overview', 'Key Clauses', 'Risks', and 'Recommendations'.

{{summaries}}";

const CLASSIFY: &str = "Classify the following document into one of:
- Agreement
- Petition
- Notice
- Judgment
- Other

Respond only with pure JSON like: {\"category\": \"...\", \"confidence\": 0.XX}

Document Text:
{{text}}";

/// Look up a built-in template by ID.
pub fn builtin(id: &str) -> Option<PromptTemplate> {
    let (system, template) = match id {
        RAG_CHAT_ID => (Some(ASSISTANT_PERSONA), RAG_CHAT),
        DOCUMENT_QUESTION_ID => (Some(ASSISTANT_PERSONA), DOCUMENT_QUESTION),
        SUMMARY_PART_ID => (None, SUMMARY_PART),
        SUMMARY_COMBINE_ID => (None, SUMMARY_COMBINE),
        CLASSIFY_ID => (None, CLASSIFY),
        _ => return None,
    };

    Some(PromptTemplate::new(id, system, template))
}

/// IDs of every built-in template.
pub fn builtin_ids() -> [&'static str; 5] {
    [
        RAG_CHAT_ID,
        DOCUMENT_QUESTION_ID,
        SUMMARY_PART_ID,
        SUMMARY_COMBINE_ID,
        CLASSIFY_ID,
    ]
}
