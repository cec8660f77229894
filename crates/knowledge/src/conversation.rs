//! Free-form conversation with the assistant.
//!
//! Plain chat turns send the user's words unchanged, with no retrieved
//! context. They share the `ChatSession` used by RAG chat, so a follow-up
//! question can refer back to an earlier grounded answer.

use crate::assistant::{converse, AssistantOptions};
use lexibot_core::{AppError, AppResult};
use lexibot_llm::{ChatSession, LlmClient};

/// Ask the assistant `query` as the next turn of `session`.
pub async fn ask_query(
    session: &mut ChatSession,
    llm: &dyn LlmClient,
    options: &AssistantOptions,
    query: &str,
) -> AppResult<String> {
    if query.trim().is_empty() {
        return Err(AppError::Other("Query must not be empty".to_string()));
    }

    tracing::info!("Chat turn ({} earlier turns)", session.len());
    converse(llm, session, options.request(query), "ask_query").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::ScriptedLlm;
    use lexibot_llm::ChatRole;

    #[tokio::test]
    async fn test_ask_query_sends_plain_text() {
        let llm = ScriptedLlm::new(["A contract needs offer and acceptance."]);
        let mut session = ChatSession::new();

        let answer = ask_query(
            &mut session,
            &llm,
            &AssistantOptions::new("test-model"),
            "What makes a contract valid?",
        )
        .await
        .unwrap();

        assert_eq!(answer, "A contract needs offer and acceptance.");
        let request = &llm.requests()[0];
        assert_eq!(request.prompt, "What makes a contract valid?");
        assert!(request.system.is_none());
        assert!(request.history.is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_sees_previous_turns() {
        let llm = ScriptedLlm::new(["Section 138 covers cheque bounce.", "Up to two years."]);
        let options = AssistantOptions::new("test-model");
        let mut session = ChatSession::new();

        ask_query(&mut session, &llm, &options, "Which section covers cheque bounce?")
            .await
            .unwrap();
        ask_query(&mut session, &llm, &options, "What is the punishment?")
            .await
            .unwrap();

        let history = &llm.requests()[1].history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, ChatRole::User);
        assert_eq!(history[0].text, "Which section covers cheque bounce?");
        assert_eq!(history[1].role, ChatRole::Model);
        assert_eq!(history[1].text, "Section 138 covers cheque bounce.");

        assert_eq!(session.len(), 4);
        assert_eq!(session.turns()[3].text, "Up to two years.");
    }

    #[tokio::test]
    async fn test_plain_and_rag_turns_share_session() {
        use crate::chunker::Chunker;
        use crate::embeddings::providers::TrigramProvider;
        use crate::engine::RetrievalEngine;
        use crate::rag::rag_chat;
        use std::sync::Arc;

        let engine = RetrievalEngine::new(
            Chunker::default(),
            Arc::new(TrigramProvider::new(64, true).unwrap()),
            3,
        );
        engine
            .add_document("The arbitration seat is Mumbai.", None)
            .await
            .unwrap();

        let llm = ScriptedLlm::new(["Mumbai.", "Because the clause names it."]);
        let options = AssistantOptions::new("test-model");
        let mut session = ChatSession::new();

        rag_chat(&engine, &llm, &options, &mut session, "Where is the seat?")
            .await
            .unwrap();
        ask_query(&mut session, &llm, &options, "Why there?")
            .await
            .unwrap();

        let history = &llm.requests()[1].history;
        assert_eq!(history.len(), 2);
        assert!(history[0].text.contains("The arbitration seat is Mumbai."));
        assert_eq!(history[1].text, "Mumbai.");
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let llm = ScriptedLlm::new(["unused"]);
        let mut session = ChatSession::new();

        let result = ask_query(&mut session, &llm, &AssistantOptions::new("m"), "  ").await;

        assert!(result.is_err());
        assert!(llm.requests().is_empty());
        assert!(session.is_empty());
    }
}
