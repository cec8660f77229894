//! RAG answering orchestration.
//!
//! Retrieves relevant chunks and generates natural language answers via LLM.

use crate::assistant::{converse, generate, render_request, AssistantOptions};
use crate::chunker::Chunker;
use crate::embeddings::EmbeddingProvider;
use crate::engine::{join_context, RetrievalEngine};
use crate::rag::types::RagResponse;
use crate::types::{Metadata, RetrievedChunk, SourceRef};
use lexibot_core::{AppError, AppResult};
use lexibot_llm::{ChatSession, LlmClient};
use lexibot_prompt::templates;
use std::sync::Arc;

/// Chunk size used when answering questions about a single document.
const DOCUMENT_CHUNK_SIZE: usize = 1000;

/// Chunks retrieved from a single document.
const DOCUMENT_TOP_K: usize = 3;

/// Answer a question from the shared knowledge base as the next turn of
/// `session`.
///
/// This function:
/// 1. Retrieves the engine's default top-k chunks for the query
/// 2. Renders the RAG chat prompt with the joined chunk texts
/// 3. Sends it with the session history and records the exchange
/// 4. Maps the same chunks to source references
///
/// An empty knowledge base still produces an answer; `has_context` is false.
pub async fn rag_chat(
    engine: &RetrievalEngine,
    llm: &dyn LlmClient,
    options: &AssistantOptions,
    session: &mut ChatSession,
    query: &str,
) -> AppResult<RagResponse> {
    tracing::info!(
        "RAG chat over {} chunks ({} earlier turns)",
        engine.len().await,
        session.len()
    );

    let hits = engine.search_similar(query, None).await?;
    let context = join_context(&hits);
    log_context(&hits, &context);

    let request = render_request(
        options,
        templates::RAG_CHAT_ID,
        &[("context", context.as_str()), ("query", query)],
    )?;
    let answer = converse(llm, session, request, templates::RAG_CHAT_ID).await?;

    Ok(response(answer, &hits, &context))
}

/// Answer a question about one document without touching any shared corpus.
///
/// The document is indexed into a fresh engine (1000-character chunks, no
/// overlap) that is dropped when the answer is ready.
pub async fn ask_document(
    embedder: Arc<dyn EmbeddingProvider>,
    llm: &dyn LlmClient,
    options: &AssistantOptions,
    text: &str,
    query: &str,
) -> AppResult<RagResponse> {
    if text.trim().is_empty() {
        return Err(AppError::Knowledge(
            "Document contains no text to search".to_string(),
        ));
    }

    let engine = RetrievalEngine::new(
        Chunker::new(DOCUMENT_CHUNK_SIZE, 0)?,
        embedder,
        DOCUMENT_TOP_K,
    );
    let metadata = Metadata::from([
        ("source".to_string(), "uploaded_document".to_string()),
        ("type".to_string(), "legal_document".to_string()),
    ]);
    let chunks = engine.add_document(text, Some(metadata)).await?;

    tracing::info!("Answering document question over {} chunks", chunks);

    let hits = engine.search_similar(query, None).await?;
    let context = join_context(&hits);
    log_context(&hits, &context);

    let answer = generate(
        llm,
        options,
        templates::DOCUMENT_QUESTION_ID,
        &[("context", context.as_str()), ("query", query)],
    )
    .await?;

    Ok(response(answer, &hits, &context))
}

fn log_context(hits: &[RetrievedChunk], context: &str) {
    tracing::debug!(
        "Retrieved {} chunks ({} chars of context)",
        hits.len(),
        context.len()
    );
}

fn response(answer: String, hits: &[RetrievedChunk], context: &str) -> RagResponse {
    RagResponse {
        answer,
        sources: hits.iter().map(SourceRef::from_chunk).collect(),
        has_context: !context.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::TrigramProvider;
    use crate::tests::support::{FailingEmbedder, ScriptedLlm};

    fn trigram() -> Arc<dyn EmbeddingProvider> {
        Arc::new(TrigramProvider::new(384, true).unwrap())
    }

    fn options() -> AssistantOptions {
        AssistantOptions::new("test-model")
    }

    #[tokio::test]
    async fn test_rag_chat_with_context() {
        let engine = RetrievalEngine::new(Chunker::default(), trigram(), 3);
        let metadata = Metadata::from([("source".to_string(), "lease.txt".to_string())]);
        engine
            .add_document(
                "The security deposit of two months rent is refundable.",
                Some(metadata),
            )
            .await
            .unwrap();

        let llm = ScriptedLlm::new(["The deposit is refundable."]);
        let mut session = ChatSession::new();
        let response = rag_chat(
            &engine,
            &llm,
            &options(),
            &mut session,
            "Is the deposit refundable?",
        )
        .await
        .unwrap();

        assert_eq!(response.answer, "The deposit is refundable.");
        assert!(response.has_context);
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].source, "lease.txt");

        let prompt = &llm.requests()[0].prompt;
        assert!(prompt.contains("The security deposit of two months rent is refundable."));
        assert!(prompt.contains("USER QUESTION: Is the deposit refundable?"));
    }

    #[tokio::test]
    async fn test_rag_chat_empty_corpus() {
        let engine = RetrievalEngine::new(Chunker::default(), trigram(), 3);
        let llm = ScriptedLlm::new(["General answer."]);

        let mut session = ChatSession::new();
        let response = rag_chat(&engine, &llm, &options(), &mut session, "What is bail?")
            .await
            .unwrap();

        assert!(!response.has_context);
        assert!(response.sources.is_empty());
        assert!(llm.requests()[0].prompt.contains("RELEVANT LEGAL CONTEXT:\n\n"));
    }

    #[tokio::test]
    async fn test_rag_chat_carries_session_history() {
        let engine = RetrievalEngine::new(Chunker::default(), trigram(), 3);
        engine
            .add_document("Notice period for termination is thirty days.", None)
            .await
            .unwrap();

        let llm = ScriptedLlm::new(["Thirty days.", "Yes, in writing."]);
        let mut session = ChatSession::new();

        rag_chat(&engine, &llm, &options(), &mut session, "What is the notice period?")
            .await
            .unwrap();
        rag_chat(&engine, &llm, &options(), &mut session, "Must it be written?")
            .await
            .unwrap();

        let requests = llm.requests();
        assert!(requests[0].history.is_empty());
        assert_eq!(requests[1].history.len(), 2);
        assert!(requests[1].history[0]
            .text
            .contains("USER QUESTION: What is the notice period?"));
        assert_eq!(requests[1].history[1].text, "Thirty days.");
        assert_eq!(session.len(), 4);
    }

    #[tokio::test]
    async fn test_ask_document_does_not_use_history() {
        let llm = ScriptedLlm::new(["Clause 2."]);
        ask_document(trigram(), &llm, &options(), "Rent is due monthly.", "When?")
            .await
            .unwrap();

        assert!(llm.requests()[0].history.is_empty());
    }

    #[tokio::test]
    async fn test_ask_document_uses_document_prompt() {
        let llm = ScriptedLlm::new(["Not found in document."]);
        let text = "x".repeat(2500);

        let response = ask_document(trigram(), &llm, &options(), &text, "Who signed?")
            .await
            .unwrap();

        assert_eq!(response.answer, "Not found in document.");
        assert_eq!(response.sources.len(), 3);
        assert!(response.sources.iter().all(|s| s.source == "uploaded_document"));

        let request = &llm.requests()[0];
        assert!(request.prompt.contains("Question: Who signed?"));
        assert!(request.prompt.starts_with("Use the document context below"));
    }

    #[tokio::test]
    async fn test_ask_document_rejects_empty_text() {
        let llm = ScriptedLlm::new(["unused"]);
        let result = ask_document(trigram(), &llm, &options(), "   ", "Anything?").await;

        assert!(result.is_err());
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn test_ask_document_embedding_failure_propagates() {
        let llm = ScriptedLlm::new(["unused"]);
        let result = ask_document(
            Arc::new(FailingEmbedder::default()),
            &llm,
            &options(),
            "Some clause",
            "Anything?",
        )
        .await;

        assert!(matches!(result, Err(AppError::Knowledge(_))));
        assert!(llm.requests().is_empty());
    }
}
