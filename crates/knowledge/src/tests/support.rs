//! Test doubles shared by the crate's tests.

use crate::embeddings::EmbeddingProvider;
use lexibot_core::{AppError, AppResult};
use lexibot_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// LLM that replays canned replies in order and records every request.
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedLlm {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlm {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let content = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::Llm("no scripted reply left".to_string()))?;

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            usage: LlmUsage::new(10, 5),
        })
    }
}

/// Embedder that fails every call and counts how often it was asked.
#[derive(Debug, Default)]
pub struct FailingEmbedder {
    pub calls: AtomicUsize,
}

#[async_trait::async_trait]
impl EmbeddingProvider for FailingEmbedder {
    fn provider_name(&self) -> &str {
        "failing"
    }

    fn model_name(&self) -> &str {
        "failing-v1"
    }

    fn dimensions(&self) -> usize {
        8
    }

    async fn embed_batch(&self, _texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Llm("embedding service unavailable".to_string()))
    }
}

/// Embedder returning a fixed number of vectors regardless of input.
#[derive(Debug)]
pub struct ShortBatchEmbedder;

#[async_trait::async_trait]
impl EmbeddingProvider for ShortBatchEmbedder {
    fn provider_name(&self) -> &str {
        "short"
    }

    fn model_name(&self) -> &str {
        "short-v1"
    }

    fn dimensions(&self) -> usize {
        4
    }

    async fn embed_batch(&self, _texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(vec![vec![0.0; 4]])
    }
}

/// Embedder whose vector length is the length of the first word, to force
/// dimension changes between documents.
#[derive(Debug)]
pub struct WordLengthEmbedder;

#[async_trait::async_trait]
impl EmbeddingProvider for WordLengthEmbedder {
    fn provider_name(&self) -> &str {
        "word-length"
    }

    fn model_name(&self) -> &str {
        "word-length-v1"
    }

    fn dimensions(&self) -> usize {
        0
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|t| {
                let len = t.split_whitespace().next().map_or(1, |w| w.len());
                vec![1.0; len]
            })
            .collect())
    }
}

/// Embedder that reads a `docNN` marker from each text and returns
/// `[NN + 1, 0]`, or the origin when there is no marker. It yields to the
/// scheduler before answering so concurrent adds interleave.
#[derive(Debug, Default)]
pub struct MarkerEmbedder {
    pub calls: AtomicUsize,
}

impl MarkerEmbedder {
    pub fn marker(doc: usize) -> String {
        format!("doc{:02}|", doc)
    }

    /// Document number encoded in a vector returned by this embedder.
    pub fn decode(distance_from_origin: f32) -> usize {
        (distance_from_origin.sqrt() - 1.0).round() as usize
    }

    fn encode(text: &str) -> Vec<f32> {
        let doc = text
            .match_indices("doc")
            .find_map(|(at, _)| text.get(at + 3..at + 5)?.parse::<u32>().ok());
        match doc {
            Some(doc) => vec![doc as f32 + 1.0, 0.0],
            None => vec![0.0, 0.0],
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for MarkerEmbedder {
    fn provider_name(&self) -> &str {
        "marker"
    }

    fn model_name(&self) -> &str {
        "marker-v1"
    }

    fn dimensions(&self) -> usize {
        2
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        let vectors = texts.iter().map(|t| Self::encode(t)).collect();
        tokio::task::yield_now().await;
        Ok(vectors)
    }
}
