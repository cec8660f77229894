//! Retrieval engine: chunk, embed, index and search legal documents.
//!
//! The engine owns a knowledge store and a vector index that always hold the
//! same number of rows. Both live behind one `RwLock`; embeddings are computed
//! before the write lock is taken, so a failed embedding leaves the corpus
//! untouched.
//!
//! # Example
//! ```no_run
//! use lexibot_knowledge::{RetrievalConfig, RetrievalEngine};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = RetrievalEngine::from_config(&RetrievalConfig::default()).await?;
//! engine.add_document("The lessee shall pay rent on the 5th.", None).await?;
//! let context = engine.get_context_for_query("When is rent due?").await?;
//! println!("{}", context);
//! # Ok(())
//! # }
//! ```

use crate::chunker::Chunker;
use crate::config::RetrievalConfig;
use crate::embeddings::{create_provider, EmbeddingProvider};
use crate::error::{RetrievalError, RetrievalResult};
use crate::store::KnowledgeStore;
use crate::types::{default_metadata, EngineStats, Metadata, RetrievedChunk};
use crate::vector_index::{FlatL2Index, VectorIndex};
use lexibot_core::AppResult;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Separator placed between chunk texts in a query context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

#[derive(Debug)]
struct Corpus {
    store: KnowledgeStore,
    index: Box<dyn VectorIndex>,
    documents: usize,
}

/// In-memory retrieval engine shared behind `Arc`.
#[derive(Debug)]
pub struct RetrievalEngine {
    chunker: Chunker,
    embedder: Arc<dyn EmbeddingProvider>,
    default_top_k: usize,
    batch_size: usize,
    corpus: RwLock<Corpus>,
}

impl RetrievalEngine {
    /// Create an empty engine with a flat L2 index.
    pub fn new(chunker: Chunker, embedder: Arc<dyn EmbeddingProvider>, default_top_k: usize) -> Self {
        Self::with_index(chunker, embedder, default_top_k, Box::new(FlatL2Index::new()))
    }

    /// Create an empty engine over a caller-supplied index.
    pub fn with_index(
        chunker: Chunker,
        embedder: Arc<dyn EmbeddingProvider>,
        default_top_k: usize,
        index: Box<dyn VectorIndex>,
    ) -> Self {
        Self {
            chunker,
            embedder,
            default_top_k,
            batch_size: usize::MAX,
            corpus: RwLock::new(Corpus {
                store: KnowledgeStore::new(),
                index,
                documents: 0,
            }),
        }
    }

    /// Build an engine and its embedding provider from settings.
    pub async fn from_config(config: &RetrievalConfig) -> AppResult<Self> {
        config.validate()?;
        let embedder = create_provider(&config.embedding).await?;
        Ok(Self::from_parts(config, embedder)?)
    }

    /// Build an engine from settings around an existing provider.
    pub fn from_parts(
        config: &RetrievalConfig,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> RetrievalResult<Self> {
        config.validate()?;

        tracing::debug!(
            "Creating retrieval engine (chunk size: {}, overlap: {}, top-k: {}, embeddings: {}/{})",
            config.chunk_size,
            config.chunk_overlap,
            config.top_k,
            embedder.provider_name(),
            embedder.model_name()
        );

        let mut engine = Self::new(config.chunker()?, embedder, config.top_k);
        engine.batch_size = config.embedding.batch_size;
        Ok(engine)
    }

    /// Default number of chunks returned by `search_similar`.
    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    /// Chunk, embed and index a document.
    ///
    /// Every chunk of the document shares `metadata`, which defaults to
    /// `{"source": "user_upload", "type": "legal_document"}`. Returns the
    /// number of chunks added; empty text adds nothing and embeds nothing.
    pub async fn add_document(
        &self,
        text: &str,
        metadata: Option<Metadata>,
    ) -> RetrievalResult<usize> {
        let chunks = self.chunker.chunk(text);
        if chunks.is_empty() {
            tracing::debug!("Skipping empty document");
            return Ok(0);
        }

        let vectors = self.embed_chunks(&chunks).await?;
        let metadata = Arc::new(metadata.unwrap_or_else(default_metadata));
        let count = chunks.len();

        let mut corpus = self.corpus.write().await;
        corpus.index.add(vectors)?;
        corpus.store.append(chunks, metadata);
        corpus.documents += 1;

        tracing::info!(
            "Added document with {} chunks (corpus: {} chunks)",
            count,
            corpus.store.len()
        );

        Ok(count)
    }

    async fn embed_chunks(&self, chunks: &[String]) -> RetrievalResult<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(self.batch_size.max(1)) {
            let embedded = self
                .embedder
                .embed_batch(batch)
                .await
                .map_err(|e| RetrievalError::Embedding(e.to_string()))?;

            if embedded.len() != batch.len() {
                return Err(RetrievalError::Embedding(format!(
                    "provider returned {} embeddings for {} chunks",
                    embedded.len(),
                    batch.len()
                )));
            }
            vectors.extend(embedded);
        }
        Ok(vectors)
    }

    /// Find the chunks nearest to `query`, closest first.
    ///
    /// `k` defaults to the engine's top-k and is clamped to the corpus size.
    /// An empty corpus yields no results without calling the embedder.
    pub async fn search_similar(
        &self,
        query: &str,
        k: Option<usize>,
    ) -> RetrievalResult<Vec<RetrievedChunk>> {
        if self.is_empty().await {
            tracing::debug!("Search on empty corpus");
            return Ok(Vec::new());
        }

        let k = k.unwrap_or(self.default_top_k);
        let query_vector = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| RetrievalError::Embedding(e.to_string()))?;

        let corpus = self.corpus.read().await;
        let k = k.min(corpus.store.len());
        let neighbors = corpus.index.search(&query_vector, k)?;

        let results: Vec<RetrievedChunk> = neighbors
            .into_iter()
            .filter(|n| n.position < corpus.store.len())
            .map(|n| -> RetrievalResult<RetrievedChunk> {
                let (content, metadata) = corpus.store.get(n.position)?;
                Ok(RetrievedChunk {
                    content: content.to_string(),
                    metadata: metadata.as_ref().clone(),
                    distance: n.distance,
                    position: n.position,
                })
            })
            .collect::<RetrievalResult<_>>()?;

        tracing::debug!("Retrieved {} chunks for query", results.len());
        Ok(results)
    }

    /// Concatenate the default top-k chunk texts for `query`.
    pub async fn get_context_for_query(&self, query: &str) -> RetrievalResult<String> {
        let hits = self.search_similar(query, None).await?;
        Ok(join_context(&hits))
    }

    pub async fn len(&self) -> usize {
        self.corpus.read().await.store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.corpus.read().await.store.is_empty()
    }

    pub async fn stats(&self) -> EngineStats {
        let corpus = self.corpus.read().await;
        EngineStats {
            documents: corpus.documents,
            chunks: corpus.store.len(),
            dimension: corpus.index.dimension(),
        }
    }
}

/// Join retrieved chunk texts into a single prompt context.
pub fn join_context(hits: &[RetrievedChunk]) -> String {
    hits.iter()
        .map(|hit| hit.content.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::TrigramProvider;

    fn engine() -> RetrievalEngine {
        RetrievalEngine::new(
            Chunker::default(),
            Arc::new(TrigramProvider::new(384, true).unwrap()),
            3,
        )
    }

    #[tokio::test]
    async fn test_add_document_counts_chunks() {
        let engine = engine();
        let added = engine.add_document(&"rent ".repeat(500), None).await.unwrap();

        // 2500 characters at size 1000, step 800
        assert_eq!(added, 4);
        assert_eq!(engine.len().await, 4);
    }

    #[tokio::test]
    async fn test_default_metadata_applied() {
        let engine = engine();
        engine.add_document("Deed of conveyance", None).await.unwrap();

        let hits = engine.search_similar("conveyance", None).await.unwrap();
        assert_eq!(hits[0].metadata, default_metadata());
    }

    #[tokio::test]
    async fn test_custom_metadata_kept() {
        let engine = engine();
        let metadata = Metadata::from([("source".to_string(), "lease.txt".to_string())]);
        engine
            .add_document("Lease for flat 4B", Some(metadata.clone()))
            .await
            .unwrap();

        let hits = engine.search_similar("flat", Some(1)).await.unwrap();
        assert_eq!(hits[0].metadata, metadata);
    }

    #[tokio::test]
    async fn test_empty_document_adds_nothing() {
        let engine = engine();
        assert_eq!(engine.add_document("", None).await.unwrap(), 0);
        assert!(engine.is_empty().await);
        assert_eq!(engine.stats().await.documents, 0);
    }

    #[tokio::test]
    async fn test_stats() {
        let engine = engine();
        engine.add_document("First agreement", None).await.unwrap();
        engine.add_document("Second petition", None).await.unwrap();

        let stats = engine.stats().await;
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.chunks, 2);
        assert_eq!(stats.dimension, Some(384));
    }

    #[tokio::test]
    async fn test_from_parts_rejects_invalid_config() {
        let config = RetrievalConfig {
            chunk_overlap: 1000,
            ..Default::default()
        };
        let result = RetrievalEngine::from_parts(&config, Arc::new(TrigramProvider::new(8, true).unwrap()));
        assert!(matches!(
            result,
            Err(RetrievalError::InvalidConfiguration(_))
        ));
    }

    #[tokio::test]
    async fn test_from_config_uses_top_k() {
        let config = RetrievalConfig {
            top_k: 5,
            ..Default::default()
        };
        let engine = RetrievalEngine::from_config(&config).await.unwrap();
        assert_eq!(engine.default_top_k(), 5);
    }

    #[test]
    fn test_join_context() {
        let hit = |content: &str| RetrievedChunk {
            content: content.to_string(),
            metadata: Metadata::new(),
            distance: 0.0,
            position: 0,
        };

        assert_eq!(join_context(&[]), "");
        assert_eq!(join_context(&[hit("a"), hit("b")]), "a\n\nb");
    }
}
