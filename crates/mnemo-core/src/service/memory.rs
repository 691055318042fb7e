//! Memory service.
//!
//! Orchestrates the memory lifecycle: facts are extracted from a
//! conversation, embedded in one batch, and appended under an owner; queries
//! are embedded and ranked against that owner's records by cosine similarity.
//!
//! The embedder and LLM behind the extractor must be ready before any call;
//! their failures propagate unchanged. Calls against the same owner that
//! mutate the store should be serialized by the caller.

use mnemo_types::config::MemoryConfig;
use mnemo_types::error::{EmbeddingError, ExtractionError, MemoryError};
use mnemo_types::memory::{Conversation, MemoryId, MemoryRecord, SearchHit};

use crate::memory::embedder::Embedder;
use crate::memory::extractor::FactExtractor;
use crate::memory::similarity;
use crate::memory::store::MemoryStore;

/// What `add` did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Ids of the created records, in extraction order.
    pub ids: Vec<MemoryId>,
    /// Set when the LLM reply could not be parsed (and nothing was stored).
    pub extraction_error: Option<ExtractionError>,
}

/// What `update` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

/// Facade over extractor, embedder, and store.
///
/// Generic over the capability traits -- mnemo-core never depends on
/// mnemo-infra.
pub struct MemoryService<S: MemoryStore, E: Embedder, X: FactExtractor> {
    store: S,
    embedder: E,
    extractor: X,
    config: MemoryConfig,
}

impl<S: MemoryStore, E: Embedder, X: FactExtractor> MemoryService<S, E, X> {
    pub fn new(store: S, embedder: E, extractor: X, config: MemoryConfig) -> Self {
        Self {
            store,
            embedder,
            extractor,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Extract facts from a conversation and store them for `owner_id`.
    ///
    /// No facts (including an unparseable LLM reply) leaves the store
    /// untouched. All facts are embedded before any is stored and then
    /// appended as one batch, so a failure at any step stores nothing.
    #[tracing::instrument(name = "memory_add", skip(self, conversation, owner_id), fields(owner_id = %owner_id))]
    pub async fn add(
        &self,
        conversation: &Conversation,
        owner_id: &str,
    ) -> Result<AddOutcome, MemoryError> {
        if owner_id.trim().is_empty() {
            return Err(MemoryError::InvalidOwner);
        }

        let extraction = self.extractor.extract(conversation).await?;
        if extraction.is_empty() {
            tracing::debug!("No facts extracted; store unchanged");
            return Ok(AddOutcome {
                ids: Vec::new(),
                extraction_error: extraction.failure,
            });
        }

        let embeddings = self.embed_checked(&extraction.facts).await?;

        let entries = extraction.facts.into_iter().zip(embeddings).collect();
        let ids = self.store.append_all(owner_id, entries).await?;

        tracing::info!(fact_count = ids.len(), "Stored memories");
        Ok(AddOutcome {
            ids,
            extraction_error: None,
        })
    }

    /// Search an owner's memories, using the configured default limit.
    pub async fn search(&self, query: &str, owner_id: &str) -> Result<Vec<SearchHit>, MemoryError> {
        self.search_with_limit(query, owner_id, self.config.search_limit)
            .await
    }

    /// Search an owner's memories by similarity to `query`.
    ///
    /// Ranks best-first, keeps the top `limit`, then drops anything scoring
    /// at or below the similarity threshold. An owner with no records returns
    /// immediately without embedding the query.
    #[tracing::instrument(name = "memory_search", skip(self, query, owner_id), fields(owner_id = %owner_id))]
    pub async fn search_with_limit(
        &self,
        query: &str,
        owner_id: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>, MemoryError> {
        let records = self.store.get(owner_id).await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embed_one(query).await?;
        let ranked = similarity::rank(&query_embedding, records);
        let hits: Vec<SearchHit> =
            similarity::select(ranked, limit, self.config.similarity_threshold)
                .into_iter()
                .map(|scored| scored.record.to_hit())
                .collect();

        tracing::debug!(hit_count = hits.len(), "Search complete");
        Ok(hits)
    }

    /// Replace the text of a memory, re-embedding it.
    ///
    /// An unknown id is logged and reported as [`UpdateOutcome::NotFound`];
    /// the store is left unchanged.
    #[tracing::instrument(name = "memory_update", skip(self, id, new_text), fields(memory_id = %id))]
    pub async fn update(&self, id: &MemoryId, new_text: &str) -> Result<UpdateOutcome, MemoryError> {
        if self.store.find_by_id(id).await?.is_none() {
            tracing::warn!("Memory {id} not found");
            return Ok(UpdateOutcome::NotFound);
        }

        let embedding = self.embed_one(new_text).await?;

        if self.store.replace_in_place(id, new_text, embedding).await? {
            Ok(UpdateOutcome::Updated)
        } else {
            tracing::warn!("Memory {id} not found");
            Ok(UpdateOutcome::NotFound)
        }
    }

    /// Remove all memories for an owner. Returns how many were removed.
    #[tracing::instrument(name = "memory_delete_all", skip(self, owner_id), fields(owner_id = %owner_id))]
    pub async fn delete_all(&self, owner_id: &str) -> Result<usize, MemoryError> {
        let removed = self.store.delete_all(owner_id).await?;
        if removed > 0 {
            tracing::info!(removed, "Deleted memories");
        }
        Ok(removed)
    }

    /// All memories for an owner, in insertion order.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<MemoryRecord>, MemoryError> {
        Ok(self.store.get(owner_id).await?)
    }

    /// A single memory by id.
    pub async fn get(&self, id: &MemoryId) -> Result<Option<MemoryRecord>, MemoryError> {
        Ok(self.store.find_by_id(id).await?)
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, MemoryError> {
        let mut vectors = self.embed_checked(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::CountMismatch { expected: 1, actual: 0 }.into())
    }

    /// Embed a batch and verify count and dimension before anything is stored.
    async fn embed_checked(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, MemoryError> {
        let vectors = self.embedder.embed(texts).await?;

        if vectors.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                actual: vectors.len(),
            }
            .into());
        }

        let expected = self.embedder.dimension();
        if let Some(bad) = vectors.iter().find(|v| v.len() != expected) {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: bad.len(),
            }
            .into());
        }

        Ok(vectors)
    }
}
