//! Application state wiring the memory service together.
//!
//! `MemoryService` is generic over store/embedder/extractor traits; the
//! CLI pins it to the in-memory store, a boxed embedder chosen by config,
//! and the Anthropic-backed extractor.

use std::path::PathBuf;

use anyhow::Context;

use mnemo_core::memory::box_embedder::BoxEmbedder;
use mnemo_core::memory::extractor::LlmFactExtractor;
use mnemo_core::memory::in_memory::InMemoryMemoryStore;
use mnemo_core::service::memory::MemoryService;
use mnemo_infra::config::load_memory_config;
use mnemo_infra::filesystem::resolve_data_dir;
use mnemo_infra::llm::create_provider;
use mnemo_infra::secret::{ANTHROPIC_API_KEY, api_key_from_env};
use mnemo_infra::vector::build_embedder;
use mnemo_types::config::{EmbeddingBackend, MemoryConfig};

/// Concrete service type used by the CLI.
pub type ConcreteMemoryService = MemoryService<InMemoryMemoryStore, BoxEmbedder, LlmFactExtractor>;

/// Resolved data directory and configuration.
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: MemoryConfig,
}

impl AppState {
    /// Resolve the data directory and load `config.toml`.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let config = load_memory_config(&data_dir).await;
        tracing::debug!(data_dir = %data_dir.display(), "Loaded configuration");

        Ok(Self { data_dir, config })
    }

    /// Build the LLM-backed fact extractor.
    pub fn extractor(&self) -> anyhow::Result<LlmFactExtractor> {
        let provider = create_provider(&self.config.extractor, api_key_from_env())
            .with_context(|| format!("cannot reach the extraction model; is {ANTHROPIC_API_KEY} set?"))?;
        Ok(LlmFactExtractor::new(provider, self.config.extractor.clone()))
    }

    /// Wire a fresh memory service with an empty in-memory store.
    ///
    /// `backend` overrides the configured embedding backend.
    pub async fn memory_service(
        &self,
        backend: Option<EmbeddingBackend>,
    ) -> anyhow::Result<ConcreteMemoryService> {
        let extractor = self.extractor()?;

        let mut embedding = self.config.embedding.clone();
        if let Some(backend) = backend {
            embedding.backend = backend;
        }
        let embedder = build_embedder(&embedding, &self.data_dir)
            .await
            .with_context(|| format!("failed to initialize the {} embedder", embedding.backend))?;

        Ok(MemoryService::new(
            InMemoryMemoryStore::new(),
            embedder,
            extractor,
            self.config.clone(),
        ))
    }
}
