//! Embedding backends.
//!
//! fastembed-based local inference with all-MiniLM-L6-v2, and a
//! deterministic hashing embedder that needs no model download.

pub mod minilm;
pub mod hashing;

use std::path::Path;

use mnemo_core::memory::box_embedder::BoxEmbedder;
use mnemo_types::config::{EmbeddingBackend, EmbeddingConfig};
use mnemo_types::error::EmbeddingError;

use self::minilm::FastEmbedEmbedder;
use self::hashing::HashEmbedder;
use crate::filesystem::model_cache_dir;

/// Build the configured embedder.
///
/// The fastembed model is downloaded into `{data_dir}/models/` on first use.
pub async fn build_embedder(
    config: &EmbeddingConfig,
    data_dir: &Path,
) -> Result<BoxEmbedder, EmbeddingError> {
    match config.backend {
        EmbeddingBackend::Fastembed => {
            let embedder = FastEmbedEmbedder::load(model_cache_dir(data_dir)).await?;
            Ok(BoxEmbedder::new(embedder))
        }
        EmbeddingBackend::Hash => Ok(BoxEmbedder::new(HashEmbedder::new(config.dimension)?)),
    }
}
