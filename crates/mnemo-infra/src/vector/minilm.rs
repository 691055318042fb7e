//! FastEmbed-based local embedding generator.
//!
//! Implements the `Embedder` trait from `mnemo-core` using fastembed's
//! all-MiniLM-L6-v2 model (384 dimensions) with ONNX runtime inference.
//! Inference is CPU-bound and runs on the blocking thread pool.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use mnemo_core::memory::embedder::Embedder;
use mnemo_types::error::EmbeddingError;

/// Output dimension of all-MiniLM-L6-v2.
pub const MINILM_DIMENSION: usize = 384;

const MODEL_NAME: &str = "all-MiniLM-L6-v2";

/// Local sentence embedder backed by fastembed.
///
/// Cheap to clone; clones share the loaded model.
#[derive(Clone)]
pub struct FastEmbedEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastEmbedEmbedder {
    /// Load the model, downloading it into `cache_dir` if absent.
    pub async fn load(cache_dir: PathBuf) -> Result<Self, EmbeddingError> {
        tracing::info!(model = MODEL_NAME, cache_dir = %cache_dir.display(), "Loading embedding model");

        let model = tokio::task::spawn_blocking(move || {
            let options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(false);
            TextEmbedding::try_new(options)
        })
        .await
        .map_err(|e| EmbeddingError::Unavailable(format!("model loader panicked: {e}")))?
        .map_err(|e| EmbeddingError::Unavailable(format!("failed to load {MODEL_NAME}: {e}")))?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

impl Embedder for FastEmbedEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| EmbeddingError::Unavailable("embedding model lock poisoned".to_string()))?;
            model
                .embed(texts, None)
                .map_err(|e| EmbeddingError::Inference(e.to_string()))
        })
        .await
        .map_err(|e| EmbeddingError::Inference(format!("embedding task panicked: {e}")))?
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }

    fn dimension(&self) -> usize {
        MINILM_DIMENSION
    }
}
