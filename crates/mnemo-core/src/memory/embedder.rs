//! Embedder trait for text-to-vector conversion.
//!
//! Implementations (fastembed, feature hashing) live in mnemo-infra.

use mnemo_types::error::EmbeddingError;

/// Trait for converting text into embedding vectors.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
///
/// Contract: `embed` returns exactly one vector per input text, in input
/// order, each of length [`Embedder::dimension`]. `embed(&[])` returns an
/// empty vector. The same text always maps to (numerically) the same vector.
pub trait Embedder: Send + Sync {
    /// Embed one or more texts into vectors.
    fn embed(
        &self,
        texts: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send;

    /// The model name used for embeddings (e.g., "all-MiniLM-L6-v2").
    fn model_name(&self) -> &str;

    /// The dimensionality of the output vectors.
    fn dimension(&self) -> usize;
}
