//! Deterministic feature-hashing embedder.
//!
//! Each lowercase alphanumeric token is hashed with SHA-256 into one of
//! `dimension` buckets with a +1/-1 sign; the result is L2-normalised.
//! Texts sharing words score positively under cosine similarity. Needs no
//! model download, so it backs offline use and tests.

use sha2::{Digest, Sha256};

use mnemo_core::memory::embedder::Embedder;
use mnemo_types::error::EmbeddingError;

/// SHA-256 feature-hashing implementation of `Embedder`.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Result<Self, EmbeddingError> {
        if dimension == 0 {
            return Err(EmbeddingError::Unavailable(
                "hash embedder dimension must be positive".to_string(),
            ));
        }
        Ok(Self { dimension })
    }

    /// Embed a single text. Text without tokens maps to the zero vector.
    pub fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let digest = Sha256::digest(token.to_lowercase().as_bytes());
            let mut index_bytes = [0u8; 8];
            index_bytes.copy_from_slice(&digest[..8]);
            let bucket = (u64::from_le_bytes(index_bytes) % self.dimension as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }
}

impl Embedder for HashEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn model_name(&self) -> &str {
        "hash-sha256"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
