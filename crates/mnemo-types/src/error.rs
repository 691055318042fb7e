use thiserror::Error;

use crate::llm::LlmError;

/// Errors from store operations (used by the `MemoryStore` trait in mnemo-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),
}

/// Errors from an embedding backend.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding model unavailable: {0}")]
    Unavailable(String),

    #[error("embedding inference failed: {0}")]
    Inference(String),

    #[error("embedder returned {actual} vectors for {expected} texts")]
    CountMismatch { expected: usize, actual: usize },

    #[error("embedding has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Why an LLM reply could not be turned into a list of facts.
///
/// Recovered inside the extractor: callers see an empty fact list, plus
/// this value when they ask for an extraction report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no JSON array found in response")]
    NoArray { raw: String },

    #[error("malformed JSON array: {reason}")]
    Malformed { reason: String, raw: String },
}

impl ExtractionError {
    /// The raw LLM response that failed to parse.
    pub fn raw(&self) -> &str {
        match self {
            ExtractionError::NoArray { raw } | ExtractionError::Malformed { raw, .. } => raw,
        }
    }
}

/// Errors surfaced by the memory service.
///
/// Dependency failures (LLM, embedder, store) are not recovered and propagate
/// through this type.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("owner id must not be empty")]
    InvalidOwner,

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Store(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("lock poisoned".to_string());
        assert_eq!(err.to_string(), "query error: lock poisoned");
    }

    #[test]
    fn test_embedding_error_display() {
        let err = EmbeddingError::DimensionMismatch {
            expected: 384,
            actual: 12,
        };
        assert_eq!(err.to_string(), "embedding has 12 dimensions, expected 384");
    }

    #[test]
    fn test_extraction_error_keeps_raw_response() {
        let err = ExtractionError::Malformed {
            reason: "expected value".to_string(),
            raw: "[oops]".to_string(),
        };
        assert_eq!(err.raw(), "[oops]");
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_memory_error_wraps_llm_error() {
        let err: MemoryError = LlmError::AuthenticationFailed.into();
        assert_eq!(err.to_string(), "authentication failed");
    }
}
