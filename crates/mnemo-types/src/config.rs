//! Configuration types for mnemo.
//!
//! `MemoryConfig` represents the top-level `config.toml` that controls
//! search defaults, the extraction model, and the embedding backend.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Top-level configuration for the memory store.
///
/// Loaded from `~/.mnemo/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Default maximum number of results returned by `search`.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Results must score strictly above this cosine similarity.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    #[serde(default)]
    pub extractor: ExtractorConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

pub const DEFAULT_SEARCH_LIMIT: usize = 32;
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.1;

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_similarity_threshold() -> f32 {
    DEFAULT_SIMILARITY_THRESHOLD
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            search_limit: default_search_limit(),
            similarity_threshold: default_similarity_threshold(),
            extractor: ExtractorConfig::default(),
            embedding: EmbeddingConfig::default(),
        }
    }
}

/// Settings for the LLM-backed fact extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Ask the provider for a schema-constrained reply when it supports one.
    #[serde(default)]
    pub structured_output: bool,

    /// Override the API endpoint (proxies, local gateways).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_max_tokens() -> u32 {
    8192
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: None,
            structured_output: false,
            base_url: None,
        }
    }
}

/// Which embedding implementation to wire up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Local all-MiniLM-L6-v2 via fastembed (384 dimensions).
    Fastembed,
    /// Deterministic feature hashing, no model download.
    Hash,
}

impl fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingBackend::Fastembed => write!(f, "fastembed"),
            EmbeddingBackend::Hash => write!(f, "hash"),
        }
    }
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fastembed" => Ok(EmbeddingBackend::Fastembed),
            "hash" => Ok(EmbeddingBackend::Hash),
            other => Err(format!("invalid embedding backend: '{other}'")),
        }
    }
}

/// Settings for the embedding backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_backend")]
    pub backend: EmbeddingBackend,

    /// Output dimension of the `hash` backend.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

fn default_backend() -> EmbeddingBackend {
    EmbeddingBackend::Fastembed
}

fn default_dimension() -> usize {
    384
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            dimension: default_dimension(),
        }
    }
}
