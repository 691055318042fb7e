//! Semantic memory: capability traits and the pieces the service composes.
//!
//! - [`embedder`] / [`box_embedder`]: text-to-vector conversion
//! - [`extractor`]: LLM-driven fact extraction with fail-open parsing
//! - [`store`] / [`in_memory`]: owner-keyed record storage
//! - [`similarity`]: cosine ranking and thresholded selection

pub mod box_embedder;
pub mod embedder;
pub mod extractor;
pub mod in_memory;
pub mod similarity;
pub mod store;
