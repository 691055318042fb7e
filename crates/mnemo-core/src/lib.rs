//! Business logic and capability trait definitions for mnemo.
//!
//! This crate defines the "ports" (embedder, LLM provider, fact extractor,
//! memory store) that the infrastructure layer implements, plus the logic
//! that composes them: LLM-driven fact extraction, cosine ranking, and the
//! `MemoryService` facade. It depends only on `mnemo-types` -- never on
//! `mnemo-infra` or any network/model crate.

pub mod llm;
pub mod memory;
pub mod service;
