//! Shared domain types for mnemo.
//!
//! This crate contains the types used across the memory store: memory
//! records and their identifiers, conversation input, LLM request/response
//! shapes, configuration, and the error enums.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod memory;
