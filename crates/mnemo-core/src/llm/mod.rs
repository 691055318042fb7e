//! LLM provider abstraction.
//!
//! [`provider::LlmProvider`] is the trait concrete providers implement;
//! [`box_provider::BoxLlmProvider`] erases the type for runtime selection.

pub mod box_provider;
pub mod provider;
