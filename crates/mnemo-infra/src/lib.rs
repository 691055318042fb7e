//! Infrastructure layer for mnemo.
//!
//! Concrete implementations of the capability traits defined in `mnemo-core`:
//! the Anthropic Messages API provider, local embedding backends, and the
//! configuration and data-directory plumbing around them.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod secret;
pub mod vector;
