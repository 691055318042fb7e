//! Secret resolution.
//!
//! mnemo reads its single credential, the Anthropic API key, from the
//! environment. Values are wrapped in [`secrecy::SecretString`] as soon as
//! they are read.

pub mod env;

pub use env::{ANTHROPIC_API_KEY, api_key_from_env};
