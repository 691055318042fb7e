//! Environment variable secret lookup.
//!
//! Unset, empty, and non-Unicode variables all count as missing.

use secrecy::SecretString;

/// Environment variable holding the Anthropic API key.
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

/// Read the Anthropic API key from the process environment.
pub fn api_key_from_env() -> Option<SecretString> {
    resolve_secret(ANTHROPIC_API_KEY, |key| std::env::var(key).ok())
}

/// Look up `key` through `lookup`, dropping blank values.
pub fn resolve_secret(key: &str, lookup: impl Fn(&str) -> Option<String>) -> Option<SecretString> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(SecretString::from)
}
