//! LLM provider implementations.
//!
//! Contains the Anthropic implementation of the [`LlmProvider`] trait defined
//! in `mnemo-core`, and a factory ([`create_provider`]) that builds it from
//! an [`ExtractorConfig`].
//!
//! [`LlmProvider`]: mnemo_core::llm::provider::LlmProvider

pub mod anthropic;

use secrecy::SecretString;

use mnemo_core::llm::box_provider::BoxLlmProvider;
use mnemo_types::config::ExtractorConfig;
use mnemo_types::llm::LlmError;

use self::anthropic::AnthropicProvider;

/// Create a [`BoxLlmProvider`] for fact extraction.
///
/// # Arguments
///
/// * `config` - Extractor configuration (model, base URL override)
/// * `api_key` - The resolved API key, if any
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] when no API key is available.
pub fn create_provider(
    config: &ExtractorConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key.ok_or(LlmError::AuthenticationFailed)?;
    let mut provider = AnthropicProvider::new(key, config.model.clone())?;
    if let Some(base_url) = &config.base_url {
        provider = provider.with_base_url(base_url.clone());
    }
    Ok(BoxLlmProvider::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_anthropic() {
        let config = ExtractorConfig::default();
        let provider = create_provider(&config, Some(SecretString::from("sk-test-key"))).unwrap();
        assert_eq!(provider.name(), "anthropic");
        assert!(!provider.capabilities().structured_output);
    }

    #[test]
    fn test_create_provider_missing_key() {
        let config = ExtractorConfig::default();
        match create_provider(&config, None) {
            Err(LlmError::AuthenticationFailed) => {}
            Err(other) => panic!("Expected AuthenticationFailed, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }
}
