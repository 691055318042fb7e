//! Configuration loader for mnemo.
//!
//! Reads `config.toml` from the data directory (`~/.mnemo/` by default)
//! and deserializes it into [`MemoryConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::Path;

use mnemo_types::config::MemoryConfig;

use crate::filesystem::config_path;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`MemoryConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - A `search_limit` of zero is replaced by the default.
pub async fn load_memory_config(data_dir: &Path) -> MemoryConfig {
    let config_path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return MemoryConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return MemoryConfig::default();
        }
    };

    let mut config = match toml::from_str::<MemoryConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            return MemoryConfig::default();
        }
    };

    if config.search_limit == 0 {
        tracing::warn!("search_limit must be positive, using default");
        config.search_limit = MemoryConfig::default().search_limit;
    }

    config
}
