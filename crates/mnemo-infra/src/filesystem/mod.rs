//! Data directory layout for mnemo.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MNEMO_DATA_DIR";

/// Compute the config file path: `{data_dir}/config.toml`.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Compute the embedding model cache path: `{data_dir}/models/`.
pub fn model_cache_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("models")
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `MNEMO_DATA_DIR` environment variable
/// 2. `~/.mnemo`
pub fn resolve_data_dir() -> PathBuf {
    resolve_data_dir_with(|key| std::env::var(key).ok())
}

/// [`resolve_data_dir`] with an explicit environment lookup.
pub fn resolve_data_dir_with(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = lookup(DATA_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".mnemo");
    }

    // Last resort: current directory
    PathBuf::from(".mnemo")
}
