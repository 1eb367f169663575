//! # State Configuration
//!
//! Where committed membership facts live and how they are written.

use std::path::PathBuf;

use super::errors::StateError;

/// Environment variable naming the on-disk data directory.
pub const ENV_DATA_DIR: &str = "AX_DATA_DIR";
/// Environment variable toggling fsync on every vault write.
pub const ENV_SYNC_WRITES: &str = "AX_SYNC_WRITES";
/// Environment variable sizing the RocksDB block cache.
pub const ENV_BLOCK_CACHE_BYTES: &str = "AX_BLOCK_CACHE_BYTES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateConfig {
    /// RocksDB directory. `None` keeps every vault in memory.
    pub data_dir: Option<PathBuf>,
    /// fsync after each vault write.
    pub sync_writes: bool,
    /// Block cache size in bytes (default: 64MB).
    pub block_cache_size: usize,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            sync_writes: true,
            block_cache_size: 64 * 1024 * 1024,
        }
    }
}

impl StateConfig {
    /// Persistent configuration rooted at `dir`.
    pub fn persistent(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Small cache, no fsync.
    pub fn for_testing(dir: Option<PathBuf>) -> Self {
        Self {
            data_dir: dir,
            sync_writes: false,
            block_cache_size: 8 * 1024 * 1024,
        }
    }

    /// Read overrides from the environment on top of the defaults.
    pub fn from_env() -> Result<Self, StateError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StateError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(value) = lookup(ENV_SYNC_WRITES) {
            config.sync_writes = parse_bool(&value).ok_or_else(|| {
                StateError::Config(format!("{ENV_SYNC_WRITES} must be a boolean, got '{value}'"))
            })?;
        }

        if let Some(value) = lookup(ENV_BLOCK_CACHE_BYTES) {
            config.block_cache_size = value.trim().parse().map_err(|_| {
                StateError::Config(format!(
                    "{ENV_BLOCK_CACHE_BYTES} must be a byte count, got '{value}'"
                ))
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
