//! Catalog service configuration

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding [`CatalogConfig::source_path`].
pub const SOURCE_ENV: &str = "CATALOG_SOURCE";
/// Environment variable overriding [`CatalogConfig::ttl`], in whole seconds.
pub const TTL_ENV: &str = "CATALOG_TTL_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidTtl { name: &'static str, value: String },
}

/// Configuration for the catalog cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Location of the catalog XML document
    pub source_path: PathBuf,
    /// How long a loaded catalog is served before the next read reloads it
    pub ttl: Duration,
    /// Capacity of the cache task's request channel
    pub channel_capacity: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("wwwroot/products.xml"),
            ttl: Duration::from_secs(10 * 60), // 10 minutes
            channel_capacity: 32,
        }
    }
}

impl CatalogConfig {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            ..Default::default()
        }
    }

    /// Defaults overlaid with `CATALOG_SOURCE` and `CATALOG_TTL_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = lookup(SOURCE_ENV).filter(|path| !path.trim().is_empty()) {
            config.source_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(TTL_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTtl {
                    name: TTL_ENV,
                    value: raw.clone(),
                })?;
            config.ttl = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = source_path.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity.max(1);
        self
    }
}
