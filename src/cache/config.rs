//! Response cache configuration.

use std::time::Duration;

const DEFAULT_TTL_MS: u64 = 300_000;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Age after which an entry is ignored and refetched on the next read.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(DEFAULT_TTL_MS),
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self { ttl: settings.ttl }
    }
}
