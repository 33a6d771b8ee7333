//! Shared response cache storage.
//!
//! Unbounded map from [`CacheKey`] to the last successful response. Entries
//! leave only through [`ResponseCache::clear`]; stale ones are ignored at
//! read time and overwritten by the next successful fetch.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use metrics::counter;
use serde_json::Value;
use tokio::time::Instant;
use tracing::debug;

use crate::util::lock::{rw_read, rw_write};

use super::keys::CacheKey;

const SOURCE: &str = "cache::store";

pub const METRIC_CACHE_HIT: &str = "postboard_cache_hit_total";
pub const METRIC_CACHE_MISS: &str = "postboard_cache_miss_total";
pub const METRIC_CACHE_STORE: &str = "postboard_cache_store_total";

#[derive(Debug, Clone)]
pub struct CachedEntry {
    pub data: Value,
    pub stored_at: Instant,
}

impl CachedEntry {
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }
}

#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<CacheKey, CachedEntry>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entry for `key` if it is younger than `ttl`.
    pub fn get_fresh(&self, key: &CacheKey, ttl: Duration) -> Option<Value> {
        let now = Instant::now();
        let entries = rw_read(&self.entries, SOURCE, "get_fresh");
        match entries.get(key) {
            Some(entry) if entry.is_fresh(now, ttl) => {
                counter!(METRIC_CACHE_HIT).increment(1);
                debug!(key = %key, "response cache hit");
                Some(entry.data.clone())
            }
            Some(_) => {
                counter!(METRIC_CACHE_MISS).increment(1);
                debug!(key = %key, "response cache entry is stale");
                None
            }
            None => {
                counter!(METRIC_CACHE_MISS).increment(1);
                None
            }
        }
    }

    /// Store `data` under `key`, replacing any previous entry.
    pub fn insert(&self, key: CacheKey, data: Value) {
        let entry = CachedEntry {
            data,
            stored_at: Instant::now(),
        };
        rw_write(&self.entries, SOURCE, "insert").insert(key, entry);
        counter!(METRIC_CACHE_STORE).increment(1);
    }

    /// Evict exactly the entry for `key`. Returns whether one was present.
    pub fn clear(&self, key: &CacheKey) -> bool {
        rw_write(&self.entries, SOURCE, "clear").remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
