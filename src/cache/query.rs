//! Reusable "run an async fetch, track loading/error, memoize by key" handle.

use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::application::gateway::GatewayError;
use crate::util::lock::{rw_read, rw_write};

use super::config::CacheConfig;
use super::keys::CacheKey;
use super::store::ResponseCache;

const SOURCE: &str = "cache::query";

pub type Fetcher<A, T> = Arc<dyn Fn(A) -> BoxFuture<'static, Result<T, GatewayError>> + Send + Sync>;

/// Observable status of a [`Query`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Wraps a fetch function with loading/error tracking and keyed memoization.
///
/// Several queries may share one [`ResponseCache`]; writers to the same key
/// race under last-write-wins.
pub struct Query<A, T> {
    cache: Arc<ResponseCache>,
    fetcher: Fetcher<A, T>,
    default_ttl: Duration,
    state: RwLock<QueryState<T>>,
}

impl<A, T> Query<A, T>
where
    A: Send + 'static,
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new<F, Fut>(cache: Arc<ResponseCache>, config: &CacheConfig, fetcher: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, GatewayError>> + Send + 'static,
    {
        let fetcher: Fetcher<A, T> = Arc::new(move |args| fetcher(args).boxed());
        Self {
            cache,
            fetcher,
            default_ttl: config.ttl,
            state: RwLock::new(QueryState::default()),
        }
    }

    /// [`Query::execute_with_ttl`] with the configured time-to-live.
    pub async fn execute(&self, args: A, key: Option<&CacheKey>) -> Result<T, GatewayError> {
        self.execute_with_ttl(args, key, self.default_ttl).await
    }

    /// Serve a fresh cached value for `key`, or run the fetcher.
    ///
    /// Successful fetches are cached under `key` when one is given; failures
    /// are recorded in the state and never cached.
    pub async fn execute_with_ttl(
        &self,
        args: A,
        key: Option<&CacheKey>,
        ttl: Duration,
    ) -> Result<T, GatewayError> {
        if let Some(data) = key.and_then(|key| self.cached(key, ttl)) {
            let mut state = rw_write(&self.state, SOURCE, "execute.cached");
            state.data = Some(data.clone());
            state.loading = false;
            state.error = None;
            return Ok(data);
        }

        {
            let mut state = rw_write(&self.state, SOURCE, "execute.pending");
            state.loading = true;
            state.error = None;
        }

        match (self.fetcher)(args).await {
            Ok(data) => {
                if let Some(key) = key {
                    self.store(key, &data);
                }
                let mut state = rw_write(&self.state, SOURCE, "execute.fulfilled");
                state.data = Some(data.clone());
                state.loading = false;
                Ok(data)
            }
            Err(err) => {
                warn!(error = %err, "query fetch failed");
                let mut state = rw_write(&self.state, SOURCE, "execute.rejected");
                state.error = Some(err.message());
                state.loading = false;
                Err(err)
            }
        }
    }

    pub fn state(&self) -> QueryState<T> {
        rw_read(&self.state, SOURCE, "state").clone()
    }

    /// Evict the cached entry for `key`; no-op when absent.
    pub fn clear_cache(&self, key: &CacheKey) -> bool {
        self.cache.clear(key)
    }

    fn cached(&self, key: &CacheKey, ttl: Duration) -> Option<T> {
        let value = self.cache.get_fresh(key, ttl)?;
        match serde_json::from_value(value) {
            Ok(data) => Some(data),
            Err(err) => {
                warn!(key = %key, error = %err, "cached entry has a different shape; refetching");
                None
            }
        }
    }

    fn store(&self, key: &CacheKey, data: &T) {
        match serde_json::to_value(data) {
            Ok(value) => self.cache.insert(key.clone(), value),
            Err(err) => warn!(key = %key, error = %err, "response could not be cached"),
        }
    }
}
