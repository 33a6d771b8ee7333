//! Response cache for ad-hoc queries.
//!
//! Independent of the post store: a [`Query`] runs a fetch function, tracks
//! its loading/error status and memoizes successful results in a shared
//! [`ResponseCache`] under a typed [`CacheKey`] for a time-to-live
//! (five minutes unless configured otherwise).

mod config;
mod keys;
mod query;
mod store;

pub use config::CacheConfig;
pub use keys::CacheKey;
pub use query::{Fetcher, Query, QueryState};
pub use store::{
    CachedEntry, METRIC_CACHE_HIT, METRIC_CACHE_MISS, METRIC_CACHE_STORE, ResponseCache,
};
