//! postboard: an in-memory post collection store over a jsonplaceholder-style
//! REST API.
//!
//! - [`application::store::PostStore`] owns the fetched posts plus view
//!   parameters (filter, sort, favorites, pagination) and mediates every
//!   gateway call.
//! - [`cache::ResponseCache`] and [`cache::Query`] memoize ad-hoc fetches by
//!   typed key with a time-to-live, independently of the store.
//! - [`infra::http::HttpPostGateway`] is the reqwest-backed gateway.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
pub(crate) mod util;
