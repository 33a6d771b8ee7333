//! Application layer: the post store and the cached queries built on the gateway.

pub mod debounce;
pub mod error;
pub mod gateway;
pub mod search;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
