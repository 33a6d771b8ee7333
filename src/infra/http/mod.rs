//! HTTP adapters for the remote post collection.

mod client;

pub use client::HttpPostGateway;
