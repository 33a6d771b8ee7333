//! Typed cache keys.
//!
//! Each variant describes one kind of request, so unrelated queries cannot
//! collide even when their parameters render to the same text.

use std::fmt;

use crate::domain::posts::PostId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Comments attached to a post.
    Comments(PostId),
    /// Full-text search results for a query string.
    Search { query: String },
    /// Caller-defined entries, scoped by namespace.
    Custom {
        namespace: &'static str,
        key: String,
    },
}

impl CacheKey {
    pub fn search(query: impl Into<String>) -> Self {
        Self::Search {
            query: query.into(),
        }
    }

    pub fn custom(namespace: &'static str, key: impl Into<String>) -> Self {
        Self::Custom {
            namespace,
            key: key.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Comments(id) => write!(f, "posts/{id}/comments"),
            CacheKey::Search { query } => write!(f, "posts?q={query}"),
            CacheKey::Custom { namespace, key } => write!(f, "{namespace}:{key}"),
        }
    }
}
