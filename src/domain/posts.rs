//! Post entities and the pure helpers the store builds on.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use postboard_api_types::{Comment, NewPost, Post, PostId, PostPatch};

/// One window of the remote collection plus the gateway-reported total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: u64,
}

/// True when `title` or `body` contains `needle` ignoring case.
///
/// `needle` must already be lowercased.
pub fn matches_query(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle) || post.body.to_lowercase().contains(needle)
}

/// Drop later entries whose id was already seen, keeping first occurrences in order.
pub fn dedup_by_id(posts: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::with_capacity(posts.len());
    posts
        .into_iter()
        .filter(|post| seen.insert(post.id))
        .collect()
}
