//! Cached full-text search and per-post comments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::application::debounce::settled;
use crate::application::gateway::{GatewayError, PostGateway};
use crate::cache::{CacheConfig, CacheKey, Query, QueryState, ResponseCache};
use crate::domain::posts::{Comment, Post, PostId};

/// `GET /posts?q=` behind the response cache.
pub struct PostSearch {
    query: Query<String, Vec<Post>>,
}

impl PostSearch {
    pub fn new(
        gateway: Arc<dyn PostGateway>,
        cache: Arc<ResponseCache>,
        config: &CacheConfig,
    ) -> Self {
        let query = Query::new(cache, config, move |term: String| {
            let gateway = Arc::clone(&gateway);
            async move { gateway.search(&term).await }
        });
        Self { query }
    }

    /// Results for `term`, trimmed. A blank term yields no results and
    /// sends no request.
    pub async fn search(&self, term: &str) -> Result<Vec<Post>, GatewayError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let key = CacheKey::search(term);
        self.query.execute(term.to_string(), Some(&key)).await
    }

    /// Wait for the term on `rx` to stay unchanged for `delay`, then search it.
    ///
    /// Returns `None` once the sender is gone with no unseen term.
    pub async fn follow(
        &self,
        rx: &mut watch::Receiver<String>,
        delay: Duration,
    ) -> Option<Result<Vec<Post>, GatewayError>> {
        let term = settled(rx, delay).await?;
        debug!(term = %term, "search term settled");
        Some(self.search(&term).await)
    }

    pub fn state(&self) -> QueryState<Vec<Post>> {
        self.query.state()
    }

    /// Forget cached results for `term`.
    pub fn invalidate(&self, term: &str) -> bool {
        self.query.clear_cache(&CacheKey::search(term.trim()))
    }
}

/// `GET /posts/{id}/comments` behind the response cache.
pub struct PostComments {
    query: Query<PostId, Vec<Comment>>,
}

impl PostComments {
    pub fn new(
        gateway: Arc<dyn PostGateway>,
        cache: Arc<ResponseCache>,
        config: &CacheConfig,
    ) -> Self {
        let query = Query::new(cache, config, move |id: PostId| {
            let gateway = Arc::clone(&gateway);
            async move { gateway.comments(id).await }
        });
        Self { query }
    }

    pub async fn load(&self, id: PostId) -> Result<Vec<Comment>, GatewayError> {
        self.query.execute(id, Some(&CacheKey::Comments(id))).await
    }

    pub fn state(&self) -> QueryState<Vec<Comment>> {
        self.query.state()
    }
}
