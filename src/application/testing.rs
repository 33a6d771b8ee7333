//! In-memory gateways for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::application::gateway::{GatewayError, PostGateway};
use crate::domain::posts::{Comment, NewPost, Post, PostId, PostPage, PostPatch, matches_query};

pub(crate) fn post(id: PostId, title: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        body: format!("body of {title}"),
        user_id: Some(1),
    }
}

/// Serves a fixed server-side collection; can be switched to fail.
pub(crate) struct MemoryGateway {
    posts: Mutex<Vec<Post>>,
    next_id: AtomicU64,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl MemoryGateway {
    pub(crate) fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            next_id: AtomicU64::new(101),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<Vec<Post>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::status(500, Some("Internal Server Error")));
        }
        Ok(self.posts.lock().expect("posts lock").clone())
    }
}

#[async_trait]
impl PostGateway for MemoryGateway {
    async fn list(&self) -> Result<Vec<Post>, GatewayError> {
        self.enter()
    }

    async fn get(&self, id: PostId) -> Result<Post, GatewayError> {
        self.enter()?
            .into_iter()
            .find(|post| post.id == id)
            .ok_or_else(|| GatewayError::status(404, Some("Not Found")))
    }

    async fn list_page(&self, start: u64, limit: u32) -> Result<PostPage, GatewayError> {
        let posts = self.enter()?;
        let total = posts.len() as u64;
        let posts = posts
            .into_iter()
            .skip(start as usize)
            .take(limit as usize)
            .collect();
        Ok(PostPage { posts, total })
    }

    async fn create(&self, post: &NewPost) -> Result<Post, GatewayError> {
        self.enter()?;
        Ok(Post {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: post.title.clone(),
            body: post.body.clone(),
            user_id: post.user_id,
        })
    }

    async fn update(&self, id: PostId, patch: &PostPatch) -> Result<Post, GatewayError> {
        let existing = self.enter()?.into_iter().find(|post| post.id == id);
        let base = existing.unwrap_or(Post {
            id,
            title: String::new(),
            body: String::new(),
            user_id: None,
        });
        Ok(Post {
            id,
            title: patch.title.clone().unwrap_or(base.title),
            body: patch.body.clone().unwrap_or(base.body),
            user_id: patch.user_id.or(base.user_id),
        })
    }

    async fn delete(&self, _id: PostId) -> Result<(), GatewayError> {
        self.enter().map(|_| ())
    }

    async fn comments(&self, id: PostId) -> Result<Vec<Comment>, GatewayError> {
        self.enter()?;
        Ok(vec![Comment {
            id: 1,
            post_id: id,
            name: "first".into(),
            email: "a@example.com".into(),
            body: "nice".into(),
        }])
    }

    async fn search(&self, query: &str) -> Result<Vec<Post>, GatewayError> {
        let needle = query.to_lowercase();
        Ok(self
            .enter()?
            .into_iter()
            .filter(|post| matches_query(post, &needle))
            .collect())
    }
}

/// `list` parks every call until the test releases it.
#[derive(Default)]
pub(crate) struct GatedGateway {
    pending: Mutex<Vec<Option<oneshot::Sender<Result<Vec<Post>, GatewayError>>>>>,
}

impl GatedGateway {
    pub(crate) fn parked(&self) -> usize {
        self.pending.lock().expect("pending lock").len()
    }

    /// Yield until `count` calls are parked.
    pub(crate) async fn wait_for(&self, count: usize) {
        while self.parked() < count {
            tokio::task::yield_now().await;
        }
    }

    /// Complete the `index`-th parked call (0-based, in call order).
    pub(crate) fn release(&self, index: usize, outcome: Result<Vec<Post>, GatewayError>) {
        let sender = self.pending.lock().expect("pending lock")[index]
            .take()
            .expect("call already released");
        let _ = sender.send(outcome);
    }

    fn unscripted() -> GatewayError {
        GatewayError::invalid_input("not scripted")
    }
}

#[async_trait]
impl PostGateway for GatedGateway {
    async fn list(&self) -> Result<Vec<Post>, GatewayError> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().expect("pending lock").push(Some(tx));
        rx.await.unwrap_or_else(|_| Err(Self::unscripted()))
    }

    async fn get(&self, _id: PostId) -> Result<Post, GatewayError> {
        Err(Self::unscripted())
    }

    async fn list_page(&self, _start: u64, _limit: u32) -> Result<PostPage, GatewayError> {
        Err(Self::unscripted())
    }

    async fn create(&self, _post: &NewPost) -> Result<Post, GatewayError> {
        Err(Self::unscripted())
    }

    async fn update(&self, _id: PostId, _patch: &PostPatch) -> Result<Post, GatewayError> {
        Err(Self::unscripted())
    }

    async fn delete(&self, _id: PostId) -> Result<(), GatewayError> {
        Err(Self::unscripted())
    }

    async fn comments(&self, _id: PostId) -> Result<Vec<Comment>, GatewayError> {
        Err(Self::unscripted())
    }

    async fn search(&self, _query: &str) -> Result<Vec<Post>, GatewayError> {
        Err(Self::unscripted())
    }
}
