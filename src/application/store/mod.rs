//! Client-side post store: remote collection, view settings, favorites.
//!
//! All state lives in one [`PostsState`] guarded by a lock and is only
//! changed by [`reducer::reduce`]. Async operations talk to a
//! [`PostGateway`] and dispatch the outcome when the request settles.

mod actions;
mod reducer;
mod selectors;
mod state;


use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::application::gateway::{GatewayError, PostGateway};
use crate::config::Settings;
use crate::domain::posts::{NewPost, Post, PostId, PostPage, PostPatch};
use crate::domain::types::{SortField, SortOrder};
use crate::util::lock::{rw_read, rw_write};

pub use actions::Action;
pub use reducer::{FALLBACK_ERROR_MESSAGE, reduce};
pub use selectors::{favorite_posts, filtered_and_sorted, is_favorite, pagination_info};
pub use state::{DEFAULT_ITEMS_PER_PAGE, Pagination, PostsState};

const SOURCE: &str = "application::store";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Page size for the initial state and for [`PostStore::reset`].
    pub items_per_page: u32,
    /// Ignore a fetch outcome issued before the newest outcome already applied.
    ///
    /// Off by default: the last fetch to settle wins.
    pub discard_stale_fetches: bool,
}

impl StoreOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            items_per_page: settings.pagination.items_per_page.get(),
            ..Self::default()
        }
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            discard_stale_fetches: false,
        }
    }
}

struct StoreCell {
    state: PostsState,
    /// Generation of the newest fetch whose outcome was applied.
    applied_generation: u64,
}

struct StoreInner {
    gateway: Arc<dyn PostGateway>,
    options: StoreOptions,
    cell: RwLock<StoreCell>,
    issued: AtomicU64,
}

/// Shared handle to the post store. Cloning is cheap.
#[derive(Clone)]
pub struct PostStore {
    inner: Arc<StoreInner>,
}

impl PostStore {
    pub fn new(gateway: Arc<dyn PostGateway>) -> Self {
        Self::with_options(gateway, StoreOptions::default())
    }

    pub fn with_options(gateway: Arc<dyn PostGateway>, options: StoreOptions) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                gateway,
                options,
                cell: RwLock::new(StoreCell {
                    state: PostsState::with_items_per_page(options.items_per_page),
                    applied_generation: 0,
                }),
                issued: AtomicU64::new(0),
            }),
        }
    }

    pub fn options(&self) -> StoreOptions {
        self.inner.options
    }

    /// Replace `items` with the full remote collection.
    ///
    /// A failure keeps the previous items, records the message in
    /// `error`, and is returned to the caller as well.
    pub async fn fetch_all(&self) -> Result<Vec<Post>, GatewayError> {
        let generation = self.begin_fetch();
        match self.inner.gateway.list().await {
            Ok(posts) => {
                info!(count = posts.len(), generation, "fetched posts");
                self.settle(generation, Action::FetchSucceeded(posts.clone()));
                Ok(posts)
            }
            Err(err) => Err(self.fail(generation, err)),
        }
    }

    /// Replace `items` with one page of the remote collection and record
    /// the reported total. `current_page` is left to the caller.
    pub async fn fetch_paginated(&self, page: u32, limit: u32) -> Result<PostPage, GatewayError> {
        let generation = self.begin_fetch();
        if page == 0 || limit == 0 {
            let err = GatewayError::invalid_input(format!(
                "page and limit must be at least 1 (page {page}, limit {limit})"
            ));
            return Err(self.fail(generation, err));
        }

        let start = u64::from(page - 1) * u64::from(limit);
        match self.inner.gateway.list_page(start, limit).await {
            Ok(window) => {
                info!(
                    page,
                    limit,
                    count = window.posts.len(),
                    total = window.total,
                    generation,
                    "fetched post page"
                );
                self.settle(generation, Action::PageFetchSucceeded(window.clone()));
                Ok(window)
            }
            Err(err) => Err(self.fail(generation, err)),
        }
    }

    /// Fetch one post and upsert it into `items`. Errors propagate only.
    pub async fn get(&self, id: PostId) -> Result<Post, GatewayError> {
        let post = self.inner.gateway.get(id).await?;
        self.dispatch(Action::PostFetched(post.clone()));
        Ok(post)
    }

    /// Create a post and prepend the returned record. Errors propagate only.
    pub async fn create(&self, post: NewPost) -> Result<Post, GatewayError> {
        let created = self.inner.gateway.create(&post).await?;
        info!(id = created.id, "created post");
        self.dispatch(Action::PostCreated(created.clone()));
        Ok(created)
    }

    /// Update a post and replace it in place when present locally.
    /// Errors propagate only.
    pub async fn update(&self, id: PostId, patch: PostPatch) -> Result<Post, GatewayError> {
        let updated = self.inner.gateway.update(id, &patch).await?;
        info!(id = updated.id, "updated post");
        self.dispatch(Action::PostUpdated(updated.clone()));
        Ok(updated)
    }

    /// Delete a post remotely, then drop it from `items`. Errors propagate only.
    pub async fn remove(&self, id: PostId) -> Result<PostId, GatewayError> {
        self.inner.gateway.delete(id).await?;
        info!(id, "deleted post");
        self.dispatch(Action::PostDeleted(id));
        Ok(id)
    }

    pub fn set_filter(&self, filter: impl Into<String>) {
        self.dispatch(Action::SetFilter(filter.into()));
    }

    pub fn set_sort_by(&self, field: SortField) {
        self.dispatch(Action::SetSortBy(field));
    }

    pub fn set_sort_order(&self, order: SortOrder) {
        self.dispatch(Action::SetSortOrder(order));
    }

    pub fn toggle_favorite(&self, id: PostId) {
        self.dispatch(Action::ToggleFavorite(id));
    }

    pub fn set_page(&self, page: u32) {
        self.dispatch(Action::SetPage(page));
    }

    pub fn set_items_per_page(&self, count: u32) {
        self.dispatch(Action::SetItemsPerPage(count));
    }

    /// Back to the initial state. With `discard_stale_fetches`, fetches
    /// still in flight are ignored when they settle.
    pub fn reset(&self) {
        let mut cell = rw_write(&self.inner.cell, SOURCE, "reset");
        let action = Action::Reset {
            items_per_page: self.inner.options.items_per_page,
        };
        debug!(action = action.kind(), "dispatch");
        reduce(&mut cell.state, action);
        cell.applied_generation = self.inner.issued.load(Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> PostsState {
        self.read(|state| state.clone())
    }

    pub fn visible_posts(&self) -> Vec<Post> {
        self.read(filtered_and_sorted)
    }

    pub fn is_favorite(&self, id: PostId) -> bool {
        self.read(|state| is_favorite(state, id))
    }

    pub fn pagination(&self) -> Pagination {
        self.read(pagination_info)
    }

    pub fn favorite_posts(&self) -> Vec<Post> {
        self.read(favorite_posts)
    }

    /// Apply a synchronous action.
    pub fn dispatch(&self, action: Action) {
        debug!(action = action.kind(), "dispatch");
        let mut cell = rw_write(&self.inner.cell, SOURCE, "dispatch");
        reduce(&mut cell.state, action);
    }

    fn read<R>(&self, f: impl FnOnce(&PostsState) -> R) -> R {
        let cell = rw_read(&self.inner.cell, SOURCE, "read");
        f(&cell.state)
    }

    fn begin_fetch(&self) -> u64 {
        let generation = self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(Action::FetchStarted);
        generation
    }

    fn fail(&self, generation: u64, err: GatewayError) -> GatewayError {
        warn!(error = %err, generation, "fetching posts failed");
        self.settle(generation, Action::FetchFailed(err.message()));
        err
    }

    /// Apply the outcome of fetch `generation`, unless the store discards
    /// stale fetches and a newer outcome already landed.
    fn settle(&self, generation: u64, action: Action) {
        let mut cell = rw_write(&self.inner.cell, SOURCE, "settle");
        if self.inner.options.discard_stale_fetches && generation <= cell.applied_generation {
            debug!(
                action = action.kind(),
                generation,
                applied = cell.applied_generation,
                "discarding stale fetch outcome"
            );
            return;
        }
        debug!(action = action.kind(), generation, "dispatch");
        reduce(&mut cell.state, action);
        cell.applied_generation = cell.applied_generation.max(generation);
    }
}
