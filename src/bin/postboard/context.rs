use std::sync::Arc;

use postboard::application::error::AppError;
use postboard::application::gateway::PostGateway;
use postboard::application::search::{PostComments, PostSearch};
use postboard::application::store::{PostStore, StoreOptions};
use postboard::cache::{CacheConfig, ResponseCache};
use postboard::config::Settings;
use postboard::infra::http::HttpPostGateway;
use tracing::debug;

/// Services shared by every command handler.
pub struct Ctx {
    pub store: PostStore,
    pub search: PostSearch,
    pub comments: PostComments,
    pub items_per_page: u32,
}

impl Ctx {
    pub fn new(gateway: Arc<dyn PostGateway>, settings: &Settings) -> Self {
        let cache = Arc::new(ResponseCache::new());
        let cache_config = CacheConfig::from(&settings.cache);
        Self {
            store: PostStore::with_options(
                Arc::clone(&gateway),
                StoreOptions::from_settings(settings),
            ),
            search: PostSearch::new(Arc::clone(&gateway), Arc::clone(&cache), &cache_config),
            comments: PostComments::new(gateway, cache, &cache_config),
            items_per_page: settings.pagination.items_per_page.get(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let gateway = HttpPostGateway::from_settings(&settings.api)?;
        debug!(base_url = %gateway.base_url(), "gateway ready");
        Ok(Self::new(Arc::new(gateway), settings))
    }
}
