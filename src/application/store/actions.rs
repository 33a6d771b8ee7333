use crate::domain::posts::{Post, PostId, PostPage};
use crate::domain::types::{SortField, SortOrder};

/// Every state transition the store can make.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetFilter(String),
    SetSortBy(SortField),
    SetSortOrder(SortOrder),
    ToggleFavorite(PostId),
    SetPage(u32),
    /// Also rewinds to the first page.
    SetItemsPerPage(u32),
    FetchStarted,
    FetchSucceeded(Vec<Post>),
    PageFetchSucceeded(PostPage),
    FetchFailed(String),
    /// A single post was fetched; replaced in place or appended.
    PostFetched(Post),
    PostCreated(Post),
    PostUpdated(Post),
    PostDeleted(PostId),
    Reset { items_per_page: u32 },
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetFilter(_) => "posts/set_filter",
            Action::SetSortBy(_) => "posts/set_sort_by",
            Action::SetSortOrder(_) => "posts/set_sort_order",
            Action::ToggleFavorite(_) => "posts/toggle_favorite",
            Action::SetPage(_) => "posts/set_page",
            Action::SetItemsPerPage(_) => "posts/set_items_per_page",
            Action::FetchStarted => "posts/fetch/pending",
            Action::FetchSucceeded(_) => "posts/fetch/fulfilled",
            Action::PageFetchSucceeded(_) => "posts/fetch_page/fulfilled",
            Action::FetchFailed(_) => "posts/fetch/rejected",
            Action::PostFetched(_) => "posts/get/fulfilled",
            Action::PostCreated(_) => "posts/create/fulfilled",
            Action::PostUpdated(_) => "posts/update/fulfilled",
            Action::PostDeleted(_) => "posts/delete/fulfilled",
            Action::Reset { .. } => "posts/reset",
        }
    }
}
