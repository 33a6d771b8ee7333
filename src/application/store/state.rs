use serde::Serialize;

use crate::domain::posts::{Post, PostId};
use crate::domain::types::{SortField, SortOrder};

pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// 1-based; never zero.
    pub current_page: u32,
    /// Never zero.
    pub items_per_page: u32,
    /// Collection size last reported by the gateway.
    pub total_items: u64,
}

impl Pagination {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items: 0,
        }
    }

    /// Pages needed to show `total_items` at the current page size.
    pub fn page_count(&self) -> u64 {
        self.total_items
            .div_ceil(u64::from(self.items_per_page.max(1)))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

/// Everything the store knows about the remote collection and the view over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostsState {
    /// Insertion/server order; ids are unique.
    pub items: Vec<Post>,
    pub loading: bool,
    /// Last fetch failure, cleared when the next fetch starts.
    pub error: Option<String>,
    pub filter: String,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    /// Local only. Ids are kept even after the post leaves `items`.
    pub favorites: Vec<PostId>,
    pub pagination: Pagination,
}

impl PostsState {
    pub fn with_items_per_page(items_per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            filter: String::new(),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            favorites: Vec::new(),
            pagination: Pagination::new(items_per_page),
        }
    }

    pub fn position(&self, id: PostId) -> Option<usize> {
        self.items.iter().position(|post| post.id == id)
    }
}

impl Default for PostsState {
    fn default() -> Self {
        Self::with_items_per_page(DEFAULT_ITEMS_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_matches_defaults() {
        let state = PostsState::default();
        assert!(state.items.is_empty());
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.filter, "");
        assert_eq!(state.sort_by, SortField::Id);
        assert_eq!(state.sort_order, SortOrder::Desc);
        assert!(state.favorites.is_empty());
        assert_eq!(
            state.pagination,
            Pagination {
                current_page: 1,
                items_per_page: 10,
                total_items: 0,
            }
        );
    }

    #[test]
    fn page_count_rounds_up() {
        let pagination = Pagination {
            current_page: 2,
            items_per_page: 10,
            total_items: 47,
        };
        assert_eq!(pagination.page_count(), 5);
        assert_eq!(Pagination::default().page_count(), 0);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        assert_eq!(Pagination::new(0).items_per_page, 1);
    }
}
