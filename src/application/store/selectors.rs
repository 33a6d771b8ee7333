//! Pure projections of [`PostsState`]. Recomputed on every call.

use crate::domain::posts::{Post, PostId, matches_query};

use super::state::{Pagination, PostsState};

/// Items matching the filter, ordered by the sort field and direction.
///
/// The sort is stable, so equal keys keep their order in `items`.
pub fn filtered_and_sorted(state: &PostsState) -> Vec<Post> {
    let mut posts: Vec<Post> = if state.filter.is_empty() {
        state.items.clone()
    } else {
        let needle = state.filter.to_lowercase();
        state
            .items
            .iter()
            .filter(|post| matches_query(post, &needle))
            .cloned()
            .collect()
    };

    let (field, order) = (state.sort_by, state.sort_order);
    posts.sort_by(|a, b| order.apply(field.compare(a, b)));
    posts
}

pub fn is_favorite(state: &PostsState, id: PostId) -> bool {
    state.favorites.contains(&id)
}

pub fn pagination_info(state: &PostsState) -> Pagination {
    state.pagination.clone()
}

/// Favorite posts still present in `items`, in `items` order.
pub fn favorite_posts(state: &PostsState) -> Vec<Post> {
    state
        .items
        .iter()
        .filter(|post| is_favorite(state, post.id))
        .cloned()
        .collect()
}
