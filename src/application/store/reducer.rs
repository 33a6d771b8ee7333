use crate::domain::posts::dedup_by_id;

use super::actions::Action;
use super::state::PostsState;

/// Message recorded when a fetch fails without one.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// Apply `action` to `state`. The only place `PostsState` changes.
pub fn reduce(state: &mut PostsState, action: Action) {
    match action {
        Action::SetFilter(filter) => state.filter = filter,
        Action::SetSortBy(field) => state.sort_by = field,
        Action::SetSortOrder(order) => state.sort_order = order,
        Action::ToggleFavorite(id) => match state.favorites.iter().position(|fav| *fav == id) {
            Some(index) => {
                state.favorites.remove(index);
            }
            None => state.favorites.push(id),
        },
        Action::SetPage(page) => state.pagination.current_page = page.max(1),
        Action::SetItemsPerPage(count) => {
            state.pagination.items_per_page = count.max(1);
            state.pagination.current_page = 1;
        }
        Action::FetchStarted => {
            state.loading = true;
            state.error = None;
        }
        Action::FetchSucceeded(posts) => {
            state.loading = false;
            state.items = dedup_by_id(posts);
        }
        Action::PageFetchSucceeded(page) => {
            state.loading = false;
            state.items = dedup_by_id(page.posts);
            state.pagination.total_items = page.total;
        }
        Action::FetchFailed(message) => {
            state.loading = false;
            state.error = Some(if message.is_empty() {
                FALLBACK_ERROR_MESSAGE.to_string()
            } else {
                message
            });
        }
        Action::PostFetched(post) => match state.position(post.id) {
            Some(index) => state.items[index] = post,
            None => state.items.push(post),
        },
        Action::PostCreated(post) => {
            state.items.retain(|existing| existing.id != post.id);
            state.items.insert(0, post);
        }
        Action::PostUpdated(post) => {
            if let Some(index) = state.position(post.id) {
                state.items[index] = post;
            }
        }
        Action::PostDeleted(id) => state.items.retain(|post| post.id != id),
        Action::Reset { items_per_page } => {
            *state = PostsState::with_items_per_page(items_per_page);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::posts::{Post, PostId, PostPage};
    use crate::domain::types::{SortField, SortOrder};

    fn post(id: PostId, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            body: format!("body {id}"),
            user_id: None,
        }
    }

    fn ids(state: &PostsState) -> Vec<PostId> {
        state.items.iter().map(|p| p.id).collect()
    }

    fn has_unique_ids(state: &PostsState) -> bool {
        let unique: HashSet<_> = state.items.iter().map(|p| p.id).collect();
        unique.len() == state.items.len()
    }

    #[test]
    fn fetch_lifecycle_sets_and_clears_loading() {
        let mut state = PostsState::default();
        state.error = Some("old".into());

        reduce(&mut state, Action::FetchStarted);
        assert!(state.loading);
        assert!(state.error.is_none());

        reduce(&mut state, Action::FetchSucceeded(vec![post(1, "a"), post(2, "b")]));
        assert!(!state.loading);
        assert_eq!(ids(&state), [1, 2]);
    }

    #[test]
    fn fetch_failure_keeps_items() {
        let mut state = PostsState::default();
        reduce(&mut state, Action::FetchSucceeded(vec![post(1, "a")]));

        reduce(&mut state, Action::FetchStarted);
        reduce(&mut state, Action::FetchFailed("boom".into()));

        assert_eq!(ids(&state), [1]);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(!state.loading);
    }

    #[test]
    fn empty_failure_message_falls_back() {
        let mut state = PostsState::default();
        reduce(&mut state, Action::FetchFailed(String::new()));
        assert_eq!(state.error.as_deref(), Some(FALLBACK_ERROR_MESSAGE));
    }

    #[test]
    fn fetch_drops_duplicate_ids_from_the_server() {
        let mut state = PostsState::default();
        reduce(
            &mut state,
            Action::FetchSucceeded(vec![post(1, "a"), post(1, "dup"), post(2, "b")]),
        );
        assert_eq!(ids(&state), [1, 2]);
        assert_eq!(state.items[0].title, "a");
    }

    #[test]
    fn page_fetch_sets_total_but_not_current_page() {
        let mut state = PostsState::default();
        reduce(&mut state, Action::SetPage(3));
        reduce(
            &mut state,
            Action::PageFetchSucceeded(PostPage {
                posts: vec![post(11, "k")],
                total: 47,
            }),
        );
        assert_eq!(state.pagination.total_items, 47);
        assert_eq!(state.pagination.current_page, 3);
        assert_eq!(ids(&state), [11]);
    }

    #[test]
    fn create_prepends_regardless_of_sort() {
        let mut state = PostsState::default();
        reduce(&mut state, Action::SetSortBy(SortField::Title));
        reduce(&mut state, Action::SetSortOrder(SortOrder::Asc));
        reduce(&mut state, Action::FetchSucceeded(vec![post(1, "a"), post(2, "b")]));

        reduce(&mut state, Action::PostCreated(post(101, "z")));
        assert_eq!(ids(&state), [101, 1, 2]);
    }

    #[test]
    fn create_with_existing_id_keeps_ids_unique() {
        let mut state = PostsState::default();
        reduce(&mut state, Action::FetchSucceeded(vec![post(1, "a"), post(101, "old")]));

        reduce(&mut state, Action::PostCreated(post(101, "new")));
        assert_eq!(ids(&state), [101, 1]);
        assert_eq!(state.items[0].title, "new");
        assert!(has_unique_ids(&state));
    }

    #[test]
    fn update_replaces_in_place_and_never_inserts() {
        let mut state = PostsState::default();
        reduce(
            &mut state,
            Action::FetchSucceeded(vec![post(1, "a"), post(2, "b"), post(3, "c")]),
        );

        reduce(&mut state, Action::PostUpdated(post(2, "X")));
        assert_eq!(ids(&state), [1, 2, 3]);
        assert_eq!(state.items[1].title, "X");

        reduce(&mut state, Action::PostUpdated(post(9, "ghost")));
        assert_eq!(ids(&state), [1, 2, 3]);
    }

    #[test]
    fn delete_removes_item_but_keeps_favorite() {
        let mut state = PostsState::default();
        reduce(&mut state, Action::FetchSucceeded(vec![post(1, "a"), post(2, "b")]));
        reduce(&mut state, Action::ToggleFavorite(2));

        reduce(&mut state, Action::PostDeleted(2));
        reduce(&mut state, Action::PostDeleted(42));
        assert_eq!(ids(&state), [1]);
        assert_eq!(state.favorites, [2]);
    }

    #[test]
    fn fetched_post_is_upserted() {
        let mut state = PostsState::default();
        reduce(&mut state, Action::FetchSucceeded(vec![post(1, "a"), post(2, "b")]));

        reduce(&mut state, Action::PostFetched(post(1, "fresh")));
        reduce(&mut state, Action::PostFetched(post(5, "e")));
        assert_eq!(ids(&state), [1, 2, 5]);
        assert_eq!(state.items[0].title, "fresh");
    }

    #[test]
    fn double_toggle_restores_favorites() {
        let mut state = PostsState::default();
        reduce(&mut state, Action::ToggleFavorite(1));
        let before = state.favorites.clone();

        reduce(&mut state, Action::ToggleFavorite(7));
        reduce(&mut state, Action::ToggleFavorite(7));
        assert_eq!(state.favorites, before);
    }

    #[test]
    fn items_per_page_resets_current_page() {
        let mut state = PostsState::default();
        for page in [1, 4, 9] {
            reduce(&mut state, Action::SetPage(page));
            reduce(&mut state, Action::SetItemsPerPage(25));
            assert_eq!(state.pagination.current_page, 1);
            assert_eq!(state.pagination.items_per_page, 25);
        }
    }

    #[test]
    fn page_never_drops_below_one() {
        let mut state = PostsState::default();
        reduce(&mut state, Action::SetPage(0));
        assert_eq!(state.pagination.current_page, 1);
        reduce(&mut state, Action::SetItemsPerPage(0));
        assert_eq!(state.pagination.items_per_page, 1);
    }

    #[test]
    fn filter_does_not_reset_page() {
        let mut state = PostsState::default();
        reduce(&mut state, Action::SetPage(4));
        reduce(&mut state, Action::SetFilter("qui".into()));
        assert_eq!(state.pagination.current_page, 4);
        assert_eq!(state.filter, "qui");
    }

    #[test]
    fn ids_stay_unique_across_mixed_sequences() {
        let mut state = PostsState::default();
        let sequence = [
            Action::FetchSucceeded(vec![post(1, "a"), post(2, "b"), post(2, "b2")]),
            Action::PostCreated(post(3, "c")),
            Action::PostCreated(post(1, "a again")),
            Action::PostUpdated(post(2, "B")),
            Action::PostFetched(post(3, "c again")),
            Action::PostCreated(post(3, "c third")),
            Action::FetchSucceeded(vec![post(4, "d"), post(4, "d")]),
            Action::PostCreated(post(4, "d new")),
        ];

        for action in sequence {
            reduce(&mut state, action);
            assert!(has_unique_ids(&state), "duplicate ids: {:?}", ids(&state));
        }
        assert_eq!(ids(&state), [4]);
    }

    #[test]
    fn reset_restores_defaults_with_page_size() {
        let mut state = PostsState::default();
        reduce(&mut state, Action::FetchSucceeded(vec![post(1, "a")]));
        reduce(&mut state, Action::ToggleFavorite(1));
        reduce(&mut state, Action::SetFilter("x".into()));

        reduce(&mut state, Action::Reset { items_per_page: 20 });
        assert_eq!(state, PostsState::with_items_per_page(20));
    }
}
