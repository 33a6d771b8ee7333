//! View-parameter enumerations shared by the store and its callers.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::posts::Post;

/// Field the visible post list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    #[default]
    Id,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Id => "id",
        }
    }

    /// Natural ascending ordering of two posts on this field.
    pub fn compare(self, a: &Post, b: &Post) -> Ordering {
        match self {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Id => a.id.cmp(&b.id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}
