//! Wire types for the `/posts` resource.
//!
//! Field names follow the JSON served by jsonplaceholder-style APIs
//! (`userId`, `postId`), renamed to snake case on the Rust side.

use serde::{Deserialize, Serialize};

/// Gateway-assigned post identifier.
pub type PostId = u64;

/// A post as returned by the gateway.
///
/// `title` and `body` default to empty strings because partial `PUT`
/// responses only echo the fields that were sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(
        rename = "userId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<u64>,
}

/// Payload for `POST /posts`; the gateway assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    #[serde(
        rename = "userId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<u64>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            user_id: None,
        }
    }
}

/// Partial payload for `PUT /posts/{id}`. Absent fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(
        rename = "userId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<u64>,
}

impl PostPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.user_id.is_none()
    }
}

/// A comment attached to a post (`GET /posts/{id}/comments`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(rename = "postId")]
    pub post_id: PostId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub body: String,
}
