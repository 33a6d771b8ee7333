//! Gateway trait describing the remote `/posts` collection.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::posts::{Comment, NewPost, Post, PostId, PostPage, PostPatch};

/// Status reported for bodies that claim success but do not decode.
pub const PARSE_FAILURE_STATUS: u16 = 500;
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse response";
/// Used when a non-2xx response carries no reason phrase.
pub const GENERIC_STATUS_MESSAGE: &str = "Network response was not ok";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },
    #[error("Failed to parse response")]
    Parse,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GatewayError {
    pub fn status(status: u16, message: Option<&str>) -> Self {
        Self::Status {
            status,
            message: message.unwrap_or(GENERIC_STATUS_MESSAGE).to_string(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Text recorded in state when a fetch fails: the reason phrase for
    /// status failures, without the code.
    pub fn message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::Parse => PARSE_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP-like status code for this failure, when one applies.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Parse => Some(PARSE_FAILURE_STATUS),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            Self::Url(_) | Self::InvalidInput(_) => None,
        }
    }
}

/// Remote post collection. Every method is one round trip.
#[async_trait]
pub trait PostGateway: Send + Sync {
    /// `GET /posts`
    async fn list(&self) -> Result<Vec<Post>, GatewayError>;

    /// `GET /posts/{id}`
    async fn get(&self, id: PostId) -> Result<Post, GatewayError>;

    /// `GET /posts?_start={start}&_limit={limit}`; total from `x-total-count`.
    async fn list_page(&self, start: u64, limit: u32) -> Result<PostPage, GatewayError>;

    /// `POST /posts`
    async fn create(&self, post: &NewPost) -> Result<Post, GatewayError>;

    /// `PUT /posts/{id}`
    async fn update(&self, id: PostId, patch: &PostPatch) -> Result<Post, GatewayError>;

    /// `DELETE /posts/{id}`
    async fn delete(&self, id: PostId) -> Result<(), GatewayError>;

    /// `GET /posts/{id}/comments`
    async fn comments(&self, id: PostId) -> Result<Vec<Comment>, GatewayError>;

    /// `GET /posts?q={query}`
    async fn search(&self, query: &str) -> Result<Vec<Post>, GatewayError>;
}
