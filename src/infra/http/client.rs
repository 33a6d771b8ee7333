use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::application::gateway::{GatewayError, PostGateway};
use crate::config::ApiSettings;
use crate::domain::posts::{Comment, NewPost, Post, PostId, PostPage, PostPatch};

const TOTAL_COUNT_HEADER: &str = "x-total-count";
const POSTS_PATH: &str = "posts";

/// reqwest-backed [`PostGateway`] rooted at a base URL.
#[derive(Clone, Debug)]
pub struct HttpPostGateway {
    client: Client,
    base: Url,
}

impl HttpPostGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let base = with_trailing_slash(Url::parse(base_url)?);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, GatewayError> {
        Self::new(settings.base_url.as_str(), settings.timeout)
    }

    pub fn user_agent() -> &'static str {
        concat!("postboard/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, GatewayError> {
        self.base.join(path).map_err(GatewayError::Url)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<serde_json::Value>,
    ) -> Result<Response, GatewayError> {
        let mut url = self.url(path)?;
        if let Some(q) = query {
            url.set_query(None);
            let mut qp = url.query_pairs_mut();
            for (k, v) in q {
                qp.append_pair(k, v);
            }
        }

        debug!(method = %method, url = %url, "sending gateway request");

        let mut req = self.client.request(method.clone(), url.clone());
        if let Some(b) = body {
            req = req.json(&b);
        }

        let resp = req.send().await.map_err(|err| {
            warn!(method = %method, url = %url, error = %err, "gateway transport failure");
            GatewayError::Transport(err)
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                "gateway request failed"
            );
            return Err(GatewayError::status(
                status.as_u16(),
                status.canonical_reason(),
            ));
        }
        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, GatewayError> {
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            warn!(error = %err, "failed to decode gateway response");
            GatewayError::Parse
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&[(&str, String)]>,
    ) -> Result<T, GatewayError> {
        let resp = self.send(Method::GET, path, query, None).await?;
        Self::decode(resp).await
    }
}

#[async_trait]
impl PostGateway for HttpPostGateway {
    async fn list(&self) -> Result<Vec<Post>, GatewayError> {
        self.get_json(POSTS_PATH, None).await
    }

    async fn get(&self, id: PostId) -> Result<Post, GatewayError> {
        self.get_json(&post_path(id), None).await
    }

    async fn list_page(&self, start: u64, limit: u32) -> Result<PostPage, GatewayError> {
        let q = [("_start", start.to_string()), ("_limit", limit.to_string())];
        let resp = self.send(Method::GET, POSTS_PATH, Some(&q), None).await?;
        let total = total_count(resp.headers());
        let posts = Self::decode(resp).await?;
        Ok(PostPage { posts, total })
    }

    async fn create(&self, post: &NewPost) -> Result<Post, GatewayError> {
        let resp = self
            .send(Method::POST, POSTS_PATH, None, Some(to_body(post)?))
            .await?;
        Self::decode(resp).await
    }

    async fn update(&self, id: PostId, patch: &PostPatch) -> Result<Post, GatewayError> {
        let resp = self
            .send(Method::PUT, &post_path(id), None, Some(to_body(patch)?))
            .await?;
        Self::decode(resp).await
    }

    async fn delete(&self, id: PostId) -> Result<(), GatewayError> {
        // jsonplaceholder answers `{}`; the body carries nothing we need.
        self.send(Method::DELETE, &post_path(id), None, None)
            .await?;
        Ok(())
    }

    async fn comments(&self, id: PostId) -> Result<Vec<Comment>, GatewayError> {
        self.get_json(&format!("{POSTS_PATH}/{id}/comments"), None)
            .await
    }

    async fn search(&self, query: &str) -> Result<Vec<Post>, GatewayError> {
        let q = [("q", query.to_string())];
        self.get_json(POSTS_PATH, Some(&q)).await
    }
}

fn post_path(id: PostId) -> String {
    format!("{POSTS_PATH}/{id}")
}

fn to_body<T: Serialize>(value: &T) -> Result<serde_json::Value, GatewayError> {
    serde_json::to_value(value).map_err(|e| GatewayError::invalid_input(e.to_string()))
}

/// Absent or unparseable totals count as zero.
fn total_count(headers: &HeaderMap) -> u64 {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Relative joins only keep the last path segment of a base without a trailing slash.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
