use crate::response::UpstreamResponse;
use postrelay_common::model::{
    Id,
    post::{Post, PostMarker},
};
use reqwest::{Method, header::CONTENT_TYPE};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub type Result<T, E = UpstreamError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Request to upstream failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Upstream body had an unexpected shape: {0}")]
    Decode(serde_json::Error),
}

/// Gateway to the upstream REST service.
///
/// Every operation issues exactly one request and hands back the upstream status and body
/// untouched. Interpreting the status is up to the caller.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UpstreamClient {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    #[must_use]
    pub fn with_http_client(base_url: Url, http: reqwest::Client) -> Self {
        Self { http, base_url }
    }

    pub async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<UpstreamResponse> {
        self.send(Method::GET, &format!("posts/{post_id}"), None::<&()>)
            .await
    }

    pub async fn fetch_all_posts(&self) -> Result<UpstreamResponse> {
        self.send(Method::GET, "posts", None::<&()>).await
    }

    pub async fn fetch_comments(&self) -> Result<UpstreamResponse> {
        self.send(Method::GET, "comments", None::<&()>).await
    }

    pub async fn create_post(&self, post: &Post) -> Result<UpstreamResponse> {
        self.send(Method::POST, "posts", Some(post)).await
    }

    pub async fn update_post(&self, post_id: Id<PostMarker>, post: &Post) -> Result<UpstreamResponse> {
        self.send(Method::PUT, &format!("posts/{post_id}"), Some(post))
            .await
    }

    pub async fn delete_post(&self, post_id: Id<PostMarker>) -> Result<UpstreamResponse> {
        self.send(Method::DELETE, &format!("posts/{post_id}"), None::<&()>)
            .await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<UpstreamResponse> {
        let url = self.endpoint(path);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.inspect_err(|err| {
            debug!(%method, %url, error = %err, "Upstream request failed");
        })?;
        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        debug!(%method, %url, %status, "Upstream replied");

        Ok(UpstreamResponse::new(status, body).with_content_type(content_type))
    }
}
