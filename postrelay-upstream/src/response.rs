use crate::client::{Result, UpstreamError};
use bytes::Bytes;
use reqwest::{StatusCode, header::HeaderValue};
use serde::de::DeserializeOwned;

/// Status, content type and body of an upstream reply, exactly as received.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl UpstreamResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: Option<HeaderValue>) -> Self {
        self.content_type = content_type;
        self
    }

    /// Whether the upstream answered with exactly `200 OK`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(UpstreamError::Decode)
    }

    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }
}
