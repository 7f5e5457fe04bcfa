use axum::{
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use postrelay_upstream::response::UpstreamResponse;

/// Replies with the upstream status, content type and body unchanged.
#[derive(Clone, Debug)]
pub struct Relayed(pub UpstreamResponse);

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        let UpstreamResponse {
            status,
            content_type,
            body,
        } = self.0;

        let mut response = (status, body).into_response();
        match content_type {
            Some(content_type) => response.headers_mut().insert(CONTENT_TYPE, content_type),
            None => response.headers_mut().remove(CONTENT_TYPE),
        };

        response
    }
}
