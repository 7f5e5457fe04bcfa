use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use postrelay_common::model::{Id, post::PostMarker};
use postrelay_upstream::client::{UpstreamClient, UpstreamError};
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::error;

mod json;
mod relay;
mod routes;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, Debug, FromRef)]
pub struct ServerState {
    pub upstream: Arc<UpstreamClient>,
}

/// Builds the complete relay service on top of the given upstream gateway.
pub fn app(upstream: UpstreamClient) -> Router {
    let state = ServerState {
        upstream: Arc::new(upstream),
    };

    routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub fn routes() -> ServerRouter {
    routes::routes()
        .fallback(fallback)
        .method_not_allowed_fallback(fallback)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
#[error("Invalid post ID: {0}")]
pub struct InvalidPostId(#[from] PathRejection);

#[derive(Debug, Error)]
#[error("Invalid user ID: {0}")]
pub struct InvalidUserId(#[from] PathRejection);

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error(transparent)]
    InvalidPostId(#[from] InvalidPostId),
    #[error(transparent)]
    InvalidUserId(#[from] InvalidUserId),
    #[error("Incoming JSON rejected: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("JSON response could not be serialized: {0}")]
    JsonResponse(#[from] serde_json::Error),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("Failed to fetch post data: {0}")]
    PostFetchFailed(StatusCode),
    #[error("Failed to fetch posts, status: {0}")]
    PostsFetchFailed(StatusCode),
    #[error("Failed to delete post")]
    PostDeleteFailed(StatusCode),
    #[error("Post with id {0} was not found.")]
    PostByIdNotFound(Id<PostMarker>),
    #[error("No comments found for user ID {0}")]
    CommentsNotFound(Id<PostMarker>),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_)
            | ServerError::PostByIdNotFound(_)
            | ServerError::CommentsNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::InvalidPostId(_)
            | ServerError::InvalidUserId(_)
            | ServerError::JsonRejection(_) => StatusCode::BAD_REQUEST,
            ServerError::PostFetchFailed(status)
            | ServerError::PostsFetchFailed(status)
            | ServerError::PostDeleteFailed(status) => *status,
            ServerError::JsonResponse(_) | ServerError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text sent back to the client. Internal failures only get a generic message.
    fn reason(&self) -> String {
        match self {
            ServerError::JsonResponse(_) | ServerError::Upstream(_) => {
                "Internal server error".to_owned()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        (status, self.reason()).into_response()
    }
}

impl IntoResponse for InvalidPostId {
    fn into_response(self) -> Response {
        ServerError::from(self).into_response()
    }
}

impl IntoResponse for InvalidUserId {
    fn into_response(self) -> Response {
        ServerError::from(self).into_response()
    }
}
