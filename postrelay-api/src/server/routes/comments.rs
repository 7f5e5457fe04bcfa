use crate::server::{InvalidUserId, Result, ServerError, ServerRouter, json::Json};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use postrelay_common::model::{Id, comment::Comment, post::PostMarker};
use postrelay_upstream::client::UpstreamClient;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(get_comments)
}

/// The segment is named after users, but it is matched against each comment's `postId`.
#[derive(TypedPath, Deserialize)]
#[typed_path("/comments/{user_id}", rejection(InvalidUserId))]
struct GetCommentsPath {
    user_id: Id<PostMarker>,
}

async fn get_comments(
    GetCommentsPath { user_id }: GetCommentsPath,
    State(upstream): State<Arc<UpstreamClient>>,
) -> Result<Json<Vec<Comment>>> {
    let response = upstream.fetch_comments().await?;

    if !response.is_ok() {
        return Err(ServerError::CommentsNotFound(user_id));
    }

    let comments: Vec<Comment> = response
        .json::<Vec<Comment>>()?
        .into_iter()
        .filter(|comment| comment.belongs_to(user_id))
        .collect();

    if comments.is_empty() {
        return Err(ServerError::CommentsNotFound(user_id));
    }

    Ok(Json(comments))
}
