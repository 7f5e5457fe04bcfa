use crate::server::{
    InvalidPostId, Result, ServerError, ServerRouter,
    json::{Json, RawJson},
    relay::Relayed,
};
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use postrelay_common::model::{
    Id,
    post::{Post, PostMarker},
};
use postrelay_upstream::client::UpstreamClient;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(get_post)
        .typed_get(get_posts)
        .typed_post(create_post)
        .typed_put(update_post)
        .typed_delete(delete_post)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}", rejection(InvalidPostId))]
struct GetPostPath {
    id: Id<PostMarker>,
}

async fn get_post(
    GetPostPath { id }: GetPostPath,
    State(upstream): State<Arc<UpstreamClient>>,
) -> Result<RawJson> {
    let response = upstream.fetch_post(id).await?;

    if !response.is_ok() {
        return Err(ServerError::PostFetchFailed(response.status));
    }

    Ok(RawJson(response.into_body()))
}

#[derive(TypedPath)]
#[typed_path("/posts")]
struct GetPostsPath;

async fn get_posts(
    GetPostsPath: GetPostsPath,
    State(upstream): State<Arc<UpstreamClient>>,
) -> Result<Json<Vec<Post>>> {
    let response = upstream.fetch_all_posts().await?;

    if !response.is_ok() {
        return Err(ServerError::PostsFetchFailed(response.status));
    }

    Ok(Json(response.json()?))
}

#[derive(TypedPath)]
#[typed_path("/post")]
struct CreatePostPath;

async fn create_post(
    CreatePostPath: CreatePostPath,
    State(upstream): State<Arc<UpstreamClient>>,
    Json(post): Json<Post>,
) -> Result<Relayed> {
    let response = upstream.create_post(&post).await?;

    Ok(Relayed(response))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/post/{id}", rejection(InvalidPostId))]
struct PostByIdPath {
    id: Id<PostMarker>,
}

async fn update_post(
    PostByIdPath { id }: PostByIdPath,
    State(upstream): State<Arc<UpstreamClient>>,
    Json(post): Json<Post>,
) -> Result<Json<Post>> {
    let response = upstream.update_post(id, &post).await?;

    // Any refusal from upstream is reported as a missing post.
    if !response.is_ok() {
        return Err(ServerError::PostByIdNotFound(id));
    }

    Ok(Json(response.json()?))
}

async fn delete_post(
    PostByIdPath { id }: PostByIdPath,
    State(upstream): State<Arc<UpstreamClient>>,
) -> Result<(StatusCode, &'static str)> {
    let response = upstream.delete_post(id).await?;

    if !response.is_ok() {
        return Err(ServerError::PostDeleteFailed(response.status));
    }

    Ok((response.status, "Post deleted successfully"))
}
