//! Shared fixtures for the relay integration tests.
//!
//! Every test gets its own fake upstream with isolated state, bound to an ephemeral port.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use postrelay_api::server;
use postrelay_common::model::{comment::Comment, post::Post};
use postrelay_upstream::client::UpstreamClient;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

pub const FIRST_POST_TITLE: &str =
    "sunt aut facere repellat provident occaecati excepturi optio reprehenderit";
pub const FIRST_COMMENT_NAME: &str = "id labore ex et quam laborum";

/// In-process stand-in for the upstream REST service.
#[derive(Debug, Default)]
pub struct FakeUpstream {
    posts: Mutex<BTreeMap<i64, Post>>,
    comments: Vec<Comment>,
}

impl FakeUpstream {
    /// 100 posts and a handful of comments on posts 1 and 2.
    pub fn seeded() -> Arc<Self> {
        let posts = (1_i64..=100)
            .map(|id| {
                let title = if id == 1 {
                    FIRST_POST_TITLE.to_owned()
                } else {
                    format!("post number {id}")
                };
                let post = Post {
                    user_id: Some(((id - 1) / 10 + 1).into()),
                    id: Some(id.into()),
                    title,
                    body: format!("body of post {id}"),
                };
                (id, post)
            })
            .collect();

        let comments = [
            (1_i64, 1_i64, FIRST_COMMENT_NAME),
            (1, 2, "quo vero reiciendis velit similique earum"),
            (1, 3, "odio adipisci rerum aut animi"),
            (2, 6, "et fugit eligendi deleniti quidem qui sint nihil autem"),
        ]
        .into_iter()
        .map(|(post_id, id, name)| Comment {
            post_id: Some(post_id.into()),
            id: Some(id.into()),
            name: name.to_owned(),
            email: format!("commenter{id}@example.com"),
            body: format!("comment {id}"),
        })
        .collect();

        Arc::new(Self {
            posts: Mutex::new(posts),
            comments,
        })
    }

    pub fn post(&self, id: i64) -> Option<Post> {
        self.posts.lock().unwrap().get(&id).cloned()
    }

    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/posts", get(list_posts).post(create_post))
            .route(
                "/posts/{id}",
                get(get_post).put(update_post).delete(delete_post),
            )
            .route("/comments", get(list_comments))
            .with_state(self)
    }
}

type Upstream = State<Arc<FakeUpstream>>;

async fn list_posts(State(upstream): Upstream) -> Json<Vec<Post>> {
    Json(upstream.posts.lock().unwrap().values().cloned().collect())
}

async fn get_post(State(upstream): Upstream, Path(id): Path<i64>) -> impl IntoResponse {
    match upstream.post(id) {
        Some(post) => Json(post).into_response(),
        None => (StatusCode::NOT_FOUND, "{}").into_response(),
    }
}

async fn create_post(State(upstream): Upstream, Json(mut post): Json<Post>) -> impl IntoResponse {
    let mut posts = upstream.posts.lock().unwrap();
    let id = posts.keys().next_back().copied().unwrap_or(0) + 1;
    post.id = Some(id.into());
    posts.insert(id, post.clone());

    (StatusCode::CREATED, Json(post))
}

async fn update_post(
    State(upstream): Upstream,
    Path(id): Path<i64>,
    Json(mut post): Json<Post>,
) -> impl IntoResponse {
    let mut posts = upstream.posts.lock().unwrap();
    match posts.get_mut(&id) {
        Some(stored) => {
            post.id = Some(id.into());
            *stored = post.clone();
            Json(post).into_response()
        }
        None => (StatusCode::NOT_FOUND, "{}").into_response(),
    }
}

async fn delete_post(State(upstream): Upstream, Path(id): Path<i64>) -> impl IntoResponse {
    match upstream.posts.lock().unwrap().remove(&id) {
        Some(_) => (StatusCode::OK, "{}"),
        None => (StatusCode::NOT_FOUND, "{}"),
    }
}

async fn list_comments(State(upstream): Upstream) -> Json<Vec<Comment>> {
    Json(upstream.comments.clone())
}

/// Serves `app` on an ephemeral local port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Starts the relay in front of the given upstream base URL and returns the relay's base URL.
pub async fn start_relay(upstream: Url) -> String {
    let addr = serve(server::app(UpstreamClient::new(upstream))).await;
    format!("http://{addr}")
}

/// Starts a seeded fake upstream plus a relay in front of it.
pub async fn start() -> (String, Arc<FakeUpstream>) {
    let upstream = FakeUpstream::seeded();
    let upstream_addr = serve(upstream.clone().router()).await;
    let relay = start_relay(upstream_url(upstream_addr)).await;

    (relay, upstream)
}

/// An address nothing listens on.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn upstream_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}")).unwrap()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
