//! Handlers returning `HttpResponse` / `ErrorPayload` directly.
//!
//! Run with `cargo run --example axum_handler --features axum`.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http_result::{
    error_set, http_bail, kinds, respond, ErrorPayload, HttpResult, ResultExt, Responses,
    SuccessKind,
};
use serde::{Deserialize, Serialize};

error_set! {
    /// Ways the search indexer can fail.
    pub enum IndexError { BadRequest, InternalServer }
}

#[derive(Debug, Deserialize)]
struct CreatePost {
    title: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct Post {
    id: u64,
    title: String,
}

async fn create_index(body: &str) -> HttpResult<u64, IndexError> {
    if body.len() < 20 {
        http_bail!(BadRequest, "Article too short");
    }
    Ok(body.len() as u64)
}

async fn create_post(Json(input): Json<CreatePost>) -> Response {
    let result = create_index(&input.body)
        .await
        .rekind::<_, http_result::ErrorKind>(kinds::InternalServer, "Index creation failed")
        .map(|id| Post {
            id,
            title: input.title,
        });

    respond(result, SuccessKind::Created).into_response()
}

async fn get_post(id: u64) -> Result<Json<Post>, ErrorPayload> {
    if id != 1 {
        return Err(http_result::http_err!(NotFound, "post {id} does not exist"));
    }
    Ok(Json(Post {
        id,
        title: "Hello".into(),
    }))
}

async fn delete_post() -> Response {
    Responses::not_implemented("Deleting posts is not supported yet").into_response()
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let short = CreatePost {
        title: "Hi".into(),
        body: "tiny".into(),
    };
    let long = CreatePost {
        title: "Hi".into(),
        body: "an article body long enough to index".into(),
    };

    println!("POST short  -> {}", create_post(Json(short)).await.status());
    println!("POST long   -> {}", create_post(Json(long)).await.status());
    println!("GET 1       -> {}", get_post(1).await.into_response().status());
    println!("GET 2       -> {}", get_post(2).await.into_response().status());
    println!("DELETE      -> {}", delete_post().await.status());
}
