//! Async callers: operations that resolve to an `HttpResult` later.
//!
//! The core is synchronous; these tests check that results produced behind
//! `.await` obey the same laws once resolved.

use http_result::{
    error_set, http_bail, http_ensure, kinds, respond, ErrorKind, ErrorPayload, HttpErrors,
    HttpResult, ResponseBody, ResultExt, SuccessKind,
};
use std::time::Duration;

error_set! {
    /// Failures of the search index.
    pub enum IndexError { BadRequest, InternalServer }
}

error_set! {
    /// Failures of post creation.
    pub enum CreatePostError { BadRequest, Unauthorized, InternalServer }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Post {
    id: u64,
    title: String,
}

async fn create_index(title: &str, body: &str) -> HttpResult<u64, IndexError> {
    tokio::time::sleep(Duration::from_millis(1)).await;
    http_ensure!(body.len() >= 20, BadRequest, "Article too short");
    if title.is_empty() {
        http_bail!(BadRequest, "Title is required");
    }
    Ok(title.len() as u64)
}

async fn create_post(token: Option<&str>, title: &str, body: &str) -> HttpResult<Post, CreatePostError> {
    let Some(_token) = token else {
        return Err(HttpErrors::unauthorized("Missing token", None));
    };

    let id = create_index(title, body)
        .await
        .rekind::<_, CreatePostError>(kinds::InternalServer, "Index creation failed")?;

    Ok(Post {
        id,
        title: title.to_owned(),
    })
}

#[tokio::test]
async fn resolved_success() {
    let post = create_post(Some("t"), "Hello", "a body that is long enough").await;
    assert_eq!(
        post.unwrap(),
        Post {
            id: 5,
            title: "Hello".into()
        }
    );
}

#[tokio::test]
async fn upstream_failure_is_rekinded_with_trail() {
    let failed = create_post(Some("t"), "Hello", "too short").await;
    let e = failed.unwrap_err();

    assert_eq!(e.kind(), CreatePostError::InternalServer);
    assert_eq!(e.code(), 500);
    assert_eq!(e.messages(), ["Article too short", "Index creation failed"]);
}

#[tokio::test]
async fn local_failure_keeps_single_message() {
    let e = create_post(None, "Hello", "irrelevant").await.unwrap_err();

    assert_eq!(e.kind(), CreatePostError::Unauthorized);
    assert_eq!(e.depth(), 1);
}

#[tokio::test]
async fn concurrent_callers_get_independent_results() {
    let bodies = ["short", "a body that is long enough", "", "another body long enough!"];
    let handles: Vec<_> = bodies
        .into_iter()
        .map(|body| tokio::spawn(async move { create_index("t", body).await.widen_err() }))
        .collect();

    let mut kinds_seen = Vec::new();
    for handle in handles {
        let result: HttpResult<u64> = handle.await.unwrap();
        kinds_seen.push(result.error_kind());
    }

    assert_eq!(
        kinds_seen,
        [Some(ErrorKind::BadRequest), None, Some(ErrorKind::BadRequest), None]
    );
}

#[tokio::test]
async fn async_result_adapts_like_sync() {
    let created = create_post(Some("t"), "Hi", "a body that is long enough").await;
    let response = respond(created.map(|p| p.id), SuccessKind::Created);
    assert_eq!(response.status.as_u16(), 201);
    assert_eq!(response.body, ResponseBody::Success(2));

    let failed = create_post(Some("t"), "Hi", "nope").await;
    let response = respond(failed, SuccessKind::Created);
    assert_eq!(response.status.as_u16(), 500);
    match response.body {
        ResponseBody::Error(body) => assert_eq!(body.message, "Index creation failed"),
        ResponseBody::Success(_) => panic!("expected error body"),
    }
}

#[tokio::test]
async fn narrowing_a_widened_async_error() {
    let wide = create_index("t", "short").await.widen_err().unwrap_err();
    let narrowed: ErrorPayload<IndexError> = wide.clone().narrow().unwrap();
    assert_eq!(narrowed.kind(), IndexError::BadRequest);

    let not_member = ErrorPayload::new(ErrorKind::NotFound, "gone");
    assert!(not_member.narrow::<IndexError>().is_err());
}
