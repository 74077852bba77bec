//! Response adapter: results and payloads to wire responses.
//!
//! The adapter is the only place a message trail is turned into a body. The
//! wire error body carries the outermost message alongside the full trail:
//!
//! ```json
//! { "message": "Index creation failed", "messages": ["Article too short", "Index creation failed"] }
//! ```
//!
//! Emitted statuses are exactly the taxonomy's codes. With the `axum` feature
//! enabled, [`HttpResponse`] and [`ErrorPayload`] implement `IntoResponse`.

use crate::payload::ErrorPayload;
use crate::result::HttpResult;
use crate::taxonomy::{
    with_error_kinds, with_success_kinds, ErrorKind, HttpKind, KindSet, SuccessKind,
};
use http::StatusCode;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

// ============================================================================
// Wire Types
// ============================================================================

/// A status plus a body, ready for any HTTP layer to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse<B> {
    /// Status bound to the kind the response was built from.
    pub status: StatusCode,
    /// Response body.
    pub body: B,
}

impl<B> HttpResponse<B> {
    /// Kind bound to the status.
    ///
    /// Always `Some` for responses built by this module.
    pub fn kind(&self) -> Option<HttpKind> {
        HttpKind::from_code(self.status.as_u16())
    }

    /// Transform the body, keeping the status.
    pub fn map_body<B2>(self, f: impl FnOnce(B) -> B2) -> HttpResponse<B2> {
        HttpResponse {
            status: self.status,
            body: f(self.body),
        }
    }
}

impl<B: Serialize> Serialize for HttpResponse<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("HttpResponse", 2)?;
        state.serialize_field("status", &self.status.as_u16())?;
        state.serialize_field("body", &self.body)?;
        state.end()
    }
}

/// Body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Outermost message of the trail.
    pub message: String,
    /// The full trail, oldest first.
    pub messages: Vec<String>,
}

impl ErrorBody {
    /// Body for a single-message error.
    pub fn single(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            messages: vec![message.clone()],
            message,
        }
    }
}

impl<K: KindSet> From<&ErrorPayload<K>> for ErrorBody {
    fn from(error: &ErrorPayload<K>) -> Self {
        Self {
            message: error.message().to_owned(),
            messages: error.messages().iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Body of a response adapted from a result: the value or an [`ErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody<T> {
    /// Success value, serialized as-is.
    Success(T),
    /// Error body.
    Error(ErrorBody),
}

// ============================================================================
// Adapters
// ============================================================================

/// Adapt an error payload.
pub fn error_response<K: KindSet>(error: &ErrorPayload<K>) -> HttpResponse<ErrorBody> {
    HttpResponse {
        status: error.status(),
        body: ErrorBody::from(error),
    }
}

/// Adapt a success value under `kind`.
#[inline]
pub fn success_response<T>(kind: SuccessKind, body: T) -> HttpResponse<T> {
    HttpResponse {
        status: kind.status(),
        body,
    }
}

/// Adapt a result, answering with `success` on the value arm.
///
/// ```rust
/// use http_result::{err, respond, HttpResult, ErrorKind, SuccessKind};
///
/// let failed: HttpResult<&str> = err(ErrorKind::BadRequest, "Article too short");
/// let response = respond(failed, SuccessKind::Created);
///
/// assert_eq!(response.status.as_u16(), 400);
/// assert_eq!(
///     serde_json::to_value(&response).unwrap(),
///     serde_json::json!({
///         "status": 400,
///         "body": { "message": "Article too short", "messages": ["Article too short"] }
///     })
/// );
/// ```
pub fn respond<T, K: KindSet>(result: HttpResult<T, K>, success: SuccessKind) -> HttpResponse<ResponseBody<T>> {
    match result {
        Ok(value) => success_response(success, ResponseBody::Success(value)),
        Err(error) => error_response(&error).map_body(ResponseBody::Error),
    }
}

impl<K: KindSet> From<&ErrorPayload<K>> for HttpResponse<ErrorBody> {
    fn from(error: &ErrorPayload<K>) -> Self {
        error_response(error)
    }
}

// ============================================================================
// Generated Responders
// ============================================================================

/// Response builders, one per kind.
///
/// Success responders take a body; error responders take a single message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Responses;

macro_rules! define_success_responders {
    ($( $(#[$meta:meta])* $name:ident => ($code:literal, $status:ident, $snake:ident) ),+ $(,)?) => {
        impl Responses {
            $(
                #[doc = concat!("`", stringify!($code), " ", stringify!($name), "` response carrying `body`.")]
                #[inline]
                pub fn $snake<T>(body: T) -> HttpResponse<T> {
                    success_response(SuccessKind::$name, body)
                }
            )+
        }
    };
}

macro_rules! define_error_responders {
    ($( $(#[$meta:meta])* $name:ident => ($code:literal, $status:ident, $snake:ident) ),+ $(,)?) => {
        impl Responses {
            $(
                #[doc = concat!("`", stringify!($code), " ", stringify!($name), "` response with a single-message body.")]
                #[inline]
                pub fn $snake(message: impl Into<String>) -> HttpResponse<ErrorBody> {
                    HttpResponse {
                        status: ErrorKind::$name.status(),
                        body: ErrorBody::single(message),
                    }
                }
            )+
        }
    };
}

with_success_kinds!(define_success_responders);
with_error_kinds!(define_error_responders);

// ============================================================================
// Axum Integration
// ============================================================================

#[cfg(feature = "axum")]
mod axum_impls {
    use super::{error_response, HttpResponse};
    use crate::payload::ErrorPayload;
    use crate::taxonomy::KindSet;
    use axum::Json;
    use axum::response::{IntoResponse, Response};
    use serde::Serialize;

    impl<B: Serialize> IntoResponse for HttpResponse<B> {
        fn into_response(self) -> Response {
            (self.status, Json(self.body)).into_response()
        }
    }

    impl<K: KindSet> IntoResponse for ErrorPayload<K> {
        fn into_response(self) -> Response {
            error_response(&self).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{err, ok, HttpErrors};
    use serde_json::json;

    #[test]
    fn error_adapter_uses_outermost_message() {
        let root: ErrorPayload = HttpErrors::bad_request("Article too short", None);
        let outer: ErrorPayload = HttpErrors::internal_server("Index creation failed", Some(&root));

        let response = error_response(&outer);
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": 500,
                "body": {
                    "message": "Index creation failed",
                    "messages": ["Article too short", "Index creation failed"],
                },
            })
        );
    }

    #[test]
    fn success_adapter_passes_body_through() {
        let response = respond(ok::<_, ErrorKind>(json!({ "id": 7 })), SuccessKind::Created);

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "status": 201, "body": { "id": 7 } })
        );
    }

    #[test]
    fn respond_error_arm() {
        let response = respond(err::<(), _>(ErrorKind::NotFound, "post 7"), SuccessKind::Ok);

        assert_eq!(response.status.as_u16(), 404);
        assert_eq!(response.body, ResponseBody::Error(ErrorBody::single("post 7")));
        assert_eq!(response.kind(), Some(HttpKind::Error(ErrorKind::NotFound)));
    }

    #[test]
    fn responders_match_taxonomy() {
        assert_eq!(Responses::ok("x").status, StatusCode::OK);
        assert_eq!(Responses::created("x").status, StatusCode::CREATED);

        let cases = [
            (Responses::bad_request("m"), ErrorKind::BadRequest),
            (Responses::unauthorized("m"), ErrorKind::Unauthorized),
            (Responses::forbidden("m"), ErrorKind::Forbidden),
            (Responses::not_found("m"), ErrorKind::NotFound),
            (Responses::internal_server("m"), ErrorKind::InternalServer),
            (Responses::not_implemented("m"), ErrorKind::NotImplemented),
        ];
        for (response, kind) in cases {
            assert_eq!(response.status, kind.status());
            assert_eq!(response.body, ErrorBody::single("m"));
        }
    }

    #[test]
    fn responder_matches_adapted_payload() {
        let payload = ErrorPayload::new(ErrorKind::Forbidden, "private");
        assert_eq!(HttpResponse::from(&payload), Responses::forbidden("private"));
    }

    #[test]
    fn error_body_round_trips_through_json() {
        let body = ErrorBody {
            message: "b".into(),
            messages: vec!["a".into(), "b".into()],
        };
        let decoded: ErrorBody = serde_json::from_value(serde_json::to_value(&body).unwrap()).unwrap();
        assert_eq!(decoded, body);
    }

    #[cfg(feature = "axum")]
    #[test]
    fn payload_into_response_sets_status() {
        use axum::response::IntoResponse;

        let response = ErrorPayload::new(ErrorKind::Unauthorized, "token expired").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
