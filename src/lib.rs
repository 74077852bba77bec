//! # HTTP Result
//!
//! Typed error results for HTTP services, built on a closed status taxonomy.
//!
//! ## Design
//!
//! 1. **Kinds are closed.** Two success kinds and six error kinds, each bound
//!    to one status code at compile time. There is no "unknown" kind: an
//!    unexpected upstream failure is re-kinded as `InternalServer`.
//! 2. **Errors carry a trail.** An [`ErrorPayload`] holds an append-only list
//!    of messages. Re-classifying an error under a new kind appends to the
//!    trail instead of replacing it, so the root cause survives.
//! 3. **Results are plain `Result`.** [`HttpResult`] is
//!    `Result<T, ErrorPayload<K>>`; exactly one arm is populated and callers
//!    handle both.
//! 4. **Failure surfaces are typed.** `K` names the kinds an operation can
//!    produce. Constructing a kind outside `K` does not compile.
//! 5. **Responses are derived.** The adapter turns any result into a status
//!    plus body, using only taxonomy statuses.
//!
//! ## Taxonomy
//!
//! | Kind             | Status |
//! |------------------|--------|
//! | `Ok`             | 200    |
//! | `Created`        | 201    |
//! | `BadRequest`     | 400    |
//! | `Unauthorized`   | 401    |
//! | `Forbidden`      | 403    |
//! | `NotFound`       | 404    |
//! | `InternalServer` | 500    |
//! | `NotImplemented` | 501    |
//!
//! ## Quick Start
//!
//! ```rust
//! use http_result::{error_set, kinds, respond, HttpErrors, HttpResult, ResultExt, SuccessKind};
//!
//! error_set! {
//!     /// Ways indexing an article can fail.
//!     pub enum IndexError { BadRequest, InternalServer }
//! }
//!
//! fn index(article: &str) -> HttpResult<u64, IndexError> {
//!     if article.len() < 20 {
//!         return Err(HttpErrors::bad_request("Article too short", None));
//!     }
//!     Ok(42)
//! }
//!
//! fn create_post(article: &str) -> HttpResult<u64> {
//!     index(article).rekind(kinds::InternalServer, "Index creation failed")
//! }
//!
//! let response = respond(create_post("tiny"), SuccessKind::Created);
//! assert_eq!(response.status.as_u16(), 500);
//! assert_eq!(
//!     serde_json::to_value(&response.body).unwrap(),
//!     serde_json::json!({
//!         "message": "Index creation failed",
//!         "messages": ["Article too short", "Index creation failed"]
//!     })
//! );
//! ```
//!
//! ## Logging
//!
//! ```rust
//! use http_result::{ErrorKind, ErrorPayload};
//!
//! let err = ErrorPayload::new(ErrorKind::Forbidden, "not the author");
//! err.with_internal_log(|log| {
//!     // Forward to your logger of choice
//!     assert_eq!(log.code(), 403);
//! });
//! ```
//!
//! ## Features
//!
//! - `axum`: `IntoResponse` for [`HttpResponse`] and [`ErrorPayload`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod taxonomy;
pub mod payload;
pub mod result;
pub mod factory;
pub mod response;
pub mod logging;
pub mod convenience;

pub use factory::*;
pub use logging::*;
pub use payload::*;
pub use response::*;
pub use result::*;
pub use taxonomy::*;
