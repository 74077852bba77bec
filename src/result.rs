//! Two-armed result type and helpers.
//!
//! `HttpResult` is plain [`Result`], so exactly one arm is ever populated and
//! callers destructure it with `match`, `?` or the usual combinators. The
//! canonical error constructor is `Err(payload)`; [`err`] is shorthand for
//! `Err(ErrorPayload::new(kind, message))`.

use crate::payload::{ErrorPayload, Message};
use crate::taxonomy::{ErrorKind, KindMarker, KindSet};

/// Result of an operation that fails with an [`ErrorPayload`] of kind set `K`.
pub type HttpResult<T, K = ErrorKind> = Result<T, ErrorPayload<K>>;

/// Wrap a success value.
#[inline]
pub fn ok<T, K: KindSet>(value: T) -> HttpResult<T, K> {
    Ok(value)
}

/// Build an error arm holding a single-message payload.
#[inline]
pub fn err<T, K: KindSet>(kind: K, message: impl Into<Message>) -> HttpResult<T, K> {
    Err(ErrorPayload::new(kind, message))
}

/// Extension helpers for [`HttpResult`].
pub trait ResultExt<T, K: KindSet> {
    /// Re-classify the error arm under `marker`'s kind, appending `message`
    /// to its trail. The success arm passes through.
    ///
    /// ```rust
    /// use http_result::{err, kinds, ErrorKind, HttpResult, ResultExt};
    ///
    /// let indexed: HttpResult<u64> = err(ErrorKind::BadRequest, "Article too short");
    /// let created: HttpResult<u64> = indexed.rekind(kinds::InternalServer, "Index creation failed");
    ///
    /// let e = created.unwrap_err();
    /// assert_eq!(e.code(), 500);
    /// assert_eq!(e.messages(), ["Article too short", "Index creation failed"]);
    /// ```
    fn rekind<M, K2>(self, marker: M, message: impl Into<Message>) -> HttpResult<T, K2>
    where
        M: KindMarker,
        K2: KindSet + From<M>;

    /// Like [`ResultExt::rekind`], building the message only on the error arm.
    fn rekind_with<M, K2, F>(self, marker: M, message: F) -> HttpResult<T, K2>
    where
        M: KindMarker,
        K2: KindSet + From<M>,
        F: FnOnce(&ErrorPayload<K>) -> String;

    /// Widen the error arm to the full taxonomy.
    fn widen_err(self) -> HttpResult<T, ErrorKind>;

    /// Kind of the error arm, if any.
    fn error_kind(&self) -> Option<K>;

    /// Pair view: `(Some(value), None)` or `(None, Some(error))`.
    ///
    /// Serializes as `[value, null]` / `[null, payload]`.
    fn into_pair(self) -> (Option<T>, Option<ErrorPayload<K>>);
}

impl<T, K: KindSet> ResultExt<T, K> for HttpResult<T, K> {
    fn rekind<M, K2>(self, marker: M, message: impl Into<Message>) -> HttpResult<T, K2>
    where
        M: KindMarker,
        K2: KindSet + From<M>,
    {
        self.map_err(|base| ErrorPayload::of_chained(marker, message, &base))
    }

    fn rekind_with<M, K2, F>(self, marker: M, message: F) -> HttpResult<T, K2>
    where
        M: KindMarker,
        K2: KindSet + From<M>,
        F: FnOnce(&ErrorPayload<K>) -> String,
    {
        self.map_err(|base| {
            let message = message(&base);
            ErrorPayload::of_chained(marker, message, &base)
        })
    }

    #[inline]
    fn widen_err(self) -> HttpResult<T, ErrorKind> {
        self.map_err(ErrorPayload::widen)
    }

    #[inline]
    fn error_kind(&self) -> Option<K> {
        self.as_ref().err().map(ErrorPayload::kind)
    }

    #[inline]
    fn into_pair(self) -> (Option<T>, Option<ErrorPayload<K>>) {
        match self {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        }
    }
}
