//! Error payload - a kind plus an append-only trail of messages.
//!
//! The trail records how an error travelled: the first entry is the root
//! cause, every later entry was added by a caller that chained onto it, and the
//! last entry is the outermost, most user-facing description. Chaining never
//! modifies the base payload; it copies the trail and appends.
//!
//! The status is never stored. It is derived from the kind on every access, so
//! a payload cannot disagree with the taxonomy.

use crate::logging::TrailLog;
use crate::taxonomy::{ErrorKind, KindMarker, KindSet};
use http::StatusCode;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// One trail entry. Static messages are stored without allocating.
pub type Message = Cow<'static, str>;

/// Inline capacity covers a root cause plus one wrapping layer.
type Trail = SmallVec<[Message; 2]>;

// ============================================================================
// Message Trails
// ============================================================================

/// Anything that exposes a message trail a new error can chain onto.
///
/// Object safe, so factories can take `Option<&dyn MessageTrail>` and accept
/// payloads of any kind set as the base.
pub trait MessageTrail {
    /// The trail, oldest message first.
    fn messages(&self) -> &[Message];
}

impl MessageTrail for [Message] {
    fn messages(&self) -> &[Message] {
        self
    }
}

impl MessageTrail for Vec<Message> {
    fn messages(&self) -> &[Message] {
        self
    }
}

// ============================================================================
// Payload Violations
// ============================================================================

/// Reasons a payload cannot be built from untrusted parts.
///
/// Raised when decoding a serialized payload or when narrowing a payload into
/// a kind set that does not contain its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadViolation {
    /// The status is a known error status but belongs to another kind.
    StatusMismatch {
        /// Kind named in the payload.
        kind: ErrorKind,
        /// Status carried alongside it.
        status: u16,
    },
    /// The status is not bound to any error kind.
    UnknownStatus {
        /// The offending status.
        status: u16,
    },
    /// The message trail is empty.
    EmptyTrail,
    /// The kind is not a member of the requested kind set.
    KindOutOfSet {
        /// Kind that could not be narrowed.
        kind: ErrorKind,
    },
}

impl fmt::Display for PayloadViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusMismatch { kind, status } => write!(
                f,
                "status {} does not match kind {} (expected {})",
                status,
                kind,
                kind.code()
            ),
            Self::UnknownStatus { status } => {
                write!(f, "status {status} is not bound to any error kind")
            }
            Self::EmptyTrail => f.write_str("error payload has no messages"),
            Self::KindOutOfSet { kind } => {
                write!(f, "kind {kind} is not a member of the target kind set")
            }
        }
    }
}

impl std::error::Error for PayloadViolation {}

// ============================================================================
// Error Payload
// ============================================================================

/// An error with a fixed kind and a non-empty message trail.
///
/// `K` is the set of kinds the payload may carry. It defaults to the full
/// [`ErrorKind`] taxonomy; operations with a narrower failure surface use a
/// set declared with `error_set!`.
///
/// # Example
///
/// ```rust
/// use http_result::{ErrorKind, ErrorPayload};
///
/// let root = ErrorPayload::new(ErrorKind::BadRequest, "Article too short");
/// let outer = ErrorPayload::chained(ErrorKind::InternalServer, "Index creation failed", &root);
///
/// assert_eq!(outer.code(), 500);
/// assert_eq!(outer.message(), "Index creation failed");
/// assert_eq!(outer.root_message(), "Article too short");
/// assert_eq!(root.depth(), 1);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[must_use = "error payloads should be returned, converted or logged"]
pub struct ErrorPayload<K: KindSet = ErrorKind> {
    kind: K,
    messages: Trail,
}

impl<K: KindSet> ErrorPayload<K> {
    /// Create a payload whose trail holds exactly `message`.
    pub fn new(kind: K, message: impl Into<Message>) -> Self {
        let mut messages = Trail::new();
        messages.push(message.into());
        Self { kind, messages }
    }

    /// Create a payload whose trail is `base`'s trail followed by `message`.
    ///
    /// `base` is left untouched and may be of any kind set.
    pub fn chained(
        kind: K,
        message: impl Into<Message>,
        base: &(impl MessageTrail + ?Sized),
    ) -> Self {
        let base = base.messages();
        let mut messages = Trail::with_capacity(base.len() + 1);
        messages.extend(base.iter().cloned());
        messages.push(message.into());
        Self { kind, messages }
    }

    /// [`Self::chained`] when a base is given, [`Self::new`] otherwise.
    pub fn with_base(
        kind: K,
        message: impl Into<Message>,
        base: Option<&dyn MessageTrail>,
    ) -> Self {
        match base {
            Some(base) => Self::chained(kind, message, base),
            None => Self::new(kind, message),
        }
    }

    /// Create a payload from a type-level marker.
    ///
    /// Fails to compile when `K` does not contain the marker's kind.
    #[inline]
    pub fn of<M>(marker: M, message: impl Into<Message>) -> Self
    where
        M: KindMarker,
        K: From<M>,
    {
        Self::new(K::from(marker), message)
    }

    /// Chain onto `base` using a type-level marker.
    #[inline]
    pub fn of_chained<M>(
        marker: M,
        message: impl Into<Message>,
        base: &(impl MessageTrail + ?Sized),
    ) -> Self
    where
        M: KindMarker,
        K: From<M>,
    {
        Self::chained(K::from(marker), message, base)
    }

    /// Rebuild a payload from its wire parts, checking every invariant.
    ///
    /// `status` must be the status of `kind`, the trail must be non-empty and
    /// `kind` must be a member of `K`.
    pub fn checked_new<I>(status: u16, kind: ErrorKind, messages: I) -> Result<Self, PayloadViolation>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        if kind.code() != status {
            return Err(match ErrorKind::from_code(status) {
                Some(_) => PayloadViolation::StatusMismatch { kind, status },
                None => PayloadViolation::UnknownStatus { status },
            });
        }

        let messages: Trail = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            return Err(PayloadViolation::EmptyTrail);
        }

        let kind = K::narrow(kind).ok_or(PayloadViolation::KindOutOfSet { kind })?;
        Ok(Self { kind, messages })
    }

    // ===== Accessors =====

    /// The kind, as a member of `K`.
    #[inline]
    pub fn kind(&self) -> K {
        self.kind
    }

    /// Status bound to the kind.
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// Numeric status bound to the kind.
    #[inline]
    pub fn code(&self) -> u16 {
        self.kind.code()
    }

    /// The whole trail, oldest first. Never empty.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The outermost (most recent) message.
    #[inline]
    pub fn message(&self) -> &str {
        self.messages.last().map_or("", |m| m.as_ref())
    }

    /// The innermost (original) message.
    #[inline]
    pub fn root_message(&self) -> &str {
        self.messages.first().map_or("", |m| m.as_ref())
    }

    /// Number of messages in the trail.
    #[inline]
    pub fn depth(&self) -> usize {
        self.messages.len()
    }

    /// Consume the payload and take its trail.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages.into_vec()
    }

    // ===== Kind Set Conversions =====

    /// Forget the kind set and carry the full [`ErrorKind`].
    #[inline]
    pub fn widen(self) -> ErrorPayload<ErrorKind> {
        ErrorPayload {
            kind: self.kind.into(),
            messages: self.messages,
        }
    }

    /// Move into another kind set, if it contains this payload's kind.
    pub fn narrow<K2: KindSet>(self) -> Result<ErrorPayload<K2>, PayloadViolation> {
        let kind = self.kind.kind();
        match K2::narrow(kind) {
            Some(kind) => Ok(ErrorPayload {
                kind,
                messages: self.messages,
            }),
            None => Err(PayloadViolation::KindOutOfSet { kind }),
        }
    }

    // ===== Logging =====

    /// Borrowed structured view of this payload for logging.
    ///
    /// The view cannot outlive the payload.
    #[inline]
    pub fn internal_log(&self) -> TrailLog<'_> {
        TrailLog::new(self.kind.kind(), &self.messages)
    }

    /// Run `f` with the log view and return its result.
    ///
    /// ```rust
    /// use http_result::{ErrorKind, ErrorPayload};
    ///
    /// let err = ErrorPayload::new(ErrorKind::NotFound, "post 7 missing");
    /// let line = err.with_internal_log(|log| log.to_string());
    /// assert_eq!(line, "[404 NotFound] message='post 7 missing' trail=['post 7 missing']");
    /// ```
    pub fn with_internal_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TrailLog<'_>) -> R,
    {
        f(&self.internal_log())
    }
}

impl<K: KindSet> MessageTrail for ErrorPayload<K> {
    #[inline]
    fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl<K: KindSet> fmt::Debug for ErrorPayload<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorPayload")
            .field("status", &self.code())
            .field("kind", &self.kind)
            .field("messages", &self.messages.as_slice())
            .finish()
    }
}

impl<K: KindSet> fmt::Display for ErrorPayload<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.code(), self.kind.kind(), self.message())
    }
}

impl<K: KindSet> std::error::Error for ErrorPayload<K> {}

// ============================================================================
// Wire Format
// ============================================================================

impl<K: KindSet> Serialize for ErrorPayload<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ErrorPayload", 3)?;
        state.serialize_field("status", &self.code())?;
        state.serialize_field("kind", &self.kind.kind())?;
        state.serialize_field("messages", self.messages())?;
        state.end()
    }
}

#[derive(Deserialize)]
struct WirePayload {
    status: u16,
    kind: ErrorKind,
    messages: Vec<String>,
}

impl<'de, K: KindSet> Deserialize<'de> for ErrorPayload<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WirePayload::deserialize(deserializer)?;
        Self::checked_new(wire.status, wire.kind, wire.messages).map_err(de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds;

    crate::error_set! {
        enum LookupError { NotFound, Forbidden }
    }

    #[test]
    fn new_holds_single_message() {
        let err = ErrorPayload::new(ErrorKind::BadRequest, "Article too short");

        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.messages(), ["Article too short"]);
        assert_eq!(err.depth(), 1);
    }

    #[test]
    fn chaining_appends_and_leaves_base_alone() {
        let base = ErrorPayload::new(ErrorKind::BadRequest, "Article too short");
        let outer = ErrorPayload::chained(ErrorKind::InternalServer, "Index creation failed", &base);

        assert_eq!(outer.code(), 500);
        assert_eq!(outer.messages(), ["Article too short", "Index creation failed"]);
        assert_eq!(base.messages(), ["Article too short"]);
        assert_eq!(base.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn chaining_spills_past_inline_capacity() {
        let mut err = ErrorPayload::new(ErrorKind::NotFound, "m0");
        for i in 1..6 {
            err = ErrorPayload::chained(ErrorKind::NotFound, format!("m{i}"), &err);
        }

        assert_eq!(err.depth(), 6);
        assert_eq!(err.root_message(), "m0");
        assert_eq!(err.message(), "m5");
    }

    #[test]
    fn with_base_dispatches() {
        let base = ErrorPayload::new(ErrorKind::Forbidden, "no");
        let chained = ErrorPayload::with_base(ErrorKind::NotFound, "gone", Some(&base));
        let fresh = ErrorPayload::with_base(ErrorKind::NotFound, "gone", None);

        assert_eq!(chained.depth(), 2);
        assert_eq!(fresh.depth(), 1);
    }

    #[test]
    fn empty_message_is_kept() {
        let err = ErrorPayload::new(ErrorKind::NotImplemented, "");
        assert_eq!(err.messages(), [""]);
        assert_eq!(err.message(), "");
    }

    #[test]
    fn markers_construct_into_sets() {
        let err: ErrorPayload<LookupError> = ErrorPayload::of(kinds::NotFound, "post 7");
        assert_eq!(err.kind(), LookupError::NotFound);
        assert_eq!(err.code(), 404);

        let full: ErrorPayload = ErrorPayload::of(kinds::NotImplemented, "later");
        assert_eq!(full.kind(), ErrorKind::NotImplemented);
    }

    #[test]
    fn chaining_across_kind_sets() {
        let lookup: ErrorPayload<LookupError> = ErrorPayload::of(kinds::Forbidden, "private post");
        let outer: ErrorPayload = ErrorPayload::of_chained(kinds::InternalServer, "render failed", &lookup);

        assert_eq!(outer.messages(), ["private post", "render failed"]);
    }

    #[test]
    fn widen_and_narrow() {
        let err: ErrorPayload<LookupError> = ErrorPayload::of(kinds::Forbidden, "nope");
        let wide = err.clone().widen();
        assert_eq!(wide.kind(), ErrorKind::Forbidden);

        let back: ErrorPayload<LookupError> = wide.narrow().unwrap();
        assert_eq!(back, err);

        let other = ErrorPayload::new(ErrorKind::BadRequest, "bad");
        assert_eq!(
            other.narrow::<LookupError>().unwrap_err(),
            PayloadViolation::KindOutOfSet {
                kind: ErrorKind::BadRequest
            }
        );
    }

    #[test]
    fn serializes_with_derived_status() {
        let err = ErrorPayload::new(ErrorKind::BadRequest, "Article too short");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": 400,
                "kind": "BadRequest",
                "messages": ["Article too short"],
            })
        );
    }

    #[test]
    fn deserialize_checks_invariants() {
        let ok: ErrorPayload = serde_json::from_str(
            r#"{"status":500,"kind":"InternalServer","messages":["a","b"]}"#,
        )
        .unwrap();
        assert_eq!(ok.messages(), ["a", "b"]);

        let mismatch = serde_json::from_str::<ErrorPayload>(
            r#"{"status":404,"kind":"BadRequest","messages":["a"]}"#,
        );
        assert!(mismatch.unwrap_err().to_string().contains("does not match"));

        let empty = serde_json::from_str::<ErrorPayload>(
            r#"{"status":400,"kind":"BadRequest","messages":[]}"#,
        );
        assert!(empty.unwrap_err().to_string().contains("no messages"));

        let out_of_set = serde_json::from_str::<ErrorPayload<LookupError>>(
            r#"{"status":400,"kind":"BadRequest","messages":["a"]}"#,
        );
        assert!(out_of_set.is_err());
    }

    #[test]
    fn checked_new_classifies_status() {
        assert_eq!(
            ErrorPayload::<ErrorKind>::checked_new(418, ErrorKind::BadRequest, ["x"]).unwrap_err(),
            PayloadViolation::UnknownStatus { status: 418 }
        );
        assert_eq!(
            ErrorPayload::<ErrorKind>::checked_new(401, ErrorKind::Forbidden, ["x"]).unwrap_err(),
            PayloadViolation::StatusMismatch {
                kind: ErrorKind::Forbidden,
                status: 401
            }
        );
    }

    #[test]
    fn display_uses_outermost_message() {
        let base = ErrorPayload::new(ErrorKind::NotFound, "row missing");
        let err = ErrorPayload::chained(ErrorKind::InternalServer, "lookup failed", &base);

        assert_eq!(err.to_string(), "500 InternalServer: lookup failed");
    }

    #[test]
    fn debug_shows_wire_fields() {
        let err = ErrorPayload::new(ErrorKind::Unauthorized, "token expired");
        let debug = format!("{err:?}");

        assert!(debug.contains("status: 401"));
        assert!(debug.contains("Unauthorized"));
        assert!(debug.contains("token expired"));
    }
}
