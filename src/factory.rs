//! Per-kind error factories.
//!
//! Two dispatch paths share one constructor:
//!
//! - **Static**: `HttpErrors::not_found(..)` / `HttpErrorResults::not_found(..)`,
//!   generated for every error kind from the kind table. The kind is fixed by
//!   the function name, and the target kind set must contain it.
//! - **Dynamic**: [`ErrorFactory`], a `Copy` value holding one kind, for code
//!   that picks the kind at runtime.
//!
//! Every factory takes an optional base payload. Without one the new payload
//! holds a single message; with one it chains onto the base's trail.
//!
//! ```rust
//! use http_result::{ErrorPayload, HttpErrors};
//!
//! let root: ErrorPayload = HttpErrors::bad_request("Article too short", None);
//! let outer: ErrorPayload = HttpErrors::internal_server("Index creation failed", Some(&root));
//!
//! assert_eq!(outer.code(), 500);
//! assert_eq!(outer.depth(), 2);
//! ```

use crate::payload::{ErrorPayload, Message, MessageTrail};
use crate::result::HttpResult;
use crate::taxonomy::{kinds, with_error_kinds, ErrorKind, KindMarker, KindSet};

/// Shared constructor behind both dispatch paths.
#[inline]
fn build<K>(kind: K, message: impl Into<Message>, base: Option<&dyn MessageTrail>) -> ErrorPayload<K>
where
    K: KindSet,
{
    ErrorPayload::with_base(kind, message, base)
}

#[inline]
fn build_marked<M, K>(marker: M, message: impl Into<Message>, base: Option<&dyn MessageTrail>) -> ErrorPayload<K>
where
    M: KindMarker,
    K: KindSet + From<M>,
{
    build(K::from(marker), message, base)
}

// ============================================================================
// Generated Tables
// ============================================================================

macro_rules! define_error_factories {
    ($( $(#[$meta:meta])* $name:ident => ($code:literal, $status:ident, $snake:ident) ),+ $(,)?) => {
        /// Payload factories, one per error kind.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct HttpErrors;

        impl HttpErrors {
            $(
                #[doc = concat!(
                    "Build a `", stringify!($name), "` (", stringify!($code),
                    ") payload, chaining onto `base` when given."
                )]
                #[inline]
                pub fn $snake<K>(message: impl Into<Message>, base: Option<&dyn MessageTrail>) -> ErrorPayload<K>
                where
                    K: KindSet + From<kinds::$name>,
                {
                    build_marked(kinds::$name, message, base)
                }
            )+
        }

        /// Error-arm result factories, one per error kind.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct HttpErrorResults;

        impl HttpErrorResults {
            $(
                #[doc = concat!(
                    "Build an error arm holding a `", stringify!($name), "` (",
                    stringify!($code), ") payload."
                )]
                #[inline]
                pub fn $snake<T, K>(message: impl Into<Message>, base: Option<&dyn MessageTrail>) -> HttpResult<T, K>
                where
                    K: KindSet + From<kinds::$name>,
                {
                    Err(HttpErrors::$snake(message, base))
                }
            )+
        }
    };
}

with_error_kinds!(define_error_factories);

// ============================================================================
// Runtime Dispatch
// ============================================================================

/// A factory bound to one kind chosen at runtime.
///
/// ```rust
/// use http_result::ErrorKind;
///
/// let factory = ErrorKind::NotFound.factory();
/// let err = factory.error("post 7 missing", None);
/// assert_eq!(err.code(), 404);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorFactory<K: KindSet = ErrorKind> {
    kind: K,
}

impl<K: KindSet> ErrorFactory<K> {
    /// Factory for `kind`.
    #[inline]
    pub const fn new(kind: K) -> Self {
        Self { kind }
    }

    /// One factory per member of `K`, in declaration order.
    pub fn members() -> impl Iterator<Item = Self> {
        K::MEMBERS.iter().copied().map(Self::new)
    }

    /// The kind this factory produces.
    #[inline]
    pub fn kind(&self) -> K {
        self.kind
    }

    /// Build a payload, chaining onto `base` when given.
    #[inline]
    pub fn error(&self, message: impl Into<Message>, base: Option<&dyn MessageTrail>) -> ErrorPayload<K> {
        build(self.kind, message, base)
    }

    /// Build an error arm.
    #[inline]
    pub fn result<T>(&self, message: impl Into<Message>, base: Option<&dyn MessageTrail>) -> HttpResult<T, K> {
        Err(self.error(message, base))
    }
}

impl ErrorFactory<ErrorKind> {
    /// One factory per error kind in the full taxonomy.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::members()
    }
}

impl ErrorKind {
    /// Runtime factory for this kind.
    #[inline]
    pub const fn factory(self) -> ErrorFactory {
        ErrorFactory::new(self)
    }
}
