//! Status taxonomy - the closed set of success and error kinds.
//!
//! Every kind is bound to exactly one HTTP status code, and the binding is
//! known at compile time. Nothing here can be registered or altered at runtime:
//! adding a kind means adding a row to one of the kind tables below.
//!
//! # Kind Tables
//!
//! The two tables (`with_success_kinds!`, `with_error_kinds!`) are the single
//! source of truth. Each generated artifact in the crate (kind enums, type-level
//! markers, payload factories, response builders) is expanded from them, so a
//! new row yields a working factory and responder with no other change.
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
//! # Type-Level Kinds
//!
//! Each error kind also exists as a zero-sized marker in [`kinds`]. Markers let
//! an operation name the kinds it can produce in its signature:
//!
//! ```rust
//! use http_result::{error_set, kinds, ErrorPayload, KindMarker};
//!
//! error_set! {
//!     /// Failures of the post-creation endpoint.
//!     pub enum CreatePostError { BadRequest, InternalServer }
//! }
//!
//! let err: ErrorPayload<CreatePostError> = ErrorPayload::of(kinds::BadRequest, "Article too short");
//! assert_eq!(err.code(), kinds::BadRequest::CODE);
//!
//! // Does not compile: NotFound is not a member of CreatePostError.
//! // let err: ErrorPayload<CreatePostError> = ErrorPayload::of(kinds::NotFound, "gone");
//! ```

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

// ============================================================================
// Kind Tables (Single Source of Truth)
// ============================================================================

/// Success kind table. Row format: `Name => (code, StatusCode const, snake_name)`.
macro_rules! with_success_kinds {
    ($callback:ident) => {
        $callback! {
            /// 200 - the request succeeded.
            Ok => (200, OK, ok),
            /// 201 - the request succeeded and created a resource.
            Created => (201, CREATED, created),
        }
    };
}
pub(crate) use with_success_kinds;

/// Error kind table. Row format: `Name => (code, StatusCode const, snake_name)`.
macro_rules! with_error_kinds {
    ($callback:ident) => {
        $callback! {
            /* 400 */
            /// 400 - the request was malformed or failed a precondition.
            BadRequest => (400, BAD_REQUEST, bad_request),
            /// 401 - the caller is not authenticated.
            Unauthorized => (401, UNAUTHORIZED, unauthorized),
            /// 403 - the caller is authenticated but not allowed.
            Forbidden => (403, FORBIDDEN, forbidden),
            /// 404 - the addressed resource does not exist.
            NotFound => (404, NOT_FOUND, not_found),

            /* 500 */
            /// 500 - an unexpected failure; the kind for unclassified upstream errors.
            InternalServer => (500, INTERNAL_SERVER_ERROR, internal_server),
            /// 501 - the operation exists in the contract but has no implementation.
            NotImplemented => (501, NOT_IMPLEMENTED, not_implemented),
        }
    };
}
pub(crate) use with_error_kinds;

// ============================================================================
// Success Kinds
// ============================================================================

macro_rules! define_success_kinds {
    ($( $(#[$meta:meta])* $name:ident => ($code:literal, $status:ident, $snake:ident) ),+ $(,)?) => {
        /// Symbolic success kinds, each bound to one 2xx status.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum SuccessKind {
            $( $(#[$meta])* $name, )+
        }

        impl SuccessKind {
            /// Every success kind, in declaration order.
            pub const ALL: &'static [Self] = &[$( Self::$name ),+];

            /// Numeric status code bound to this kind.
            #[inline]
            pub const fn code(self) -> u16 {
                match self {
                    $( Self::$name => $code, )+
                }
            }

            /// Status code bound to this kind.
            #[inline]
            pub const fn status(self) -> StatusCode {
                match self {
                    $( Self::$name => StatusCode::$status, )+
                }
            }

            /// Symbolic name, identical to the wire representation.
            #[inline]
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name), )+
                }
            }

            /// Look up a success kind by its numeric status code.
            #[inline]
            pub const fn from_code(code: u16) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$name), )+
                    _ => None,
                }
            }
        }
    };
}

with_success_kinds!(define_success_kinds);

impl SuccessKind {
    /// Look up a success kind by its symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for SuccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Error Kinds and Type-Level Markers
// ============================================================================

macro_rules! define_error_kinds {
    ($( $(#[$meta:meta])* $name:ident => ($code:literal, $status:ident, $snake:ident) ),+ $(,)?) => {
        /// Symbolic error kinds, each bound to one 4xx/5xx status.
        ///
        /// This is the full error taxonomy. Operations that can only fail in
        /// some of these ways declare a narrower [`KindSet`] with `error_set!`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum ErrorKind {
            $( $(#[$meta])* $name, )+
        }

        impl ErrorKind {
            /// Every error kind, in declaration order.
            pub const ALL: &'static [Self] = &[$( Self::$name ),+];

            /// Numeric status code bound to this kind.
            #[inline]
            pub const fn code(self) -> u16 {
                match self {
                    $( Self::$name => $code, )+
                }
            }

            /// Status code bound to this kind.
            #[inline]
            pub const fn status(self) -> StatusCode {
                match self {
                    $( Self::$name => StatusCode::$status, )+
                }
            }

            /// Symbolic name, identical to the wire representation.
            #[inline]
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name), )+
                }
            }

            /// Look up an error kind by its numeric status code.
            #[inline]
            pub const fn from_code(code: u16) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$name), )+
                    _ => None,
                }
            }
        }

        /// Zero-sized type-level markers, one per [`ErrorKind`].
        ///
        /// A marker names a kind in a signature. `From<Marker>` is implemented
        /// only for the kind sets that contain it, so constructing an error of a
        /// kind an operation did not declare is a type error.
        pub mod kinds {
            $(
                #[doc = concat!("Type-level marker for `ErrorKind::", stringify!($name), "` (", stringify!($code), ").")]
                #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
                pub struct $name;

                impl super::KindMarker for $name {
                    const KIND: super::ErrorKind = super::ErrorKind::$name;
                }

                impl From<$name> for super::ErrorKind {
                    #[inline]
                    fn from(_: $name) -> Self {
                        super::ErrorKind::$name
                    }
                }
            )+
        }
    };
}

with_error_kinds!(define_error_kinds);

impl ErrorKind {
    /// Look up an error kind by its symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// True for 4xx kinds (the caller's fault).
    #[inline]
    pub const fn is_client_error(self) -> bool {
        self.code() < 500
    }

    /// True for 5xx kinds (the server's fault).
    #[inline]
    pub const fn is_server_error(self) -> bool {
        self.code() >= 500
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A zero-sized type naming exactly one error kind.
///
/// Implemented by every type in [`kinds`]; the status is available as an
/// associated constant, so it can be used in const contexts.
pub trait KindMarker: Copy + Default + fmt::Debug + 'static {
    /// The kind this marker stands for.
    const KIND: ErrorKind;

    /// The status code bound to [`Self::KIND`].
    const CODE: u16 = Self::KIND.code();
}

// ============================================================================
// Kind Sets (Type-Level Narrowing)
// ============================================================================

/// A closed subset of the error taxonomy.
///
/// [`ErrorKind`] is the full set. Narrower sets are declared with the
/// `error_set!` macro and let a signature state which kinds an operation can
/// produce. At runtime every member still widens to a full [`ErrorKind`].
pub trait KindSet: Copy + Eq + Hash + fmt::Debug + Into<ErrorKind> + 'static {
    /// Members of the set, in declaration order.
    const MEMBERS: &'static [Self];

    /// Narrow a full kind into this set, if it is a member.
    fn narrow(kind: ErrorKind) -> Option<Self>;

    /// Widen into the full taxonomy.
    #[inline]
    fn kind(self) -> ErrorKind {
        self.into()
    }

    /// Numeric status code bound to this kind.
    #[inline]
    fn code(self) -> u16 {
        self.kind().code()
    }

    /// Status code bound to this kind.
    #[inline]
    fn status(self) -> StatusCode {
        self.kind().status()
    }
}

impl KindSet for ErrorKind {
    const MEMBERS: &'static [Self] = Self::ALL;

    #[inline]
    fn narrow(kind: ErrorKind) -> Option<Self> {
        Some(kind)
    }
}

// ============================================================================
// Combined Taxonomy
// ============================================================================

/// Any kind in the taxonomy, success or error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HttpKind {
    /// A 2xx kind.
    Success(SuccessKind),
    /// A 4xx/5xx kind.
    Error(ErrorKind),
}

impl HttpKind {
    /// Number of kinds in the combined taxonomy.
    pub const COUNT: usize = SuccessKind::ALL.len() + ErrorKind::ALL.len();

    /// Every kind: successes first, then errors, each in declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        SuccessKind::ALL
            .iter()
            .copied()
            .map(Self::Success)
            .chain(ErrorKind::ALL.iter().copied().map(Self::Error))
    }

    /// Numeric status code bound to this kind.
    #[inline]
    pub const fn code(self) -> u16 {
        match self {
            Self::Success(kind) => kind.code(),
            Self::Error(kind) => kind.code(),
        }
    }

    /// Status code bound to this kind.
    #[inline]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::Success(kind) => kind.status(),
            Self::Error(kind) => kind.status(),
        }
    }

    /// Symbolic name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Success(kind) => kind.name(),
            Self::Error(kind) => kind.name(),
        }
    }

    /// True for success kinds.
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Look up any kind by numeric status code.
    pub const fn from_code(code: u16) -> Option<Self> {
        if let Some(kind) = SuccessKind::from_code(code) {
            return Some(Self::Success(kind));
        }
        match ErrorKind::from_code(code) {
            Some(kind) => Some(Self::Error(kind)),
            None => None,
        }
    }

    /// Look up any kind by symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|kind| kind.name() == name)
    }
}

impl From<SuccessKind> for HttpKind {
    fn from(kind: SuccessKind) -> Self {
        Self::Success(kind)
    }
}

impl From<ErrorKind> for HttpKind {
    fn from(kind: ErrorKind) -> Self {
        Self::Error(kind)
    }
}

impl fmt::Display for HttpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Tests
// ============================================================================
