//! Convenience macros for building errors and declaring kind sets.
//!
//! # Usage
//!
//! ```rust
//! use http_result::{error_set, http_bail, http_ensure, http_err, ErrorPayload, HttpResult};
//!
//! error_set! {
//!     /// Failures of `create_post`.
//!     pub enum CreatePostError { BadRequest, InternalServer }
//! }
//!
//! fn create_post(body: &str) -> HttpResult<u64, CreatePostError> {
//!     http_ensure!(body.len() >= 10, BadRequest, "Article too short ({} chars)", body.len());
//!     if body.contains("<script") {
//!         http_bail!(BadRequest, "Markup is not allowed");
//!     }
//!     Ok(1)
//! }
//!
//! let e = create_post("short").unwrap_err();
//! assert_eq!(e.message(), "Article too short (5 chars)");
//!
//! let outer: ErrorPayload = http_err!(InternalServer, cause = &e, "Index creation failed");
//! assert_eq!(outer.messages(), ["Article too short (5 chars)", "Index creation failed"]);
//! ```
//!
//! The kind is always a bare kind name. Naming a kind outside the target set
//! is a compile error:
//!
//! ```rust,compile_fail
//! use http_result::{error_set, http_err, ErrorPayload};
//!
//! error_set! { pub enum CreatePostError { BadRequest, InternalServer } }
//!
//! let e: ErrorPayload<CreatePostError> = http_err!(NotFound, "no such post");
//! ```

// ============================================================================
// Error Creation Macros
// ============================================================================

/// Build an [`ErrorPayload`](crate::ErrorPayload) from a kind name and a
/// format string.
///
/// # Forms
/// - `http_err!(Kind, "literal {inline}")`
/// - `http_err!(Kind, "fmt {}", args..)`
/// - `http_err!(Kind, cause = &base, "fmt {}", args..)` chains onto `base`
///
/// The target kind set is inferred and must contain `Kind`.
#[macro_export]
macro_rules! http_err {
    ($kind:ident, cause = $base:expr, $fmt:literal $($arg:tt)*) => {
        $crate::ErrorPayload::of_chained(
            $crate::kinds::$kind,
            ::std::format!($fmt $($arg)*),
            $base,
        )
    };
    ($kind:ident, $fmt:literal $($arg:tt)*) => {
        $crate::ErrorPayload::of($crate::kinds::$kind, ::std::format!($fmt $($arg)*))
    };
}

/// Return early with an error built by [`http_err!`].
#[macro_export]
macro_rules! http_bail {
    ($($tokens:tt)+) => {
        return ::core::result::Result::Err($crate::http_err!($($tokens)+))
    };
}

/// Return early with an error built by [`http_err!`] unless `cond` holds.
#[macro_export]
macro_rules! http_ensure {
    ($cond:expr, $($tokens:tt)+) => {
        if !$cond {
            $crate::http_bail!($($tokens)+);
        }
    };
}

// ============================================================================
// Kind Sets
// ============================================================================

/// Declare a closed subset of the error taxonomy.
///
/// Generates a `Copy` enum with one variant per listed kind and implements
/// [`KindSet`](crate::KindSet), `From<Set> for ErrorKind` and
/// `From<kinds::Kind> for Set` for the listed kinds only.
///
/// ```rust
/// use http_result::{error_set, ErrorKind, KindSet};
///
/// error_set! {
///     pub enum LookupError { NotFound, Forbidden }
/// }
///
/// assert_eq!(LookupError::MEMBERS, [LookupError::NotFound, LookupError::Forbidden]);
/// assert_eq!(LookupError::narrow(ErrorKind::Forbidden), Some(LookupError::Forbidden));
/// assert_eq!(LookupError::narrow(ErrorKind::BadRequest), None);
/// assert_eq!(LookupError::NotFound.code(), 404);
/// ```
#[macro_export]
macro_rules! error_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $set:ident {
            $( $(#[$variant_meta:meta])* $kind:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $set {
            $( $(#[$variant_meta])* $kind, )+
        }

        impl ::core::convert::From<$set> for $crate::ErrorKind {
            #[inline]
            fn from(kind: $set) -> Self {
                match kind {
                    $( $set::$kind => $crate::ErrorKind::$kind, )+
                }
            }
        }

        $(
            impl ::core::convert::From<$crate::kinds::$kind> for $set {
                #[inline]
                fn from(_: $crate::kinds::$kind) -> Self {
                    $set::$kind
                }
            }
        )+

        impl $crate::KindSet for $set {
            const MEMBERS: &'static [Self] = &[$( $set::$kind ),+];

            fn narrow(kind: $crate::ErrorKind) -> ::core::option::Option<Self> {
                match kind {
                    $( $crate::ErrorKind::$kind => ::core::option::Option::Some($set::$kind), )+
                    #[allow(unreachable_patterns)]
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::core::fmt::Display for $set {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::ErrorKind::from(*self).name())
            }
        }
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::{ErrorKind, ErrorPayload, HttpResult, KindSet};

    crate::error_set! {
        enum PublishError {
            /// Draft failed validation.
            BadRequest,
            Forbidden,
            InternalServer,
        }
    }

    fn publish(draft: &str, owner: bool) -> HttpResult<usize, PublishError> {
        crate::http_ensure!(owner, Forbidden, "only the author can publish");
        crate::http_ensure!(!draft.is_empty(), BadRequest, "draft is empty");
        if draft.len() > 20 {
            crate::http_bail!(BadRequest, "draft is {} chars, limit is {}", draft.len(), 20);
        }
        Ok(draft.len())
    }

    #[test]
    fn literal_and_format_forms() {
        let id = 7;
        let a: ErrorPayload = crate::http_err!(NotFound, "post {id} missing");
        let b: ErrorPayload = crate::http_err!(NotFound, "post {} missing", id);
        let c: ErrorPayload = crate::http_err!(NotFound, "post {} missing", id,);

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.code(), 404);
    }

    #[test]
    fn cause_form_chains() {
        let base: ErrorPayload<PublishError> = crate::http_err!(BadRequest, "Article too short");
        let outer: ErrorPayload<PublishError> =
            crate::http_err!(InternalServer, cause = &base, "attempt {}", 2);

        assert_eq!(outer.messages(), ["Article too short", "attempt 2"]);
        assert_eq!(outer.kind(), PublishError::InternalServer);
    }

    #[test]
    fn ensure_and_bail() {
        assert_eq!(publish("hello", true).unwrap(), 5);
        assert_eq!(publish("hello", false).unwrap_err().kind(), PublishError::Forbidden);
        assert_eq!(publish("", true).unwrap_err().message(), "draft is empty");
        assert_eq!(
            publish("a draft that is far too long", true).unwrap_err().message(),
            "draft is 28 chars, limit is 20"
        );
    }

    #[test]
    fn error_set_conversions() {
        assert_eq!(ErrorKind::from(PublishError::Forbidden), ErrorKind::Forbidden);
        assert_eq!(PublishError::narrow(ErrorKind::NotFound), None);
        assert_eq!(PublishError::MEMBERS.len(), 3);
        assert_eq!(PublishError::InternalServer.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(PublishError::BadRequest.to_string(), "BadRequest");
    }

    #[test]
    fn full_set_declaration_compiles() {
        crate::error_set! {
            enum Everything { BadRequest, Unauthorized, Forbidden, NotFound, InternalServer, NotImplemented }
        }
        assert_eq!(Everything::MEMBERS.len(), ErrorKind::ALL.len());
        assert_eq!(Everything::narrow(ErrorKind::NotImplemented), Some(Everything::NotImplemented));
    }
}
