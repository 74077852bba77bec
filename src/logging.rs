//! Structured log view of an error payload.
//!
//! [`TrailLog`] borrows from the payload that created it and cannot outlive
//! it. Formatting writes straight into any `fmt::Write` sink, so logging an
//! error costs no allocation unless a field has to be truncated.
//!
//! Output is bounded: each message is cut at 1024 bytes and at most 32 trail
//! entries are rendered. The payload itself keeps everything.

use crate::payload::Message;
use crate::taxonomy::ErrorKind;
use std::borrow::Cow;
use std::fmt;

/// Maximum length for any individual field in formatted output
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Maximum number of trail entries rendered by `write_to`
const MAX_TRAIL_ENTRIES: usize = 32;

/// Truncation indicator appended to truncated strings
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Borrowed log entry for one error payload.
///
/// # Example
///
/// ```rust
/// # use http_result::{ErrorKind, ErrorPayload};
/// let base = ErrorPayload::new(ErrorKind::BadRequest, "Article too short");
/// let err = ErrorPayload::chained(ErrorKind::InternalServer, "Index creation failed", &base);
///
/// let mut line = String::new();
/// err.internal_log().write_to(&mut line).unwrap();
/// assert_eq!(
///     line,
///     "[500 InternalServer] message='Index creation failed' \
///      trail=['Article too short' -> 'Index creation failed']"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TrailLog<'a> {
    kind: ErrorKind,
    messages: &'a [Message],
}

impl<'a> TrailLog<'a> {
    pub(crate) const fn new(kind: ErrorKind, messages: &'a [Message]) -> Self {
        Self { kind, messages }
    }

    /// Write the log line to a formatter without allocating.
    ///
    /// Format: `[{code} {kind}] message='{last}' trail=['{first}' -> ... -> '{last}']`.
    /// Trails longer than the render limit end with `(+N more)`.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{} {}] message='{}' trail=[",
            self.kind.code(),
            self.kind,
            truncate_with_indicator(self.message())
        )?;

        for (i, message) in self.messages.iter().take(MAX_TRAIL_ENTRIES).enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "'{}'", truncate_with_indicator(message))?;
        }

        let hidden = self.messages.len().saturating_sub(MAX_TRAIL_ENTRIES);
        if hidden > 0 {
            write!(f, " (+{hidden} more)")?;
        }

        f.write_str("]")
    }

    // Fields are not truncated here; that is left to the log sink.

    /// Kind of the logged payload.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Numeric status of the logged payload.
    #[inline]
    pub const fn code(&self) -> u16 {
        self.kind.code()
    }

    /// Outermost message.
    #[inline]
    pub fn message(&self) -> &'a str {
        self.messages.last().map_or("", |m| m.as_ref())
    }

    /// Trail entries, oldest first.
    pub fn trail(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.messages.iter().map(|m| m.as_ref())
    }

    /// Full trail length, including entries `write_to` would hide.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.messages.len()
    }
}

impl fmt::Display for TrailLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Truncate a field so a single oversized message cannot flood the log.
///
/// Returns a Cow<str> to avoid allocation when no truncation is needed.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    // Last UTF-8 boundary at or before the limit
    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(s.get(..idx).unwrap_or_default());
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
