//! Text helpers for building event fields.

use std::borrow::Cow;

/// Appended to a string that was cut short by [`truncate`].
pub const TRUNCATION_MARKER: &str = "...";

/// Truncates a string to at most `max_len` characters.
///
/// Strings of `max_len` characters or fewer are returned unchanged. Longer
/// strings keep their first `max_len - 3` characters followed by `...`.
/// Lengths are counted in characters, not bytes.
///
/// When `max_len` is smaller than the marker itself, the result is the first
/// `max_len` characters of the marker, so the output never exceeds `max_len`.
pub fn truncate(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }

    let marker_len = TRUNCATION_MARKER.len();
    if max_len < marker_len {
        return Cow::Borrowed(&TRUNCATION_MARKER[..max_len]);
    }

    let kept: String = s.chars().take(max_len - marker_len).collect();
    Cow::Owned(format!("{kept}{TRUNCATION_MARKER}"))
}
