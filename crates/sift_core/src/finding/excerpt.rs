/// Maximum number of characters of matched text kept in a description.
pub const EXCERPT_MAX_CHARS: usize = 20;

/// Marker appended when an excerpt was shortened.
pub const ELLIPSIS: &str = "...";

/// Shortens `matched` to [`EXCERPT_MAX_CHARS`] characters, appending
/// [`ELLIPSIS`] if anything was cut.
///
/// Counts Unicode scalar values, so the cut never splits a character.
#[must_use]
pub fn excerpt(matched: &str) -> String {
    match matched.char_indices().nth(EXCERPT_MAX_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &matched[..cut]),
        None => matched.to_string(),
    }
}
