//! Soft-matching normalization.
//!
//! The same function is applied when an index is built and when a query is
//! made, so it must stay a pure function of its input.

/// Normalize a name for soft matching.
///
/// Lower-cases, drops apostrophes, treats every other non-alphanumeric
/// character as a separator, and collapses separator runs to one space.
///
/// # Examples
///
/// ```
/// use birdnames::matching::normalize::normalize;
///
/// assert_eq!(normalize("  AMERICAN  Robin "), "american robin");
/// assert_eq!(normalize("Black-capped_Chickadee"), "black capped chickadee");
/// assert_eq!(normalize("Cooper's Hawk"), "coopers hawk");
/// ```
#[must_use]
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;

    for c in s.chars() {
        if is_apostrophe(c) {
            continue;
        }
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(c.to_lowercase());
        } else {
            pending_space = true;
        }
    }

    out
}

#[inline]
fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '\u{2018}' | '`')
}
