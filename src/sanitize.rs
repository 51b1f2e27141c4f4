//! Filesystem-safe name handling
//!
//! Display names coming back from the metadata service routinely contain
//! characters that are reserved in file and directory names. This module
//! strips them so names can be used as path segments directly.

/// Characters removed from display names when building paths.
/// Covers the reserved set shared by Windows and Unix filesystems.
const FORBIDDEN_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Strip filesystem-unsafe characters from a display name
///
/// Deletes every occurrence of `\ / * ? : " < > |` and leaves all other
/// characters (unicode, spaces, punctuation) untouched. The mapping is
/// idempotent but not injective: distinct names can collapse to the same
/// path segment, in which case the last writer wins.
///
/// # Examples
///
/// ```
/// use spotify_dl::sanitize::normalize;
///
/// assert_eq!(normalize("AC/DC - Back in Black"), "ACDC - Back in Black");
/// assert_eq!(normalize("What?"), "What");
/// assert_eq!(normalize("Plain Name"), "Plain Name");
/// ```
#[must_use]
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .collect()
}
