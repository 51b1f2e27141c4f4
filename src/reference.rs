//! Catalog reference classification
//!
//! A catalog reference is either a full share URL or a bare identifier.
//! Kind detection is a substring match on the whole reference text, not a
//! path-segment parse: a URL that happens to contain "album" or "playlist"
//! in an unrelated segment will be classified accordingly. This coarse
//! matching is intentional and callers relying on it are expected to pass
//! well-formed share URLs or bare IDs.

use crate::error::{Error, Result};
use crate::types::{CatalogId, ReferenceKind};

/// Classify a catalog reference into its kind and identifier
///
/// Kind detection checks for the literal token `"playlist"` first, then
/// `"album"`, and falls back to `Track`. The identifier is the last `/`
/// segment of the reference with any `?` query suffix stripped, or the raw
/// string if the reference is already bare.
///
/// Pure function; performs no network access.
///
/// # Errors
///
/// Returns [`Error::InvalidReference`] when the extracted identifier is
/// empty (for example a reference ending in `/`).
///
/// # Examples
///
/// ```
/// use spotify_dl::reference::classify;
/// use spotify_dl::ReferenceKind;
///
/// let (kind, id) = classify("https://open.spotify.com/playlist/ABC123?si=xyz")?;
/// assert_eq!(kind, ReferenceKind::Playlist);
/// assert_eq!(id.as_str(), "ABC123");
///
/// let (kind, id) = classify("XYZ789")?;
/// assert_eq!(kind, ReferenceKind::Track);
/// assert_eq!(id.as_str(), "XYZ789");
/// # Ok::<(), spotify_dl::Error>(())
/// ```
pub fn classify(reference: &str) -> Result<(ReferenceKind, CatalogId)> {
    let kind = if reference.contains("playlist") {
        ReferenceKind::Playlist
    } else if reference.contains("album") {
        ReferenceKind::Album
    } else {
        ReferenceKind::Track
    };

    let id = extract_id(reference);
    if id.is_empty() {
        return Err(Error::InvalidReference {
            reference: reference.to_string(),
        });
    }

    Ok((kind, CatalogId::from(id)))
}

/// Last path segment with any query suffix removed
fn extract_id(reference: &str) -> &str {
    let last_segment = reference.rsplit('/').next().unwrap_or(reference);
    last_segment.split('?').next().unwrap_or(last_segment)
}
