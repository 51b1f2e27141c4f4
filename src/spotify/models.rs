//! Wire formats of the metadata service
//!
//! These structs mirror only the fields the resolver reads; everything else
//! in the service payloads is ignored. Domain types in [`crate::types`] stay
//! decoupled from these shapes via `From` conversions.

use serde::Deserialize;

use crate::types::TrackDescriptor;

/// Artist object embedded in track payloads
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ArtistObject {
    /// Artist display name
    pub name: String,
}

/// Track object, as returned by `/tracks/{id}`, album item pages, and
/// nested inside playlist items
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TrackObject {
    /// Track title
    pub name: String,
    /// Credited artists in display order
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
}

impl From<TrackObject> for TrackDescriptor {
    fn from(track: TrackObject) -> Self {
        TrackDescriptor {
            title: track.name,
            artists: track.artists.into_iter().map(|artist| artist.name).collect(),
        }
    }
}

/// Container detail, as returned by `/albums/{id}` and `/playlists/{id}`
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ContainerObject {
    /// Album or playlist display title
    pub name: String,
}

/// One page of collection items
///
/// `next` is the service's next-page indicator: null/absent when this is the
/// last page. The resolver only checks its presence and computes offsets on
/// its own, so the URL value itself is never followed.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Page<T> {
    /// Items in this page, in service order
    pub items: Vec<T>,
    /// Next-page indicator; None terminates pagination
    #[serde(default)]
    pub next: Option<String>,
}

/// Playlist page item wrapping a nullable nested track
///
/// Playlists can reference removed or unavailable tracks; those arrive with
/// a null `track` and are skipped during normalization.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct PlaylistItem {
    /// The wrapped track object, absent for unavailable entries
    #[serde(default)]
    pub track: Option<TrackObject>,
}
