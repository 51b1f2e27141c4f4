//! Core types for spotify-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::AcquireError;

/// What a catalog reference points at
///
/// Determined once by classification and immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// A single playable track
    Track,
    /// An album of tracks
    Album,
    /// A user playlist of tracks
    Playlist,
}

/// Opaque catalog identifier extracted from a reference
///
/// Always non-empty and free of path (`/`) and query (`?`) separators;
/// classification is the only constructor path used by the pipeline and
/// strips both.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(pub String);

impl CatalogId {
    /// Create a new CatalogId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CatalogId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CatalogId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One playable unit as resolved from the metadata service
///
/// Artists keep the display order the service returned them in. Descriptors
/// carry no cross-run identity; two descriptors are the same track only by
/// position within a single resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    /// Track title
    pub title: String,
    /// Credited artists in display order (may be empty)
    pub artists: Vec<String>,
}

impl TrackDescriptor {
    /// Create a new descriptor
    pub fn new(title: impl Into<String>, artists: Vec<String>) -> Self {
        Self {
            title: title.into(),
            artists,
        }
    }

    /// Render the display/search string: `"artist1, artist2 - title"`
    ///
    /// With no credited artists this is just the title.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.artists.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.artists.join(", "), self.title)
        }
    }
}

/// A resolved container: its display name and the ordered track list
///
/// Built append-only during pagination and immutable once the resolver
/// returns. Track order is the service-returned order; the resolver never
/// re-sorts or deduplicates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionResult {
    /// Name of the album/playlist, or the single track's display name,
    /// stripped of filesystem-unsafe characters
    pub container_name: String,
    /// All resolved tracks in service order
    pub tracks: Vec<TrackDescriptor>,
}

/// A successfully acquired track in the batch report
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SucceededTrack {
    /// The track that was acquired
    pub track: TrackDescriptor,
    /// Final path written by the acquisition engine (extension included)
    pub path: PathBuf,
}

/// A failed track in the batch report
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedTrack {
    /// The track that could not be acquired
    pub track: TrackDescriptor,
    /// Why acquisition failed
    pub reason: AcquireError,
}

/// Aggregate outcome of one batch run
///
/// Contains exactly one entry per input track, split across the succeeded
/// and failed lists. Entry order is completion order, which matches input
/// order only under sequential dispatch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of tracks in the input collection
    pub total: usize,
    /// Tracks that were acquired, with their final paths
    pub succeeded: Vec<SucceededTrack>,
    /// Tracks that failed, with their failure reasons
    pub failed: Vec<FailedTrack>,
}

impl BatchReport {
    /// Create an empty report for a batch of `total` tracks
    pub fn new(total: usize) -> Self {
        Self {
            total,
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// True when every track in the batch was acquired
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty() && self.succeeded.len() == self.total
    }
}

/// Events emitted by the pipeline
///
/// Events are broadcast to all subscribers; consumers that only care about
/// progress lines can match the variants they need and ignore the rest.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A track was resolved from the metadata service
    TrackFound {
        /// Track display name ("artists - title")
        name: String,
    },

    /// Resolution finished; the full track list is known
    CollectionResolved {
        /// Container name (album/playlist title or single-track name)
        container_name: String,
        /// Number of tracks resolved
        total: usize,
    },

    /// Acquisition was dispatched for a track
    TrackStarted {
        /// 1-based position in the collection
        index: usize,
        /// Number of tracks in the collection
        total: usize,
        /// Track display name
        name: String,
    },

    /// A track was acquired and written to disk
    TrackCompleted {
        /// 1-based position in the collection
        index: usize,
        /// Track display name
        name: String,
        /// Final path written by the acquisition engine
        path: PathBuf,
    },

    /// A track could not be acquired
    TrackFailed {
        /// 1-based position in the collection
        index: usize,
        /// Track display name
        name: String,
        /// Why acquisition failed
        reason: AcquireError,
    },

    /// The batch finished; counts are final
    BatchCompleted {
        /// Number of tracks in the batch
        total: usize,
        /// Number of tracks acquired
        succeeded: usize,
        /// Number of tracks that failed
        failed: usize,
    },
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // CatalogId
    // -----------------------------------------------------------------------

    #[test]
    fn catalog_id_display_matches_inner_string() {
        let id = CatalogId::from("4uLU6hMCjMI75M1A2tKUQC");
        assert_eq!(id.to_string(), "4uLU6hMCjMI75M1A2tKUQC");
        assert_eq!(id.as_str(), "4uLU6hMCjMI75M1A2tKUQC");
    }

    #[test]
    fn catalog_id_serializes_transparently() {
        let id = CatalogId::new("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");
        let back: CatalogId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    // -----------------------------------------------------------------------
    // ReferenceKind serialization
    // -----------------------------------------------------------------------

    #[test]
    fn reference_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReferenceKind::Playlist).unwrap(),
            "\"playlist\""
        );
        assert_eq!(
            serde_json::to_string(&ReferenceKind::Album).unwrap(),
            "\"album\""
        );
        assert_eq!(
            serde_json::to_string(&ReferenceKind::Track).unwrap(),
            "\"track\""
        );
    }

    // -----------------------------------------------------------------------
    // TrackDescriptor display rendering
    // -----------------------------------------------------------------------

    #[test]
    fn display_name_joins_artists_with_comma_then_hyphen() {
        let track = TrackDescriptor::new("Song", vec!["A".to_string(), "B".to_string()]);
        assert_eq!(track.display_name(), "A, B - Song");
    }

    #[test]
    fn display_name_single_artist() {
        let track = TrackDescriptor::new("Bohemian Rhapsody", vec!["Queen".to_string()]);
        assert_eq!(track.display_name(), "Queen - Bohemian Rhapsody");
    }

    #[test]
    fn display_name_without_artists_is_just_the_title() {
        let track = TrackDescriptor::new("Interlude", vec![]);
        assert_eq!(track.display_name(), "Interlude");
    }

    #[test]
    fn display_name_preserves_artist_order() {
        let track = TrackDescriptor::new(
            "Collab",
            vec!["Zeta".to_string(), "Alpha".to_string(), "Mu".to_string()],
        );
        assert_eq!(track.display_name(), "Zeta, Alpha, Mu - Collab");
    }

    // -----------------------------------------------------------------------
    // BatchReport accounting
    // -----------------------------------------------------------------------

    #[test]
    fn new_report_is_empty() {
        let report = BatchReport::new(5);
        assert_eq!(report.total, 5);
        assert!(report.succeeded.is_empty());
        assert!(report.failed.is_empty());
        assert!(!report.is_complete_success());
    }

    #[test]
    fn report_with_all_tracks_succeeded_is_complete() {
        let mut report = BatchReport::new(2);
        for title in ["One", "Two"] {
            report.succeeded.push(SucceededTrack {
                track: TrackDescriptor::new(title, vec![]),
                path: PathBuf::from(format!("{title}.mp3")),
            });
        }
        assert!(report.is_complete_success());
    }

    #[test]
    fn report_with_a_failure_is_not_complete() {
        let mut report = BatchReport::new(1);
        report.failed.push(FailedTrack {
            track: TrackDescriptor::new("One", vec![]),
            reason: AcquireError::SourceNotFound {
                query: "One".to_string(),
            },
        });
        assert!(!report.is_complete_success());
    }

    // -----------------------------------------------------------------------
    // Event serialization format
    // -----------------------------------------------------------------------

    #[test]
    fn events_are_tagged_with_snake_case_type() {
        let event = Event::TrackStarted {
            index: 3,
            total: 10,
            name: "A - B".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "track_started");
        assert_eq!(json["index"], 3);
        assert_eq!(json["total"], 10);
        assert_eq!(json["name"], "A - B");
    }

    #[test]
    fn batch_completed_event_carries_final_counts() {
        let event = Event::BatchCompleted {
            total: 5,
            succeeded: 4,
            failed: 1,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "batch_completed");
        assert_eq!(json["succeeded"], 4);
        assert_eq!(json["failed"], 1);
    }

    #[test]
    fn track_failed_event_embeds_reason() {
        let event = Event::TrackFailed {
            index: 1,
            name: "X".to_string(),
            reason: AcquireError::Tool {
                message: "exit code 1".to_string(),
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "track_failed");
        assert_eq!(json["reason"]["kind"], "tool");
    }
}
