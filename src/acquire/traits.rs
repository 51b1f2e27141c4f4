//! Acquisition engine abstraction

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::AcquireError;

/// Outcome of a single track acquisition
///
/// Success carries the final audio file path; failure carries a structured
/// reason the batch report can record without losing information.
pub type AcquireResult = std::result::Result<PathBuf, AcquireError>;

/// A pluggable engine that materializes one track as a local audio file
///
/// The dispatcher hands every track to an engine through this trait and
/// treats the engine as a black box: it does not retry, inspect partial
/// output, or interpret failure reasons beyond recording them.
#[async_trait]
pub trait TrackAcquirer: Send + Sync {
    /// Acquire the track described by `query` into `destination`
    ///
    /// `destination` is the extensionless base path inside the container
    /// directory. Implementations append their own transcode extension and
    /// return the final path on success.
    async fn acquire(&self, query: &str, destination: &Path) -> AcquireResult;

    /// Short engine name for logs
    fn name(&self) -> &'static str;
}
