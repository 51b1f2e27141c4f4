//! Batch dispatch with per-track fault isolation
//!
//! Hands every track of a resolved collection to the acquisition engine
//! and aggregates the outcomes into a [`BatchReport`]. One failing track
//! never aborts the batch: the failure is recorded and dispatch moves on.
//! Concurrency is bounded by a permit pool sized from configuration; the
//! default of one permit keeps acquisitions strictly sequential.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore, broadcast};
use tokio_util::sync::CancellationToken;

use crate::acquire::TrackAcquirer;
use crate::error::{AcquireError, Error, Result};
use crate::sanitize::normalize;
use crate::types::{BatchReport, CollectionResult, Event, FailedTrack, SucceededTrack};

/// Dispatches resolved collections to the acquisition engine
pub struct Dispatcher {
    acquirer: Arc<dyn TrackAcquirer>,
    download_dir: PathBuf,
    max_concurrent: usize,
    events: broadcast::Sender<Event>,
    cancel: CancellationToken,
}

impl Dispatcher {
    /// Create a dispatcher
    ///
    /// A zero concurrency bound is treated as one; the permit pool must
    /// never be empty or dispatch would stall forever.
    pub fn new(
        acquirer: Arc<dyn TrackAcquirer>,
        download_dir: PathBuf,
        max_concurrent: usize,
        events: broadcast::Sender<Event>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            acquirer,
            download_dir,
            max_concurrent: max_concurrent.max(1),
            events,
            cancel,
        }
    }

    /// Dispatch every track of a collection and report the outcomes
    ///
    /// The container name is normalized before it is joined onto the
    /// download root, so hand-built collections stay inside one flat
    /// directory just like resolver output. Each track is handed to the
    /// engine exactly once; engine failures and panics are recorded in the
    /// report, never propagated. Cancellation is observed between tracks:
    /// in-flight acquisitions run to completion and tracks not yet
    /// dispatched are recorded as cancelled, so the report still accounts
    /// for every input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the container directory cannot be
    /// created. Engine failures never surface here.
    pub async fn dispatch(&self, collection: &CollectionResult) -> Result<BatchReport> {
        let total = collection.tracks.len();
        // Container names from outside the resolver may still hold separators
        let container_dir = self.download_dir.join(normalize(&collection.container_name));

        tokio::fs::create_dir_all(&container_dir).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create container directory '{}': {}",
                    container_dir.display(),
                    e
                ),
            ))
        })?;

        tracing::info!(
            container = %container_dir.display(),
            tracks = total,
            engine = self.acquirer.name(),
            "Dispatching batch"
        );

        let report = Arc::new(Mutex::new(BatchReport::new(total)));
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut handles = Vec::with_capacity(total);
        let mut dispatched = 0usize;

        for (index, track) in collection.tracks.iter().enumerate() {
            // Cancellation wins over a ready permit so a cancelled batch
            // stops handing out work deterministically
            let permit = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                permit = semaphore.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(e) => {
                        tracing::error!("Failed to acquire dispatch permit: {}", e);
                        break;
                    }
                },
            };

            dispatched += 1;
            let acquirer = Arc::clone(&self.acquirer);
            let events = self.events.clone();
            let report = Arc::clone(&report);
            let track = track.clone();
            let container_dir = container_dir.clone();
            let position = index + 1;

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                let name = track.display_name();
                events
                    .send(Event::TrackStarted {
                        index: position,
                        total,
                        name: name.clone(),
                    })
                    .ok();
                tracing::info!(index = position, total, track = %name, "Acquiring track");

                let destination = container_dir.join(normalize(&name));
                match acquirer.acquire(&name, &destination).await {
                    Ok(path) => {
                        tracing::info!(track = %name, path = %path.display(), "Track acquired");
                        events
                            .send(Event::TrackCompleted {
                                index: position,
                                name,
                                path: path.clone(),
                            })
                            .ok();
                        report.lock().await.succeeded.push(SucceededTrack { track, path });
                    }
                    Err(reason) => {
                        tracing::warn!(track = %name, error = %reason, "Track acquisition failed");
                        events
                            .send(Event::TrackFailed {
                                index: position,
                                name,
                                reason: reason.clone(),
                            })
                            .ok();
                        report.lock().await.failed.push(FailedTrack { track, reason });
                    }
                }
            }));
        }

        for (index, result) in futures::future::join_all(handles).await.into_iter().enumerate() {
            if let Err(e) = result {
                // A panicked task recorded no outcome; give its track one so
                // the report keeps exactly one entry per input
                tracing::error!(index = index + 1, "Acquisition task panicked: {}", e);
                let track = collection.tracks[index].clone();
                let reason = AcquireError::Tool {
                    message: format!("acquisition task panicked: {e}"),
                };
                self.events
                    .send(Event::TrackFailed {
                        index: index + 1,
                        name: track.display_name(),
                        reason: reason.clone(),
                    })
                    .ok();
                report.lock().await.failed.push(FailedTrack { track, reason });
            }
        }

        let mut guard = report.lock().await;
        if dispatched < total {
            // Tracks never handed to the engine still get a report entry so
            // the batch accounts for every input exactly once
            for track in &collection.tracks[dispatched..] {
                guard.failed.push(FailedTrack {
                    track: track.clone(),
                    reason: AcquireError::Cancelled,
                });
            }
            tracing::warn!(
                skipped = total - dispatched,
                "Cancellation stopped the batch before all tracks were dispatched"
            );
        }

        let report = guard.clone();
        drop(guard);
        self.events
            .send(Event::BatchCompleted {
                total: report.total,
                succeeded: report.succeeded.len(),
                failed: report.failed.len(),
            })
            .ok();
        tracing::info!(
            total = report.total,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "Batch completed"
        );
        Ok(report)
    }
}
