//! # spotify-dl
//!
//! Batch audio acquisition pipeline driven by music catalog references.
//!
//! Takes a track, album, or playlist reference, resolves it to the full
//! track listing through the catalog metadata API, and materializes every
//! track as a local audio file through the yt-dlp engine. Failures are
//! isolated per track: one bad download never aborts the batch.
//!
//! ## Features
//!
//! - Reference classification for track, album, and playlist URLs and IDs
//! - Paginated collection resolution preserving strict service order
//! - Filesystem-safe naming for container directories and audio files
//! - Bounded-concurrency dispatch with a per-track outcome report
//! - Broadcast progress events and cooperative cancellation
//!
//! ## Quick Start
//!
//! ```no_run
//! use spotify_dl::{Config, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> spotify_dl::Result<()> {
//!     let config: Config = serde_json::from_str(&std::fs::read_to_string("config.json")?)?;
//!     let pipeline = Pipeline::new(config)?;
//!
//!     // Subscribe to progress events
//!     let mut events = pipeline.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let report = pipeline
//!         .run_reference("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M")
//!         .await?;
//!     println!(
//!         "{} of {} tracks downloaded",
//!         report.succeeded.len(),
//!         report.total
//!     );
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Track acquisition engines
pub mod acquire;
/// Configuration types
pub mod config;
/// Batch dispatch with per-track fault isolation
pub mod dispatcher;
/// Error types
pub mod error;
/// End-to-end pipeline orchestration
pub mod pipeline;
/// Catalog reference classification
pub mod reference;
/// Retry logic with exponential backoff
pub mod retry;
/// Filesystem-safe name normalization
pub mod sanitize;
/// Metadata service integration
pub mod spotify;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AcquireError, Error, Result};
pub use pipeline::Pipeline;
pub use types::{BatchReport, CatalogId, CollectionResult, Event, ReferenceKind, TrackDescriptor};

/// Helper function to run a pipeline with graceful signal handling.
///
/// Spawns a watcher that cancels the pipeline on a termination signal and
/// then runs the reference. Tracks already in flight finish; undispatched
/// tracks are reported as cancelled.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use spotify_dl::{Config, Pipeline, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> spotify_dl::Result<()> {
///     let config: Config = serde_json::from_str(&std::fs::read_to_string("config.json")?)?;
///     let pipeline = Pipeline::new(config)?;
///
///     // Run with automatic signal handling
///     let report = run_with_shutdown(&pipeline, "4uLU6hMCjMI75M1A2tKUQC").await?;
///     println!("{} tracks downloaded", report.succeeded.len());
///
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// Propagates any error from [`Pipeline::run_reference`].
pub async fn run_with_shutdown(pipeline: &Pipeline, reference: &str) -> Result<BatchReport> {
    let cancel = pipeline.cancellation_token();
    let watcher = tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Shutdown signal received, cancelling pipeline");
        cancel.cancel();
    });

    let report = pipeline.run_reference(reference).await;
    watcher.abort();
    report
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
