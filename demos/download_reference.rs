//! Download a catalog reference from the command line
//!
//! This example demonstrates the core functionality of spotify-dl:
//! - Building a configuration from environment credentials
//! - Creating a pipeline instance
//! - Subscribing to progress events
//! - Running a reference end to end and reading the batch report
//!
//! Usage:
//!   SPOTIFY_CLIENT_ID=... SPOTIFY_CLIENT_SECRET=... YOUTUBE_API_KEY=... \
//!   cargo run --example download_reference -- <reference> [download_dir]

use spotify_dl::config::{AcquisitionConfig, DownloadConfig, SpotifyConfig};
use spotify_dl::{Config, Event, Pipeline, run_with_shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let reference = std::env::args()
        .nth(1)
        .ok_or("usage: download_reference <reference> [download_dir]")?;
    let download_dir = std::env::args().nth(2).unwrap_or_else(|| "downloads".to_string());

    // Build configuration from environment credentials
    let config = Config {
        spotify: SpotifyConfig {
            client_id: std::env::var("SPOTIFY_CLIENT_ID")
                .map_err(|_| "SPOTIFY_CLIENT_ID must be set")?,
            client_secret: std::env::var("SPOTIFY_CLIENT_SECRET")
                .map_err(|_| "SPOTIFY_CLIENT_SECRET must be set")?,
            ..Default::default()
        },
        acquisition: AcquisitionConfig {
            api_key: std::env::var("YOUTUBE_API_KEY")
                .map_err(|_| "YOUTUBE_API_KEY must be set")?,
            ..Default::default()
        },
        download: DownloadConfig {
            download_dir: download_dir.into(),
            ..Default::default()
        },
        ..Default::default()
    };

    // Create pipeline instance
    let pipeline = Pipeline::new(config)?;

    // Subscribe to events and print progress
    let mut events = pipeline.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::TrackFound { name } => {
                    println!("Track found: {}", name);
                }
                Event::CollectionResolved {
                    container_name,
                    total,
                } => {
                    println!("Resolved \"{}\" with {} tracks", container_name, total);
                }
                Event::TrackStarted { index, total, name } => {
                    println!("[{}/{}] Downloading: {}", index, total, name);
                }
                Event::TrackCompleted { path, .. } => {
                    println!("✓ Saved: {}", path.display());
                }
                Event::TrackFailed { name, reason, .. } => {
                    println!("✗ Failed: {} ({})", name, reason);
                }
                Event::BatchCompleted { .. } => {
                    println!("Done");
                }
            }
        }
    });

    // Run the reference with automatic signal handling
    let report = run_with_shutdown(&pipeline, &reference).await?;

    // Drop the pipeline so the printer drains and exits
    drop(pipeline);
    printer.await.ok();

    println!(
        "{}/{} tracks downloaded, {} failed",
        report.succeeded.len(),
        report.total,
        report.failed.len()
    );

    Ok(())
}
