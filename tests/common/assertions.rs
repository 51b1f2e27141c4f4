//! Custom test assertions for E2E tests

use std::path::Path;
use std::time::Duration;

use spotify_dl::{BatchReport, Event};
use tokio::sync::broadcast;

/// Drain every event already buffered on a receiver
///
/// The pipeline run has completed by the time this is called, so every
/// event it emitted is sitting in the channel.
pub fn drain_events(receiver: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut collected = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        collected.push(event);
    }
    collected
}

/// Wait for a specific event type
pub async fn wait_for_event<F>(
    receiver: &mut broadcast::Receiver<Event>,
    timeout: Duration,
    predicate: F,
) -> Option<Event>
where
    F: Fn(&Event) -> bool,
{
    let result = tokio::time::timeout(timeout, async {
        loop {
            match receiver.recv().await {
                Ok(event) if predicate(&event) => {
                    return Some(event);
                }
                Ok(_) => continue,
                Err(_) => return None,
            }
        }
    })
    .await;

    result.ok().flatten()
}

/// Assert that every track in the batch has exactly one report entry
pub fn assert_report_accounts_for_all(report: &BatchReport) {
    assert_eq!(
        report.succeeded.len() + report.failed.len(),
        report.total,
        "report must hold one outcome per track: {} succeeded + {} failed != {} total",
        report.succeeded.len(),
        report.failed.len(),
        report.total
    );
}

/// Assert that audio files exist in the container directory
pub fn assert_audio_files_exist(container_dir: &Path, expected_files: &[&str]) {
    for filename in expected_files {
        let path = container_dir.join(filename);
        assert!(
            path.exists(),
            "Expected file '{}' to exist in {:?}",
            filename,
            container_dir
        );
    }
}

/// Assert that a directory is not empty
pub fn assert_dir_not_empty(dir: &Path) {
    assert!(dir.exists(), "Directory {:?} does not exist", dir);
    let entries: Vec<_> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .collect();
    assert!(
        !entries.is_empty(),
        "Expected directory {:?} to contain files, but it's empty",
        dir
    );
}
