//! End-to-end pipeline from catalog reference to batch report
//!
//! Wires the stages together: classify the reference, authenticate,
//! resolve the collection, dispatch every track to the acquisition
//! engine. Progress is observable through a broadcast event stream and
//! the whole run can be stopped through a cancellation token.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::acquire::{TrackAcquirer, YtDlpAcquirer};
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::reference::classify;
use crate::spotify::{SpotifyClient, get_session};
use crate::types::{BatchReport, Event, ReferenceKind};

/// Event channel capacity; slow subscribers miss old events rather than
/// blocking the pipeline
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// The catalog-to-audio pipeline
pub struct Pipeline {
    config: Config,
    events: broadcast::Sender<Event>,
    cancel: CancellationToken,
    acquirer: Arc<dyn TrackAcquirer>,
}

impl Pipeline {
    /// Create a pipeline backed by the yt-dlp engine
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] when the yt-dlp executable cannot
    /// be located.
    pub fn new(config: Config) -> Result<Self> {
        let acquirer = Arc::new(YtDlpAcquirer::new(&config)?);
        Ok(Self::with_acquirer(config, acquirer))
    }

    /// Create a pipeline with a custom acquisition engine
    pub fn with_acquirer(config: Config, acquirer: Arc<dyn TrackAcquirer>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            config,
            events,
            cancel: CancellationToken::new(),
            acquirer,
        }
    }

    /// Subscribe to pipeline progress events
    ///
    /// Subscribe before calling [`run_reference`](Self::run_reference);
    /// events emitted with no subscriber are dropped.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Token that stops the pipeline when cancelled
    ///
    /// Cancellation is observed between pagination requests and between
    /// track dispatches; work already in flight runs to completion.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the full pipeline for one catalog reference
    ///
    /// Resolution failures abort the run; per-track acquisition failures do
    /// not and are reported in the returned [`BatchReport`] instead.
    ///
    /// # Errors
    ///
    /// Classification, authentication, resolution, and container directory
    /// errors surface here. A cancelled run returns
    /// [`crate::Error::Cancelled`] if resolution was still in progress.
    pub async fn run_reference(&self, reference: &str) -> Result<BatchReport> {
        let (kind, id) = classify(reference)?;
        tracing::info!(reference, kind = ?kind, id = %id, "Classified reference");

        let http_client = reqwest::Client::new();
        let session = get_session(&self.config.spotify, &http_client).await?;
        let client = SpotifyClient::new(&self.config, session, http_client);
        let collection = client.resolve(kind, &id, &self.cancel).await?;

        if kind == ReferenceKind::Track {
            if let Some(track) = collection.tracks.first() {
                self.events
                    .send(Event::TrackFound {
                        name: track.display_name(),
                    })
                    .ok();
            }
        }
        self.events
            .send(Event::CollectionResolved {
                container_name: collection.container_name.clone(),
                total: collection.tracks.len(),
            })
            .ok();

        let dispatcher = Dispatcher::new(
            Arc::clone(&self.acquirer),
            self.config.download_dir().clone(),
            self.config.download.max_concurrent_acquisitions,
            self.events.clone(),
            self.cancel.clone(),
        );
        dispatcher.dispatch(&collection).await
    }
}
