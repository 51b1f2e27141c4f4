//! yt-dlp acquisition engine
//!
//! The production [`TrackAcquirer`]: finds a source video for the track
//! query via the search API, then shells out to the yt-dlp executable to
//! fetch and transcode the audio. Both steps are individually wrapped in
//! the retry policy, so a transient search failure never re-runs a
//! completed download and vice versa.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{AcquisitionConfig, Config, RetryConfig};
use crate::error::{AcquireError, Error, Result};
use crate::retry::acquire_with_retry;

use super::traits::{AcquireResult, TrackAcquirer};

/// Acquisition engine backed by the yt-dlp executable
pub struct YtDlpAcquirer {
    binary_path: PathBuf,
    http_client: reqwest::Client,
    config: AcquisitionConfig,
    retry: RetryConfig,
}

impl YtDlpAcquirer {
    /// Create an engine, locating the yt-dlp executable
    ///
    /// An explicitly configured path wins; otherwise the system PATH is
    /// searched when `search_path` is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the configured path does not exist or
    /// no executable can be found.
    pub fn new(config: &Config) -> Result<Self> {
        let binary_path = discover_binary(&config.acquisition)?;
        tracing::info!(binary = %binary_path.display(), "Using yt-dlp executable");
        Ok(Self {
            binary_path,
            http_client: reqwest::Client::new(),
            config: config.acquisition.clone(),
            retry: config.retry.clone(),
        })
    }

    /// Search the source service for the best video match
    ///
    /// Returns `Ok(None)` when the service answers successfully but has no
    /// result for the query; that is a permanent condition, not an error.
    async fn search_source(
        &self,
        query: &str,
    ) -> std::result::Result<Option<String>, AcquireError> {
        let url = format!(
            "{}/youtube/v3/search",
            self.config.search_base_url.trim_end_matches('/')
        );
        let request = self.http_client.get(&url).query(&[
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("maxResults", "1"),
            ("key", self.config.api_key.as_str()),
        ]);

        let response = match tokio::time::timeout(self.config.search_timeout, request.send()).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                return Err(AcquireError::Network {
                    message: format!("source search request failed: {e}"),
                });
            }
            Err(_) => {
                return Err(AcquireError::Network {
                    message: format!(
                        "source search timed out after {} seconds",
                        self.config.search_timeout.as_secs()
                    ),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AcquireError::Network {
                message: format!("source search failed with status {status}: {body}"),
            });
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| AcquireError::Network {
            message: format!("failed to parse search response: {e}"),
        })?;

        Ok(parsed
            .items
            .into_iter()
            .next()
            .and_then(|item| item.id.video_id))
    }

    /// Run yt-dlp for one source video and return the final audio path
    async fn run_ytdlp(
        &self,
        video_id: &str,
        destination: &Path,
    ) -> std::result::Result<PathBuf, AcquireError> {
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
        // yt-dlp substitutes %(ext)s with the intermediate container before
        // the transcode step rewrites it to the target format
        let output_template = format!("{}.%(ext)s", destination.display());

        let mut command = tokio::process::Command::new(&self.binary_path);
        command
            .arg("-f")
            .arg("bestaudio/best")
            .arg("--extract-audio")
            .arg("--audio-format")
            .arg(&self.config.audio_format)
            .arg("--audio-quality")
            .arg(&self.config.audio_quality)
            .arg("--no-playlist")
            .arg("-o")
            .arg(&output_template)
            .arg(&watch_url)
            // A timed-out invocation drops the output future; the child
            // must not outlive it and keep writing to the destination
            .kill_on_drop(true);

        tracing::debug!(
            video_id,
            destination = %destination.display(),
            "Running yt-dlp"
        );

        let output = match tokio::time::timeout(self.config.tool_timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(AcquireError::Io {
                    message: format!("failed to run yt-dlp: {e}"),
                });
            }
            Err(_) => {
                return Err(AcquireError::Tool {
                    message: format!(
                        "yt-dlp timed out after {} seconds",
                        self.config.tool_timeout.as_secs()
                    ),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AcquireError::Tool {
                message: format!("yt-dlp exited with {}: {}", output.status, stderr.trim()),
            });
        }

        // Extension is appended textually; Path::with_extension would
        // truncate titles that contain a dot
        Ok(PathBuf::from(format!(
            "{}.{}",
            destination.display(),
            self.config.audio_format
        )))
    }
}

#[async_trait]
impl TrackAcquirer for YtDlpAcquirer {
    async fn acquire(&self, query: &str, destination: &Path) -> AcquireResult {
        let video_id = acquire_with_retry(&self.retry, || self.search_source(query))
            .await?
            .ok_or_else(|| AcquireError::SourceNotFound {
                query: query.to_string(),
            })?;

        acquire_with_retry(&self.retry, || self.run_ytdlp(&video_id, destination)).await
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}

fn discover_binary(config: &AcquisitionConfig) -> Result<PathBuf> {
    if let Some(path) = &config.ytdlp_path {
        if path.exists() {
            return Ok(path.clone());
        }
        return Err(Error::Config {
            message: format!("configured yt-dlp path '{}' does not exist", path.display()),
            key: Some("ytdlp_path".to_string()),
        });
    }

    if config.search_path {
        if let Ok(path) = which::which("yt-dlp") {
            return Ok(path);
        }
    }

    Err(Error::Config {
        message: "yt-dlp executable not found; install it or set ytdlp_path".to_string(),
        key: Some("ytdlp_path".to_string()),
    })
}

// Search response wire format, reduced to the one field we read
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId", default)]
    video_id: Option<String>,
}
