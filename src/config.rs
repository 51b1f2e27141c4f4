//! Configuration types for spotify-dl

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Metadata service credentials and endpoints
///
/// The base URLs default to the public service endpoints and only need to be
/// overridden when pointing the client at a test double.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpotifyConfig {
    /// OAuth client ID for the client-credentials exchange
    pub client_id: String,

    /// OAuth client secret for the client-credentials exchange
    pub client_secret: String,

    /// Base URL of the metadata API (default: "https://api.spotify.com/v1")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the accounts service hosting the token endpoint
    /// (default: "https://accounts.spotify.com")
    #[serde(default = "default_accounts_base_url")]
    pub accounts_base_url: String,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_base_url: default_api_base_url(),
            accounts_base_url: default_accounts_base_url(),
        }
    }
}

/// Acquisition engine settings (source search and external tool invocation)
///
/// Groups everything the yt-dlp engine needs: the search API key, the binary
/// location, and the transcode target. Used as a nested sub-config within
/// [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AcquisitionConfig {
    /// API key for the source search service
    pub api_key: String,

    /// Base URL of the source search service (default: "https://www.googleapis.com")
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,

    /// Path to the yt-dlp executable (auto-detected if None)
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,

    /// Whether to search PATH for yt-dlp if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// Audio container format passed to the transcoder (default: "mp3")
    #[serde(default = "default_audio_format")]
    pub audio_format: String,

    /// Audio quality passed to the transcoder (default: "192K")
    #[serde(default = "default_audio_quality")]
    pub audio_quality: String,

    /// Timeout for a single source search request (default: 10 seconds)
    #[serde(default = "default_search_timeout", with = "duration_serde")]
    pub search_timeout: Duration,

    /// Timeout for a single yt-dlp invocation (default: 300 seconds)
    #[serde(default = "default_tool_timeout", with = "duration_serde")]
    pub tool_timeout: Duration,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            search_base_url: default_search_base_url(),
            ytdlp_path: None,
            search_path: true,
            audio_format: default_audio_format(),
            audio_quality: default_audio_quality(),
            search_timeout: default_search_timeout(),
            tool_timeout: default_tool_timeout(),
        }
    }
}

/// Download behavior configuration (destination, concurrency, pagination)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Destination root directory (default: "downloads")
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Maximum concurrent acquisitions (default: 1, i.e. strictly sequential)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_acquisitions: usize,

    /// Page size for collection item requests (default: 100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            max_concurrent_acquisitions: default_max_concurrent(),
            page_size: default_page_size(),
        }
    }
}

/// Retry configuration for transient failures
///
/// Applies only inside the acquisition engine; the resolver and dispatcher
/// never retry on their own.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (default: 5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 1 second)
    #[serde(default = "default_initial_delay", with = "duration_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 60 seconds)
    #[serde(default = "default_max_delay", with = "duration_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

/// Main configuration for the pipeline
///
/// Fields are organized into logical sub-configs:
/// - [`spotify`](SpotifyConfig): metadata service credentials and endpoints
/// - [`download`](DownloadConfig): destination, concurrency, pagination
/// - [`acquisition`](AcquisitionConfig): source search and external tool
/// - [`retry`](RetryConfig): engine-side retry policy
///
/// The download and acquisition sub-configs are flattened for serialization,
/// so their fields appear at the top level of the JSON/TOML format.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Metadata service credentials and endpoints
    pub spotify: SpotifyConfig,

    /// Download behavior settings
    #[serde(flatten)]
    pub download: DownloadConfig,

    /// Acquisition engine settings
    #[serde(flatten)]
    pub acquisition: AcquisitionConfig,

    /// Retry policy for the acquisition engine
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Config {
    /// Destination root directory
    pub fn download_dir(&self) -> &PathBuf {
        &self.download.download_dir
    }
}

// Default value functions
fn default_api_base_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_accounts_base_url() -> String {
    "https://accounts.spotify.com".to_string()
}

fn default_search_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_audio_format() -> String {
    "mp3".to_string()
}

fn default_audio_quality() -> String {
    "192K".to_string()
}

fn default_search_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_tool_timeout() -> Duration {
    Duration::from_secs(300) // 5 minutes
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_max_concurrent() -> usize {
    1
}

fn default_page_size() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    5
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(60)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
