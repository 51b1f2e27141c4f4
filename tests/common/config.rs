//! Test configuration helpers for loading .env credentials and building test configs

use std::path::Path;

use spotify_dl::Config;
use spotify_dl::config::{AcquisitionConfig, DownloadConfig, SpotifyConfig};

/// Error type for test configuration
#[derive(Debug)]
pub struct ConfigError(pub String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Config error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Load metadata service credentials from environment variables
///
/// Required environment variables:
/// - `SPOTIFY_CLIENT_ID` - OAuth client ID
/// - `SPOTIFY_CLIENT_SECRET` - OAuth client secret
pub fn load_spotify_credentials() -> Result<(String, String), ConfigError> {
    dotenvy::dotenv().ok();

    let client_id = std::env::var("SPOTIFY_CLIENT_ID")
        .map_err(|_| ConfigError("SPOTIFY_CLIENT_ID not set in environment".to_string()))?;

    let client_secret = std::env::var("SPOTIFY_CLIENT_SECRET")
        .map_err(|_| ConfigError("SPOTIFY_CLIENT_SECRET not set in environment".to_string()))?;

    Ok((client_id, client_secret))
}

/// Build a config pointing every service endpoint at one mock server
///
/// The token, metadata, and search endpoints use disjoint paths, so a single
/// wiremock server can play all three services.
pub fn mock_service_config(mock_uri: &str, download_dir: &Path) -> Config {
    Config {
        spotify: SpotifyConfig {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            api_base_url: mock_uri.to_string(),
            accounts_base_url: mock_uri.to_string(),
        },
        acquisition: AcquisitionConfig {
            api_key: "test-key".to_string(),
            search_base_url: mock_uri.to_string(),
            ..Default::default()
        },
        download: DownloadConfig {
            download_dir: download_dir.to_path_buf(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Build a config for live tests against the real metadata service
///
/// The search key is stubbed; live tests resolve metadata but never invoke
/// the search API or yt-dlp.
pub fn live_config(download_dir: &Path) -> Result<Config, ConfigError> {
    let (client_id, client_secret) = load_spotify_credentials()?;

    Ok(Config {
        spotify: SpotifyConfig {
            client_id,
            client_secret,
            ..Default::default()
        },
        acquisition: AcquisitionConfig {
            api_key: "unused-in-live-tests".to_string(),
            ..Default::default()
        },
        download: DownloadConfig {
            download_dir: download_dir.to_path_buf(),
            ..Default::default()
        },
        ..Default::default()
    })
}

/// Check if live test credentials are available
pub fn has_live_credentials() -> bool {
    dotenvy::dotenv().ok();
    std::env::var("SPOTIFY_CLIENT_ID").is_ok() && std::env::var("SPOTIFY_CLIENT_SECRET").is_ok()
}

/// Skip test if credentials are not available
#[macro_export]
macro_rules! skip_if_no_credentials {
    () => {
        if !$crate::common::has_live_credentials() {
            eprintln!("Skipping test: Spotify credentials not found in .env");
            return;
        }
    };
}
