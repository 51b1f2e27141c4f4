//! Client-credentials token exchange against the accounts service

use serde::Deserialize;

use crate::config::SpotifyConfig;
use crate::error::{Error, Result};

/// An authenticated session against the metadata service
///
/// Wraps the bearer token obtained from the token endpoint. Sessions are
/// cheap to clone and carry no refresh logic; a run performs one exchange
/// up front and uses the token for its whole lifetime.
#[derive(Clone, Debug)]
pub struct Session {
    access_token: String,
}

impl Session {
    /// Build a session from an already-issued token
    ///
    /// Useful for tests and callers that manage token exchange themselves.
    pub fn from_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// The bearer token value
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

/// Token endpoint response body
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange client credentials for an authenticated session
///
/// Performs a `client_credentials` grant against
/// `{accounts_base_url}/api/token` with HTTP Basic authentication built
/// from the configured client ID and secret.
///
/// # Errors
///
/// Returns [`Error::Auth`] with the response status and body on any
/// non-2xx answer from the token endpoint.
pub async fn get_session(config: &SpotifyConfig, client: &reqwest::Client) -> Result<Session> {
    let url = format!(
        "{}/api/token",
        config.accounts_base_url.trim_end_matches('/')
    );

    let response = client
        .post(&url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Auth {
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = response.json().await?;
    tracing::debug!("Obtained client-credentials session");

    Ok(Session::from_token(token.access_token))
}
