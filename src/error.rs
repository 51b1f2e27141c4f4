//! Error types for spotify-dl
//!
//! This module provides comprehensive error handling for the library, including:
//! - Run-fatal error types (auth, classification, metadata service failures)
//! - Per-track acquisition failures that are recorded rather than propagated
//! - Conversions from transport and serialization errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for spotify-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for spotify-dl
///
/// Every variant of this type is run-fatal: it aborts the current pipeline
/// invocation before or during resolution. Failures of individual track
/// acquisitions are not represented here; those are [`AcquireError`] values
/// recorded in the batch report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "ytdlp_path")
        key: Option<String>,
    },

    /// Credential exchange against the token endpoint failed
    #[error("authentication failed with status {status}: {body}")]
    Auth {
        /// HTTP status returned by the token endpoint
        status: u16,
        /// Response body returned by the token endpoint
        body: String,
    },

    /// Catalog reference did not yield a usable identifier
    #[error("invalid catalog reference: {reference}")]
    InvalidReference {
        /// The reference string as supplied by the caller
        reference: String,
    },

    /// Metadata service rejected the request (HTTP 400) with its own error payload
    #[error("bad request: {message}")]
    BadRequest {
        /// The service's error payload, passed through verbatim
        message: String,
    },

    /// Metadata service returned an unexpected non-2xx status
    #[error("metadata service error with status {status}: {body}")]
    Service {
        /// HTTP status returned by the metadata service
        status: u16,
        /// Response body returned by the metadata service
        body: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Run was cancelled before resolution completed
    #[error("cancelled before resolution completed")]
    Cancelled,
}

/// Per-track acquisition failures
///
/// These are value-level failure reasons, not propagated errors: the dispatcher
/// converts each one into an entry in the batch report and continues with the
/// next track. A failing track never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AcquireError {
    /// No audio source matched the search query
    #[error("no source found for query: {query}")]
    SourceNotFound {
        /// The search query that produced no results
        query: String,
    },

    /// Source search or retrieval failed at the network level
    #[error("network failure: {message}")]
    Network {
        /// Description of the network failure
        message: String,
    },

    /// External tool failed to retrieve or transcode the source
    #[error("tool failure: {message}")]
    Tool {
        /// Output or execution error from the external tool
        message: String,
    },

    /// Destination file could not be written
    #[error("filesystem failure: {message}")]
    Io {
        /// Description of the filesystem failure
        message: String,
    },

    /// Batch was cancelled before this track was dispatched
    #[error("cancelled before dispatch")]
    Cancelled,
}
