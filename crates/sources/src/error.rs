//! Error types for metric sources

use thiserror::Error;

/// Errors that can occur while fetching metrics
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to initialize the HTTP client (e.g., TLS misconfiguration)
    #[error("failed to initialize source: {0}")]
    Init(String),

    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned HTTP {status}")]
    Status { status: u16 },

    /// Response body was not the expected JSON
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// All retry attempts exhausted
    #[error("{url}: failed after {attempts} attempts: {last_error}")]
    Exhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },
}

impl SourceError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Transport-level failures (timeouts, connection errors, resets) and
    /// server-side statuses (5xx, 429) are retryable. Client errors,
    /// malformed payloads, and init failures are terminal.
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Http(e) => !e.is_builder(),
            SourceError::Status { status } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
