//! Error types for taskpulse-core

use thiserror::Error;

/// Main error type for the taskpulse-core library
///
/// These errors never escape the tracking boundary: the [`Tracker`](crate::Tracker)
/// catches them, logs them, and resolves normally. They exist so the delivery
/// path can use `?` internally and so tests can assert on failure classes.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure reaching the collection endpoint
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success response from the collection endpoint
    #[error("endpoint error ({status}): {body}")]
    Endpoint { status: u16, body: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for taskpulse-core
pub type Result<T> = std::result::Result<T, Error>;
