//! Error handling for the Vantage AOI client

use std::fmt;
use thiserror::Error;

/// Unified error type for the Vantage AOI client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Authentication errors (missing or rejected token)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Application errors returned by the backend (4xx/5xx with a message)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Client-side validation errors, rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The credit balance precondition failed
    #[error("No tokens remaining")]
    InsufficientTokens,

    /// The operation targeted an AOI that is not in the cache
    #[error("Unknown AOI: {0}")]
    UnknownAoi(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new API error
    pub fn api<T: fmt::Display>(status: u16, msg: T) -> Self {
        Error::Api {
            status,
            message: msg.to_string(),
        }
    }

    /// Whether this error came back as a server-side failure (5xx) rather
    /// than a rejection the client can act on
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }
}
