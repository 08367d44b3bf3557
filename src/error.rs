//! Error types for the checkout SDK

use thiserror::Error;

/// Result type alias for checkout SDK operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for checkout SDK operations
#[derive(Error, Debug)]
pub enum Error {
    /// The authentication endpoint did not hand back a complete token pair.
    ///
    /// `message` is the remote response's own `message` field, if it had one.
    #[error("Access error: {}", .message.as_deref().unwrap_or("no message in authentication response"))]
    Access { message: Option<String> },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The remote API answered with a non-success status
    #[error("API error: status {status}: {body}")]
    Api { status: u16, body: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Create an access error
    pub fn access(message: Option<String>) -> Self {
        Self::Access { message }
    }

    /// Create an API error
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this is a failed login or token refresh
    pub fn is_access(&self) -> bool {
        matches!(self, Self::Access { .. })
    }
}
