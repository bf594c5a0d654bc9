//! Error types for the application.
//!
//! - [`FetchError`] - transport-level failures (browser fetch, timeouts, HTTP status)
//! - [`ApiError`] - GitHub API failures surfaced to the UI as inline messages

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, DNS, offline, ...)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

/// Errors returned by the GitHub client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// GitHub answered with a non-2xx status.
    #[error("GitHub returned {status}: {message}")]
    Github { status: u16, message: String },
    /// Response body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// File content used an encoding other than base64.
    #[error("Unknown content encoding: {0}")]
    UnknownEncoding(String),
    /// Path is a directory or does not exist in the repository.
    #[error("Not a file: {0}")]
    NotAFile(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<base64::DecodeError> for ApiError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}
