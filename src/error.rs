//! Error types for the admin console.
//!
//! Fetch failures are never thrown across the cache read boundary: the
//! [`crate::cache::ResourceCache`] records them on the entry so stale data
//! stays visible alongside the error. Storage decode failures are recovered
//! locally by falling back to the caller-supplied default.

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests against the Ducks API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (DNS, CORS, connection reset, ...)
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
    /// Response body was not the expected JSON shape
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}
