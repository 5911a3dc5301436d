//! Client Error Types
//!
//! Every variant counts as "request failed" for the fallback operations.

use thiserror::Error;

/// Errors that can occur when talking to the tracking backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, timeout or other transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Status code of the response, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the backend could not be reached
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Request(e) if e.is_connect() || e.is_timeout())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
