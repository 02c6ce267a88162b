//! Backend client error types

use thiserror::Error;

/// Errors that can occur when talking to the AirAware backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// The backend answered with an explicit error (or status) message
    #[error("{0}")]
    Backend(String),

    /// Non-2xx status with a JSON body carrying no message
    #[error("Backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected contract
    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ClientError {
    /// Classify a transport-level reqwest failure
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err)
        }
    }

    /// Whether the backend itself reported this error (shown verbatim)
    pub fn is_backend_reported(&self) -> bool {
        matches!(self, ClientError::Backend(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Malformed(err.to_string())
    }
}

/// Result type for backend calls
pub type ClientResult<T> = Result<T, ClientError>;
