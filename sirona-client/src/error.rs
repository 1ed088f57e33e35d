//! Error types for the reporting client.

use thiserror::Error;

/// Errors that can occur when talking to the reporting API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The API answered with a non-success status.
    #[error("{path} returned status {status}")]
    Status { status: u16, path: String },

    /// The requested resource does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// The configured endpoint is not a usable base URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else if err.is_decode() {
            ClientError::Parse(err.to_string())
        } else {
            ClientError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ClientError::Status {
            status: 503,
            path: "/jvmreports/cpu/1/2".into(),
        };
        assert_eq!(err.to_string(), "/jvmreports/cpu/1/2 returned status 503");
        assert_eq!(ClientError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(ClientError::from(err), ClientError::Parse(_)));
    }
}
