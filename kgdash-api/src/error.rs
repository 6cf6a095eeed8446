//! Error types for kgdash-api

use thiserror::Error;

/// Result type alias using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by backend operations.
///
/// The backend reports application failures through its JSON payload
/// (`error`, optionally `details` and `status`), sometimes with a 2xx
/// status. Payload fields therefore take precedence over the HTTP status
/// when classifying an outcome; `Backend` carries both.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network failure: connection refused, timeout, interrupted transfer.
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be parsed as the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The backend answered with a structured error.
    #[error("{message}")]
    Backend {
        /// HTTP status the error arrived with.
        status: u16,
        /// The payload's `error` field, or a generic message when absent.
        message: String,
        /// The payload's `details` field, when present.
        details: Option<String>,
    },
}

impl ApiError {
    /// Create a backend error from payload fields.
    pub fn backend(status: u16, message: impl Into<String>, details: Option<String>) -> Self {
        ApiError::Backend {
            status,
            message: message.into(),
            details,
        }
    }

    /// Diagnostic `details` carried by a backend error, if any.
    pub fn details(&self) -> Option<&str> {
        match self {
            ApiError::Backend { details, .. } => details.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Network(format!("request timed out: {e}"))
        } else if e.is_connect() {
            ApiError::Network(format!("connection failed: {e}"))
        } else if e.is_decode() {
            ApiError::InvalidResponse(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_display_uses_payload_message() {
        let err = ApiError::backend(502, "GraphDB error", Some("line 1: syntax".into()));
        assert_eq!(format!("{err}"), "GraphDB error");
        assert_eq!(err.details(), Some("line 1: syntax"));
    }

    #[test]
    fn non_backend_has_no_details() {
        let err = ApiError::Network("connection failed".into());
        assert_eq!(err.details(), None);
    }
}
