//! vManage client errors

use thiserror::Error;

/// Errors that can occur when interacting with the vManage API
#[derive(Debug, Error)]
pub enum VManageError {
    /// HTTP transport error (connection refused, TLS failure, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// vManage answered with a non-success status
    #[error("vManage API error: {status} {reason}")]
    Api {
        status: u16,
        reason: String,
        body: String,
    },

    /// Session is missing or was rejected (401/403)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource or API path not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Caller passed a value outside the accepted set
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Client configuration is incomplete or could not be loaded
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Human-readable meaning of the status codes vManage documents for its API.
///
/// Returns `None` for codes outside the documented table.
pub fn status_reason(status: u16) -> Option<&'static str> {
    match status {
        200 => Some("Success"),
        400 => Some("Bad Request"),
        403 => Some("Forbidden"),
        404 => Some("API Not found"),
        500 => Some("Internal Server Error"),
        _ => None,
    }
}
