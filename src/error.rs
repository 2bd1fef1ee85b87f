//! Error types for the validation gateway.
//!
//! Failures reported by a validator through its own exit code are not errors:
//! they travel back to the client as data. These variants cover what happens
//! around the validator.

use std::time::Duration;

use thiserror::Error;

/// Main error type for gateway operations.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request body is malformed or lacks a required field.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A scratch file could not be written or read back.
    #[error("scratch file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The validator executable could not be launched.
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The validator did not exit in time and was killed.
    #[error("{tool} did not finish within {}s", .timeout.as_secs_f64())]
    Timeout { tool: String, timeout: Duration },
}

impl GatewayError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        GatewayError::BadRequest(message.into())
    }

    /// Whether the client, rather than the server or a validator, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, GatewayError::BadRequest(_))
    }
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
