//! Acquisition error type.

use thiserror::Error;

use crate::transport::TransportError;

/// Why an acquisition failed. Every variant is terminal for that one save.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// The locator has no usable trailing filename.
    #[error("not an image locator: {0}")]
    BadLocator(String),
    /// The folder handle is invalid or no longer authorized. No I/O was attempted.
    #[error("error path: {0} is not a writable folder")]
    InvalidDestination(String),
    /// Fetching from the mirror failed (connection, timeout, non-2xx).
    #[error("network: {0}")]
    Network(#[source] TransportError),
    /// Writing or copying the file failed. The final file is left untouched.
    #[error("write: {0}")]
    Write(#[from] std::io::Error),
    /// The background task died before reporting.
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<TransportError> for AcquireError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Sink(io) => AcquireError::Write(io),
            other => AcquireError::Network(other),
        }
    }
}
