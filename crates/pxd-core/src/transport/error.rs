//! Transport error type.

use thiserror::Error;

/// Error from a single HEAD or GET against the mirror.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Curl reported an error (timeout, connection, DNS, aborted write).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the body to the sink failed. Not a network error.
    #[error("write: {0}")]
    Sink(#[source] std::io::Error),
}
