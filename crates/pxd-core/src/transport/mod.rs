//! HTTP transport to the mirror.
//!
//! Uses the curl crate (libcurl) for a lightweight HEAD existence check and a
//! streaming GET. Both calls block the current thread; call them from
//! `spawn_blocking` when used from async code.

mod error;
#[cfg(test)]
pub(crate) mod fake;
mod get;
mod head;
mod parse;

use std::io::Write;
use std::time::Duration;

pub use error::TransportError;

/// Status and content type reported by a HEAD request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResult {
    /// Status code of the final response (after redirects).
    pub status: u32,
    /// `Content-Type` of the final response, if present.
    pub content_type: Option<String>,
}

impl HeadResult {
    /// True only for HTTP 200 with a `Content-Type` starting with `image`.
    pub fn is_image(&self) -> bool {
        self.status == 200
            && self
                .content_type
                .as_deref()
                .map(|ct| ct.trim().to_ascii_lowercase().starts_with("image"))
                .unwrap_or(false)
    }
}

/// Minimal interface the resolver and acquirer need from the network.
pub trait Transport: Send + Sync {
    /// Lightweight existence check. Non-2xx statuses are returned, not errors.
    fn head(&self, url: &str) -> Result<HeadResult, TransportError>;

    /// Streams the body of `url` into `sink`. Returns the number of bytes written.
    /// A non-2xx status is an error and nothing is written to `sink`.
    fn get_into(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError>;
}

/// Timeouts and identification for curl requests.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    pub probe_timeout: Duration,
    pub fetch_timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            probe_timeout: Duration::from_secs(30),
            fetch_timeout: Duration::from_secs(300),
            user_agent: None,
        }
    }
}

/// libcurl-backed transport. A fresh Easy handle is used per request.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: TransportOptions,
}

impl CurlTransport {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }
}

impl Transport for CurlTransport {
    fn head(&self, url: &str) -> Result<HeadResult, TransportError> {
        head::head(url, &self.options)
    }

    fn get_into(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        get::get_into(url, &self.options, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head(status: u32, ct: Option<&str>) -> HeadResult {
        HeadResult {
            status,
            content_type: ct.map(str::to_string),
        }
    }

    #[test]
    fn image_requires_200_and_image_type() {
        assert!(head(200, Some("image/jpeg")).is_image());
        assert!(head(200, Some("Image/PNG")).is_image());
        assert!(!head(200, Some("text/html; charset=utf-8")).is_image());
        assert!(!head(200, None).is_image());
        assert!(!head(404, Some("image/png")).is_image());
        assert!(!head(206, Some("image/png")).is_image());
    }
}
