//! HEAD existence check.

use std::str;

use super::parse::parse_headers;
use super::{HeadResult, TransportError, TransportOptions};

/// Performs a HEAD request and returns the final status and content type.
///
/// Follows redirects. Non-2xx statuses are reported in the result, not as errors.
pub(crate) fn head(url: &str, options: &TransportOptions) -> Result<HeadResult, TransportError> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(options.connect_timeout)?;
    easy.timeout(options.probe_timeout)?;
    if let Some(ua) = &options.user_agent {
        easy.useragent(ua)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform()?;
    }

    match parse_headers(&headers) {
        Some(result) => Ok(result),
        None => Ok(HeadResult {
            status: easy.response_code()?,
            content_type: easy.content_type()?.map(str::to_string),
        }),
    }
}
