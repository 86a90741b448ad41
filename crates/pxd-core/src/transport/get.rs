//! Streaming GET into a caller-provided sink.

use std::cell::Cell;
use std::io::Write;
use std::str;

use super::parse::parse_status_line;
use super::{TransportError, TransportOptions};

/// Downloads `url` with a single GET, writing the body sequentially to `sink`.
/// Bodies of non-2xx responses are never written. Returns the number of bytes written.
pub(crate) fn get_into(
    url: &str,
    options: &TransportOptions,
    sink: &mut dyn Write,
) -> Result<u64, TransportError> {
    let status = Cell::new(0u32);
    let mut written = 0u64;
    let mut sink_error: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(options.connect_timeout)?;
    easy.timeout(options.fetch_timeout)?;
    if let Some(ua) = &options.user_agent {
        easy.useragent(ua)?;
    }

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Some(code) = str::from_utf8(data).ok().and_then(parse_status_line) {
                status.set(code);
            }
            true
        })?;
        transfer.write_function(|data| {
            if !(200..300).contains(&status.get()) {
                return Ok(0); // abort transfer
            }
            match sink.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    tracing::warn!("write to sink failed: {}", e);
                    sink_error = Some(e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = sink_error {
        return Err(TransportError::Sink(e));
    }
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransportError::Http(code));
    }
    performed?;
    sink.flush().map_err(TransportError::Sink)?;
    Ok(written)
}
