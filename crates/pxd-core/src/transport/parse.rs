//! Parse HTTP response header lines into HeadResult.

use super::HeadResult;

/// Parses a status line such as `HTTP/1.1 200 OK` or `HTTP/2 404`.
pub(crate) fn parse_status_line(line: &str) -> Option<u32> {
    let line = line.trim();
    if !line.starts_with("HTTP/") {
        return None;
    }
    line.split_whitespace().nth(1)?.parse().ok()
}

/// Parses collected header lines. When redirects were followed the lines of
/// every response are present; only the last response counts.
pub(crate) fn parse_headers(lines: &[String]) -> Option<HeadResult> {
    let mut status = None;
    let mut content_type = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(code) = parse_status_line(line) {
            status = Some(code);
            content_type = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                content_type = Some(value.trim().to_string());
            }
        }
    }

    status.map(|status| HeadResult {
        status,
        content_type,
    })
}
