//! MIME type selection from a filename extension.

pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// Picks the stored MIME type for `filename` (case-insensitive on the extension).
pub fn mime_for_filename(filename: &str) -> &'static str {
    let lower = filename.to_ascii_lowercase();
    if lower.ends_with(".jpg") {
        MIME_JPEG
    } else if lower.ends_with(".png") {
        MIME_PNG
    } else {
        MIME_OCTET_STREAM
    }
}
