//! Locator model: content identifiers, candidate URLs on the mirror, and
//! filename derivation for stored images.
//!
//! A candidate for identifier `456` lives at `<base>/456.jpg` for index 1 and
//! `<base>/456-<index>.jpg` for every later index (same for `.png`).

mod mime;
mod path;
mod sanitize;

use serde::Serialize;
use std::fmt;

pub use mime::{mime_for_filename, MIME_JPEG, MIME_OCTET_STREAM, MIME_PNG};
pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

/// User-supplied content identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentId(String);

impl ContentId {
    /// Returns `None` for an empty (or whitespace-only) identifier.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Image extensions served by the mirror, in probe preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Extension {
    Jpg,
    Png,
}

impl Extension {
    /// Probe order: `.jpg` wins when both exist.
    pub const ALL: [Extension; 2] = [Extension::Jpg, Extension::Png];

    pub fn as_str(self) -> &'static str {
        match self {
            Extension::Jpg => "jpg",
            Extension::Png => "png",
        }
    }
}

/// A computed location that may or may not hold an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub index: u32,
    pub extension: Extension,
    pub url: String,
}

impl Candidate {
    /// Builds the candidate URL for `id` at 1-based `index` under `base`.
    pub fn new(base: &str, id: &ContentId, index: u32, extension: Extension) -> Self {
        let stem = if index <= 1 {
            id.as_str().to_string()
        } else {
            format!("{}-{}", id, index)
        };
        let url = format!(
            "{}/{}.{}",
            base.trim_end_matches('/'),
            stem,
            extension.as_str()
        );
        Self {
            index,
            extension,
            url,
        }
    }

    /// Marks this candidate as confirmed by a successful probe.
    pub fn confirm(self) -> ResolvedLocator {
        ResolvedLocator {
            index: self.index,
            extension: self.extension,
            url: self.url,
        }
    }
}

/// A candidate confirmed to reference an existing image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocator {
    pub index: u32,
    pub extension: Extension,
    pub url: String,
}

impl ResolvedLocator {
    /// Trailing filename segment of the URL (e.g. `456-2.jpg`).
    pub fn filename(&self) -> Option<String> {
        filename_from_url_path(&self.url)
    }
}

/// True if `target` looks like a direct http(s) locator rather than an identifier.
pub fn is_locator(target: &str) -> bool {
    match url::Url::parse(target) {
        Ok(u) => u.scheme() == "http" || u.scheme() == "https",
        Err(_) => false,
    }
}
