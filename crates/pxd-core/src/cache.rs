//! Local image cache.
//!
//! Entries are stored as `<trailing-filename-segment>.1` inside an
//! `image_cache` directory under the XDG cache home. The `.1` suffix is a
//! legacy naming scheme kept so existing caches stay readable.

use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};

use crate::locator::{filename_from_url_path, sanitize_filename};
use crate::storage::{StagedFile, TEMP_SUFFIX};

/// Name of the cache subdirectory.
pub const CACHE_DIR_NAME: &str = "image_cache";

/// Suffix appended to the filename of every cache entry.
pub const CACHE_ENTRY_SUFFIX: &str = ".1";

/// One file in the cache directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub name: String,
    pub size: u64,
}

/// Handle to the cache directory. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    /// Cache rooted at `dir`. The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default cache location: `~/.cache/pxd/image_cache`.
    pub fn default_dir() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("pxd")?;
        Ok(xdg_dirs.get_cache_home().join("pxd").join(CACHE_DIR_NAME))
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache key for a locator: its trailing filename segment plus `.1`.
    pub fn cache_key(locator: &str) -> Option<String> {
        let filename = filename_from_url_path(locator)?;
        Some(format!("{}{}", sanitize_filename(&filename), CACHE_ENTRY_SUFFIX))
    }

    /// Path the entry for `locator` has (whether or not it exists).
    pub fn entry_path(&self, locator: &str) -> Option<PathBuf> {
        Self::cache_key(locator).map(|key| self.dir.join(key))
    }

    /// Path of the cached file for `locator`, if present.
    pub fn lookup(&self, locator: &str) -> Option<PathBuf> {
        self.entry_path(locator).filter(|p| p.is_file())
    }

    /// Opens the cache entry for `locator` for writing.
    pub fn open_entry(&self, locator: &str) -> io::Result<StagedFile> {
        let path = self.entry_path(locator).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no filename in locator: {}", locator),
            )
        })?;
        std::fs::create_dir_all(&self.dir)?;
        StagedFile::create(&path)
    }

    /// Lists complete entries, sorted by name. A missing directory is an empty cache.
    pub fn entries(&self) -> Result<Vec<CacheEntry>> {
        let read_dir = match std::fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("read cache dir: {}", self.dir.display()))
            }
        };
        let mut out = Vec::new();
        for entry in read_dir {
            let entry = entry.with_context(|| format!("read cache dir: {}", self.dir.display()))?;
            let meta = entry.metadata()?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !meta.is_file() || name.ends_with(TEMP_SUFFIX) {
                continue;
            }
            out.push(CacheEntry {
                name,
                size: meta.len(),
            });
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    /// Removes every file in the cache directory (including leftover `.part` files).
    /// Returns the number of files removed.
    pub fn clear(&self) -> Result<usize> {
        let read_dir = match std::fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(e).with_context(|| format!("read cache dir: {}", self.dir.display()))
            }
        };
        let mut removed = 0;
        for entry in read_dir {
            let path = entry?.path();
            if path.is_file() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("remove {}", path.display()))?;
                removed += 1;
            }
        }
        tracing::info!("cleared {} cache file(s) from {}", removed, self.dir.display());
        Ok(removed)
    }
}
