//! Acquirer: fetches one resolved locator and persists it to a destination.
//!
//! The local cache is consulted first. A cached image is copied into a folder
//! destination without any network transfer; otherwise the image is streamed
//! from the mirror straight into the destination.

mod error;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::ImageCache;
use crate::destination::{Destination, StagedWrite};
use crate::locator::{filename_from_url_path, mime_for_filename, sanitize_filename};
use crate::transport::Transport;

pub use error::AcquireError;

/// What a successful acquisition did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// Cached bytes were copied into the folder; no network transfer.
    SavedFromCache { name: String, folder: String },
    /// Destination was the cache and the entry already existed.
    AlreadyCached { name: String, path: PathBuf },
    /// Fetched from the mirror and written to the destination.
    Downloaded {
        name: String,
        mime: &'static str,
        bytes: u64,
        location: String,
    },
}

impl AcquireOutcome {
    /// Stored filename.
    pub fn name(&self) -> &str {
        match self {
            AcquireOutcome::SavedFromCache { name, .. }
            | AcquireOutcome::AlreadyCached { name, .. }
            | AcquireOutcome::Downloaded { name, .. } => name,
        }
    }
}

/// Acquires `locator` into `destination`, consulting `cache` first.
///
/// A folder destination is validated before anything else; an invalid one
/// fails with no I/O at all.
pub fn acquire(
    locator: &str,
    destination: &Destination,
    cache: &ImageCache,
    transport: &dyn Transport,
) -> Result<AcquireOutcome, AcquireError> {
    let filename = filename_from_url_path(locator)
        .ok_or_else(|| AcquireError::BadLocator(locator.to_string()))?;

    if let Destination::Folder(folder) = destination {
        if !folder.validate() {
            tracing::warn!("rejecting save of {}: invalid folder {}", locator, folder.describe());
            return Err(AcquireError::InvalidDestination(folder.describe()));
        }
    }

    let name = sanitize_filename(&filename);
    let mime = mime_for_filename(&filename);

    if let Some(cached) = cache.lookup(locator) {
        tracing::debug!("cache hit for {}: {}", locator, cached.display());
        return match destination {
            Destination::Cache => Ok(AcquireOutcome::AlreadyCached { name, path: cached }),
            Destination::Folder(folder) => {
                let mut source = File::open(&cached)?;
                let mut out = folder.open_for_write(&name, mime)?;
                std::io::copy(&mut source, &mut out)?;
                out.commit()?;
                tracing::info!("copied cached {} to {}", name, folder.describe());
                Ok(AcquireOutcome::SavedFromCache {
                    name,
                    folder: folder.describe(),
                })
            }
        };
    }

    tracing::debug!("cache miss for {}", locator);
    let (mut out, location): (Box<dyn StagedWrite>, String) = match destination {
        Destination::Cache => {
            let staged = cache.open_entry(locator)?;
            let location = staged.final_path().display().to_string();
            (Box::new(staged) as Box<dyn StagedWrite>, location)
        }
        Destination::Folder(folder) => (folder.open_for_write(&name, mime)?, folder.describe()),
    };
    let bytes = transport.get_into(locator, &mut out)?;
    out.commit()?;
    tracing::info!("saved {} ({} bytes, {}) to {}", name, bytes, mime, location);

    Ok(AcquireOutcome::Downloaded {
        name,
        mime,
        bytes,
        location,
    })
}

/// Short user-visible message for the result of one acquisition.
pub fn report(result: &Result<AcquireOutcome, AcquireError>) -> String {
    match result {
        Ok(AcquireOutcome::SavedFromCache { name, .. }) => {
            format!("Image saved to folder: {}", name)
        }
        Ok(AcquireOutcome::AlreadyCached { name, .. }) => format!("Already cached: {}", name),
        Ok(AcquireOutcome::Downloaded { name, .. }) => format!("Save successful: {}", name),
        Err(e @ AcquireError::InvalidDestination(_)) => e.to_string(),
        Err(e) => format!("Save failed: {}", e),
    }
}

/// Acquires and converts the result into a message. Never fails.
pub fn acquire_and_report(
    locator: &str,
    destination: &Destination,
    cache: &ImageCache,
    transport: &dyn Transport,
) -> String {
    let result = acquire(locator, destination, cache, transport);
    if let Err(e) = &result {
        tracing::warn!("save of {} failed: {}", locator, e);
    }
    report(&result)
}

/// Runs `acquire` on the blocking pool and hands the result back to the caller's task.
pub async fn acquire_in_background<T>(
    locator: String,
    destination: Destination,
    cache: ImageCache,
    transport: Arc<T>,
) -> Result<AcquireOutcome, AcquireError>
where
    T: Transport + 'static,
{
    tokio::task::spawn_blocking(move || {
        acquire(&locator, &destination, &cache, transport.as_ref())
    })
    .await
    .unwrap_or_else(|e| Err(AcquireError::Task(e.to_string())))
}
