//! Filesystem folder destination, addressed by a persisted handle string.

use std::io;
use std::path::{Path, PathBuf};

use super::{DestinationCapability, StagedWrite};
use crate::storage::StagedFile;

/// A folder on the local filesystem.
///
/// The handle is either an absolute path or a `file://` URL. Handles that are
/// relative or otherwise unparseable produce a destination that never validates.
#[derive(Debug, Clone)]
pub struct FolderDestination {
    handle: String,
    root: Option<PathBuf>,
}

impl FolderDestination {
    pub fn from_handle(handle: &str) -> Self {
        Self {
            handle: handle.to_string(),
            root: handle_to_path(handle),
        }
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Resolved directory, if the handle could be parsed.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

fn handle_to_path(handle: &str) -> Option<PathBuf> {
    let handle = handle.trim();
    if handle.is_empty() {
        return None;
    }
    let path = if handle.starts_with("file:") {
        url::Url::parse(handle).ok()?.to_file_path().ok()?
    } else {
        PathBuf::from(handle)
    };
    if path.is_absolute() {
        Some(path)
    } else {
        None
    }
}

impl DestinationCapability for FolderDestination {
    /// A directory this process can actually create files in. The check
    /// creates an unnamed temp file there, which is gone once dropped.
    fn validate(&self) -> bool {
        let Some(root) = &self.root else {
            return false;
        };
        match std::fs::metadata(root) {
            Ok(meta) if meta.is_dir() => match tempfile::tempfile_in(root) {
                Ok(_) => true,
                Err(e) => {
                    tracing::debug!("{} is not writable: {}", root.display(), e);
                    false
                }
            },
            _ => false,
        }
    }

    fn exists(&self, name: &str) -> bool {
        self.root
            .as_ref()
            .map(|root| root.join(name).exists())
            .unwrap_or(false)
    }

    fn open_for_write(&self, name: &str, mime: &str) -> io::Result<Box<dyn StagedWrite>> {
        let root = self.root.as_ref().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("invalid folder handle: {}", self.handle),
            )
        })?;
        tracing::debug!(mime, "writing {} into {}", name, root.display());
        Ok(Box::new(StagedFile::create(&root.join(name))?))
    }

    fn describe(&self) -> String {
        match &self.root {
            Some(root) => root.display().to_string(),
            None => self.handle.clone(),
        }
    }
}
