//! Where acquired images go: the local cache, or a user-granted folder.
//!
//! A folder is reached only through the `DestinationCapability` trait so the
//! acquirer never depends on how the folder handle was obtained or stored.

mod folder;

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use crate::storage::StagedFile;

pub use folder::FolderDestination;

/// Writable stream for one stored file. Nothing is visible under the final
/// name until `commit` succeeds.
pub trait StagedWrite: Write + Send {
    fn commit(self: Box<Self>) -> io::Result<()>;
}

impl StagedWrite for StagedFile {
    fn commit(self: Box<Self>) -> io::Result<()> {
        (*self).finalize().map(|_| ())
    }
}

/// Capability to write files into a user-owned folder.
pub trait DestinationCapability: Send + Sync {
    /// True if the handle still refers to a directory we may write to.
    fn validate(&self) -> bool;

    /// True if a file called `name` already exists in the folder.
    fn exists(&self, name: &str) -> bool;

    /// Opens `name` for writing; `mime` is the stored content type.
    fn open_for_write(&self, name: &str, mime: &str) -> io::Result<Box<dyn StagedWrite>>;

    /// Human-readable description of the folder for messages.
    fn describe(&self) -> String;
}

/// Target of one acquisition.
#[derive(Clone)]
pub enum Destination {
    /// The app-local image cache.
    Cache,
    /// A user-selected folder.
    Folder(Arc<dyn DestinationCapability>),
}

impl Destination {
    pub fn folder<D: DestinationCapability + 'static>(capability: D) -> Self {
        Destination::Folder(Arc::new(capability))
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Cache => f.write_str("Cache"),
            Destination::Folder(cap) => write!(f, "Folder({})", cap.describe()),
        }
    }
}
