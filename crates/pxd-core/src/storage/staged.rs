//! Sequential writer for a uniquely named `.part` file that is renamed into place on finalize.

use std::ffi::OsStr;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Temp file being filled with one image. Call `finalize` after the last write.
///
/// Each writer gets its own temp file, so several saves of the same name can
/// run at once; the last one to finalize wins.
pub struct StagedFile {
    file: BufWriter<NamedTempFile>,
    final_path: PathBuf,
}

impl StagedFile {
    /// Create a fresh temp file beside `final_path`, named `.<name>.<random>.part`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let parent = match final_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let name = final_path
            .file_name()
            .unwrap_or_else(|| OsStr::new("image"))
            .to_string_lossy();
        let file = tempfile::Builder::new()
            .prefix(&format!(".{}.", name))
            .suffix(super::TEMP_SUFFIX)
            .tempfile_in(parent)?;
        Ok(StagedFile {
            file: BufWriter::new(file),
            final_path: final_path.to_path_buf(),
        })
    }

    /// Path to the current temp file.
    pub fn temp_path(&self) -> &Path {
        self.file.get_ref().path()
    }

    /// Path the file will have after `finalize`.
    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    /// Flush, sync, and atomically rename the temp file to the final path.
    pub fn finalize(self) -> io::Result<PathBuf> {
        let file = self.file.into_inner().map_err(|e| e.into_error())?;
        file.as_file().sync_all()?;
        file.persist(&self.final_path).map_err(|e| e.error)?;
        tracing::debug!("finalized {}", self.final_path.display());
        Ok(self.final_path)
    }
}

impl Write for StagedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
