//! Logging for `pxd`: appends to a log file in the XDG state dir, or writes to
//! stderr when that file cannot be opened.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Names the XDG subdirectory and the log file (`<state>/pxd/pxd.log`).
pub const APP_NAME: &str = "pxd";

/// Used when `RUST_LOG` is unset or unparseable. Covers the binary and both crates.
const DEFAULT_FILTER: &str = "info,pxd=debug,pxd_core=debug,pxd_cli=debug";

/// Where `init_logging` appends: `~/.local/state/pxd/pxd.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix(APP_NAME)?;
    Ok(dirs
        .get_state_home()
        .join(APP_NAME)
        .join(format!("{}.log", APP_NAME)))
}

/// One event's destination. A failed handle clone degrades to stderr.
enum LogSink {
    File(File),
    Stderr,
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

/// Hands each event a clone of the open log file.
struct SharedLogFile(File);

impl<'a> MakeWriter<'a> for SharedLogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => LogSink::File(f),
            Err(_) => LogSink::Stderr,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber writing to [`log_file_path`].
///
/// Errors if the file cannot be opened or a subscriber is already set; the
/// CLI then calls [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(SharedLogFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!("{} {} logging to {}", APP_NAME, env!("CARGO_PKG_VERSION"), path.display());
    Ok(())
}

/// Stderr-only subscriber. Never fails; a second install is ignored.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
