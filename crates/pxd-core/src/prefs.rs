//! Persisted user preferences (JSON under the XDG state dir): the selected
//! folder handle and the first-run flag.
//!
//! The resolver and acquirer never read this; the CLI loads it and passes the
//! folder on as an opaque destination.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Opaque folder handle (absolute path or `file://` URL).
    #[serde(default)]
    pub selected_folder: Option<String>,
    /// Set once the first-run welcome has been shown.
    #[serde(default)]
    pub welcome_shown: bool,
}

impl Preferences {
    /// Default path: `~/.local/state/pxd/prefs.json`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("pxd")?;
        Ok(xdg_dirs.get_state_home().join("pxd").join("prefs.json"))
    }

    /// Loads preferences; a missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Preferences> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Preferences::default()),
            Err(e) => return Err(e).with_context(|| format!("read prefs: {}", path.display())),
        };
        serde_json::from_slice(&bytes).with_context(|| format!("parse prefs: {}", path.display()))
    }

    /// Saves preferences (creates parent dir if needed).
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serialize prefs")?;
        std::fs::write(path, json).with_context(|| format!("write prefs: {}", path.display()))?;
        Ok(())
    }
}
