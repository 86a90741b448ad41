//! `pxd folder set|show|clear` – manage the persisted save folder.

use anyhow::Result;
use pxd_core::destination::{DestinationCapability, FolderDestination};
use pxd_core::prefs::Preferences;
use std::path::Path;

use crate::cli::context::AppContext;
use crate::cli::FolderAction;

pub fn run_folder(ctx: &AppContext, action: FolderAction) -> Result<()> {
    match action {
        FolderAction::Set { handle } => {
            let handle = absolutize(&handle)?;
            let selected = set_folder(&ctx.prefs_path, &handle)?;
            println!("Selected folder: {}", selected.describe());
        }
        FolderAction::Show => match selected_folder(&ctx.prefs_path)? {
            Some(dest) if dest.validate() => println!("{}", dest.describe()),
            Some(dest) => println!("{} (missing or not writable)", dest.describe()),
            None => println!("No folder selected"),
        },
        FolderAction::Clear => {
            let mut prefs = Preferences::load_from_path(&ctx.prefs_path)?;
            prefs.selected_folder = None;
            prefs.save_to_path(&ctx.prefs_path)?;
            println!("Folder selection cleared");
        }
    }
    Ok(())
}

/// Relative paths are taken relative to the working directory; URLs pass through.
pub(crate) fn absolutize(handle: &str) -> Result<String> {
    let path = Path::new(handle);
    if handle.starts_with("file:") || path.is_absolute() {
        return Ok(handle.to_string());
    }
    Ok(std::env::current_dir()?.join(path).display().to_string())
}

/// Validates `handle` and stores it as the selected folder.
pub(crate) fn set_folder(prefs_path: &Path, handle: &str) -> Result<FolderDestination> {
    let dest = FolderDestination::from_handle(handle);
    if !dest.validate() {
        anyhow::bail!("error path: {} is not a writable folder", handle);
    }
    let mut prefs = Preferences::load_from_path(prefs_path)?;
    prefs.selected_folder = Some(handle.to_string());
    prefs.save_to_path(prefs_path)?;
    tracing::info!("selected folder {}", dest.describe());
    Ok(dest)
}

pub(crate) fn selected_folder(prefs_path: &Path) -> Result<Option<FolderDestination>> {
    Ok(Preferences::load_from_path(prefs_path)?
        .selected_folder
        .map(|h| FolderDestination::from_handle(&h)))
}
