//! First-run welcome text, shown once per user.

use pxd_core::prefs::Preferences;
use std::path::Path;

const WELCOME: &str = "\
Welcome to pxd.
pxd finds every image of a pixiv work on the mirror and saves the ones you pick.

Choose where images go:
  pxd folder set <DIR>     save into a folder of your choice
  pxd save --to-cache ...  keep them in the app cache only
";

/// Prints the welcome text on the first run and records that it was shown.
/// Returns true if it was printed. Preference errors are logged, never fatal.
pub fn show_welcome_once(prefs_path: &Path) -> bool {
    let mut prefs = match Preferences::load_from_path(prefs_path) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("could not read prefs: {:#}", e);
            return false;
        }
    };
    if prefs.welcome_shown {
        return false;
    }
    eprintln!("{}", WELCOME);
    prefs.welcome_shown = true;
    if let Err(e) = prefs.save_to_path(prefs_path) {
        tracing::warn!("could not save prefs: {:#}", e);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shown_only_once() {
        let state = tempfile::tempdir().unwrap();
        let path = state.path().join("prefs.json");
        assert!(show_welcome_once(&path));
        assert!(!show_welcome_once(&path));
        assert!(Preferences::load_from_path(&path).unwrap().welcome_shown);
    }

    #[test]
    fn keeps_selected_folder() {
        let state = tempfile::tempdir().unwrap();
        let path = state.path().join("prefs.json");
        Preferences {
            selected_folder: Some("/srv/pics".to_string()),
            welcome_shown: false,
        }
        .save_to_path(&path)
        .unwrap();
        assert!(show_welcome_once(&path));
        let prefs = Preferences::load_from_path(&path).unwrap();
        assert_eq!(prefs.selected_folder.as_deref(), Some("/srv/pics"));
    }
}
