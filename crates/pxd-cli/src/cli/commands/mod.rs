//! CLI command handlers. Each command is in its own file.

mod cache;
mod completions;
mod folder;
mod save;
mod search;
mod welcome;

pub use cache::run_cache;
pub use completions::run_completions;
pub use folder::run_folder;
pub use save::run_save;
pub use search::run_search;
pub use welcome::show_welcome_once;
