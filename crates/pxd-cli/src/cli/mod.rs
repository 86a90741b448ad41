//! CLI for PXD: resolve image sets on the mirror and save them.

mod commands;
mod context;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use commands::{run_cache, run_completions, run_folder, run_save, run_search, show_welcome_once};
use context::AppContext;

/// Top-level CLI for PXD.
#[derive(Debug, Parser)]
#[command(name = "pxd")]
#[command(about = "PXD: find and save image sets from a pixiv mirror", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List every image the mirror has for a content ID.
    Search {
        /// Content ID (e.g. 12345678).
        id: String,

        /// Also download every image into the local cache.
        #[arg(long)]
        prefetch: bool,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Save images given as locator URLs or content IDs.
    Save {
        /// Locator URL (https://...) or content ID to resolve first.
        #[arg(required = true, value_name = "TARGET")]
        targets: Vec<String>,

        /// Save into the local cache instead of a folder.
        #[arg(long, conflicts_with = "folder")]
        to_cache: bool,

        /// Folder to save into (defaults to the selected folder).
        #[arg(long, value_name = "HANDLE")]
        folder: Option<String>,

        /// Only save these 1-based image indices of each resolved ID (e.g. --pick 1,3).
        #[arg(long, value_name = "N", value_delimiter = ',', value_parser = clap::value_parser!(u32).range(1..))]
        pick: Vec<u32>,
    },

    /// Manage the folder images are saved to.
    Folder {
        #[command(subcommand)]
        action: FolderAction,
    },

    /// Inspect or clear the local image cache.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum FolderAction {
    /// Select the folder to save into (absolute path or file:// URL).
    Set {
        /// Folder handle.
        handle: String,
    },
    /// Show the selected folder.
    Show,
    /// Forget the selected folder.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Print the cache directory.
    Path,
    /// List cached images.
    List,
    /// Delete every cached image.
    Clear,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let ctx = AppContext::load()?;
        show_welcome_once(&ctx.prefs_path);

        match cli.command {
            CliCommand::Search { id, prefetch, json } => run_search(&ctx, &id, prefetch, json).await?,
            CliCommand::Save {
                targets,
                to_cache,
                folder,
                pick,
            } => run_save(&ctx, &targets, to_cache, folder, &pick).await?,
            CliCommand::Folder { action } => run_folder(&ctx, action)?,
            CliCommand::Cache { action } => run_cache(&ctx, action)?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
