//! `pxd cache path|list|clear` – inspect the local image cache.

use anyhow::Result;

use crate::cli::context::AppContext;
use crate::cli::CacheAction;

pub fn run_cache(ctx: &AppContext, action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Path => println!("{}", ctx.cache.dir().display()),
        CacheAction::List => {
            let entries = ctx.cache.entries()?;
            if entries.is_empty() {
                println!("Cache is empty.");
            } else {
                println!("{:<12} {}", "SIZE", "NAME");
                for e in entries {
                    println!("{:<12} {}", e.size, e.name);
                }
            }
        }
        CacheAction::Clear => {
            let removed = ctx.cache.clear()?;
            println!("Removed {} cached file(s)", removed);
        }
    }
    Ok(())
}
