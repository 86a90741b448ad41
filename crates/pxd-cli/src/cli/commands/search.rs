//! `pxd search <id>` – list the images the mirror has for a content ID.

use anyhow::Result;
use pxd_core::destination::Destination;
use pxd_core::resolver;
use std::sync::Arc;

use super::save::acquire_all;
use crate::cli::context::AppContext;

pub async fn run_search(ctx: &AppContext, id: &str, prefetch: bool, json: bool) -> Result<()> {
    let set =
        resolver::resolve_in_background(id.to_string(), Arc::clone(&ctx.transport), ctx.cfg.mirror())
            .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else if set.is_empty() {
        println!("No images found for the given ID.");
    } else {
        println!("{:<6} {}", "INDEX", "URL");
        for r in &set {
            println!("{:<6} {}", r.index, r.url);
        }
    }

    if prefetch && !set.is_empty() {
        let locators = set.into_iter().map(|r| r.url).collect();
        for report in acquire_all(ctx, locators, Destination::Cache).await {
            // Keep stdout clean for --json consumers.
            eprintln!("{}", report.message);
        }
    }
    Ok(())
}
