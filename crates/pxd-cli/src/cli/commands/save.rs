//! `pxd save <target>...` – save images into the selected folder or the cache.

use anyhow::{anyhow, Result};
use pxd_core::acquirer;
use pxd_core::destination::{Destination, DestinationCapability, FolderDestination};
use pxd_core::locator::{self, ResolvedLocator};
use pxd_core::prefs::Preferences;
use pxd_core::resolver;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;

use super::folder::absolutize;
use crate::cli::context::AppContext;

/// Result line for one locator.
#[derive(Debug)]
pub(crate) struct SaveReport {
    pub position: usize,
    pub locator: String,
    pub ok: bool,
    pub message: String,
}

pub async fn run_save(
    ctx: &AppContext,
    targets: &[String],
    to_cache: bool,
    folder: Option<String>,
    pick: &[u32],
) -> Result<()> {
    let destination = choose_destination(&ctx.prefs_path, to_cache, folder)?;

    let mut locators = Vec::new();
    for target in targets {
        if locator::is_locator(target) {
            locators.push(target.clone());
            continue;
        }
        let set = resolver::resolve_in_background(
            target.clone(),
            Arc::clone(&ctx.transport),
            ctx.cfg.mirror(),
        )
        .await?;
        if set.is_empty() {
            println!("No images found for {}", target);
            continue;
        }
        let selected = select_locators(&set, pick);
        if selected.is_empty() {
            println!("{} has {} image(s); none matched --pick", target, set.len());
        }
        locators.extend(selected.into_iter().map(|r| r.url.clone()));
    }

    let locators = dedup_locators(locators);
    if locators.is_empty() {
        anyhow::bail!("nothing to save");
    }

    let reports = acquire_all(ctx, locators, destination).await;
    let total = reports.len();
    let failed = reports.iter().filter(|r| !r.ok).count();
    for report in &reports {
        if report.ok {
            println!("{}", report.message);
        } else {
            println!("{} ({})", report.message, report.locator);
        }
    }
    if failed > 0 {
        anyhow::bail!("{} of {} save(s) failed", failed, total);
    }
    Ok(())
}

/// Cache if asked, else the explicit folder, else the stored folder.
///
/// A folder is checked here, before any target is resolved.
fn choose_destination(
    prefs_path: &Path,
    to_cache: bool,
    folder: Option<String>,
) -> Result<Destination> {
    if to_cache {
        return Ok(Destination::Cache);
    }
    let handle = match folder {
        Some(h) => absolutize(&h)?,
        None => Preferences::load_from_path(prefs_path)?
            .selected_folder
            .ok_or_else(|| {
                anyhow!("No folder selected; run `pxd folder set <DIR>` or pass --to-cache")
            })?,
    };
    let folder = FolderDestination::from_handle(&handle);
    if !folder.validate() {
        anyhow::bail!("error path: {} is not a writable folder", handle);
    }
    Ok(Destination::folder(folder))
}

/// Drops repeated locators, keeping the first occurrence of each.
fn dedup_locators(locators: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    locators
        .into_iter()
        .filter(|l| seen.insert(l.clone()))
        .collect()
}

/// All locators when `pick` is empty, else those whose index is picked.
pub(crate) fn select_locators<'a>(
    set: &'a [ResolvedLocator],
    pick: &[u32],
) -> Vec<&'a ResolvedLocator> {
    if pick.is_empty() {
        return set.iter().collect();
    }
    set.iter().filter(|r| pick.contains(&r.index)).collect()
}

/// Acquires every locator concurrently; reports come back in input order.
pub(crate) async fn acquire_all(
    ctx: &AppContext,
    locators: Vec<String>,
    destination: Destination,
) -> Vec<SaveReport> {
    let mut tasks = JoinSet::new();
    for (position, locator) in locators.iter().cloned().enumerate() {
        let destination = destination.clone();
        let cache = ctx.cache.clone();
        let transport = Arc::clone(&ctx.transport);
        tasks.spawn(async move {
            let result =
                acquirer::acquire_in_background(locator.clone(), destination, cache, transport)
                    .await;
            (position, locator, result)
        });
    }

    let mut reports = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((position, locator, result)) => {
                if let Err(e) = &result {
                    tracing::warn!("save of {} failed: {}", locator, e);
                }
                reports.push(SaveReport {
                    position,
                    ok: result.is_ok(),
                    message: acquirer::report(&result),
                    locator,
                });
            }
            Err(e) => tracing::error!("save task failed: {}", e),
        }
    }
    finish_reports(&locators, reports)
}

/// Adds a failed report for every locator whose task never reported back,
/// then orders reports by input position.
fn finish_reports(locators: &[String], mut reports: Vec<SaveReport>) -> Vec<SaveReport> {
    let reported: HashSet<usize> = reports.iter().map(|r| r.position).collect();
    for (position, locator) in locators.iter().enumerate() {
        if !reported.contains(&position) {
            reports.push(SaveReport {
                position,
                locator: locator.clone(),
                ok: false,
                message: "Save failed: save task did not finish".to_string(),
            });
        }
    }
    reports.sort_by_key(|r| r.position);
    reports
}
