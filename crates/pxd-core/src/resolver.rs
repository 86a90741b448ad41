//! Resolver: discovers every image variant the mirror holds for an identifier.
//!
//! Probes `<id>.jpg`/`<id>.png`, then `<id>-2.*`, `<id>-3.*`, ... and stops at
//! the first index where neither extension is confirmed. A failed probe and a
//! missing image both end the scan; the resolver never reports an error.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::locator::{Candidate, ContentId, Extension, ResolvedLocator};
use crate::transport::Transport;

/// Default mirror serving `<id>[-<index>].{jpg,png}`.
pub const DEFAULT_MIRROR_BASE: &str = "https://pixiv.re";

/// Confirmed locators in ascending index order, contiguous from index 1.
pub type ResultSet = Vec<ResolvedLocator>;

/// Where and how far to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorConfig {
    /// Base URL of the mirror, without trailing slash.
    pub base: String,
    /// Highest index to probe. `None` probes until the first gap.
    pub max_index: Option<u32>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_MIRROR_BASE.to_string(),
            max_index: None,
        }
    }
}

/// True only if a HEAD on `url` answers 200 with an image content type.
/// Transport failures count as "not there".
pub fn image_exists(transport: &dyn Transport, url: &str) -> bool {
    match transport.head(url) {
        Ok(head) => {
            tracing::debug!(
                status = head.status,
                content_type = head.content_type.as_deref().unwrap_or("-"),
                "probe {}",
                url
            );
            head.is_image()
        }
        Err(e) => {
            tracing::debug!("probe {} failed: {}", url, e);
            false
        }
    }
}

/// Resolves `identifier` against the mirror. An empty identifier yields an
/// empty set without touching the network.
pub fn resolve(identifier: &str, transport: &dyn Transport, mirror: &MirrorConfig) -> ResultSet {
    let Some(id) = ContentId::parse(identifier) else {
        return Vec::new();
    };

    let mut found = Vec::new();
    let mut index = 1u32;
    loop {
        if mirror.max_index.is_some_and(|max| index > max) {
            tracing::info!("stopped probing {} at configured cap {}", id, index - 1);
            break;
        }
        let hit = Extension::ALL
            .iter()
            .map(|ext| Candidate::new(&mirror.base, &id, index, *ext))
            .find(|c| image_exists(transport, &c.url));
        match hit {
            Some(candidate) => found.push(candidate.confirm()),
            None => break,
        }
        index = match index.checked_add(1) {
            Some(next) => next,
            None => break,
        };
    }

    tracing::info!("resolved {} image(s) for {}", found.len(), id);
    found
}

/// Runs `resolve` on the blocking pool and hands the result back to the caller's task.
pub async fn resolve_in_background<T>(
    identifier: String,
    transport: Arc<T>,
    mirror: MirrorConfig,
) -> Result<ResultSet>
where
    T: Transport + 'static,
{
    tokio::task::spawn_blocking(move || resolve(&identifier, transport.as_ref(), &mirror))
        .await
        .context("resolve task join")
}
