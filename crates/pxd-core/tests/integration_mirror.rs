//! Integration test: resolve and save against a local mirror over real HTTP (curl).

mod common;

use pxd_core::acquirer::{self, AcquireOutcome};
use pxd_core::cache::ImageCache;
use pxd_core::destination::{Destination, FolderDestination};
use pxd_core::resolver::{self, MirrorConfig};
use pxd_core::transport::{CurlTransport, Transport};
use std::sync::Arc;
use tempfile::tempdir;

fn mirror_config(base: &str) -> MirrorConfig {
    MirrorConfig {
        base: base.to_string(),
        max_index: None,
    }
}

#[test]
fn resolves_contiguous_jpgs() {
    let mirror = common::mirror_server::start(&[
        ("456.jpg", "image/jpeg", &b"one"[..]),
        ("456-2.jpg", "image/jpeg", &b"two"[..]),
        ("456-3.jpg", "image/jpeg", &b"three"[..]),
        ("456-5.jpg", "image/jpeg", &b"five"[..]),
    ]);
    let transport = CurlTransport::default();
    let set = resolver::resolve("456", &transport, &mirror_config(&mirror.base));
    let urls: Vec<String> = set.iter().map(|r| r.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            mirror.url("456.jpg"),
            mirror.url("456-2.jpg"),
            mirror.url("456-3.jpg"),
        ]
    );
    assert_eq!(mirror.get_count(), 0, "resolution only uses HEAD");
    // Three jpg hits, then jpg and png misses at index 4.
    assert_eq!(mirror.head_count(), 5);
}

#[test]
fn single_png_and_non_image_gap() {
    let mirror = common::mirror_server::start(&[
        ("123.png", "image/png", &b"png"[..]),
        ("123-2.jpg", "text/html", &b"<html>"[..]),
    ]);
    let transport = CurlTransport::default();
    let set = resolver::resolve("123", &transport, &mirror_config(&mirror.base));
    assert_eq!(set.len(), 1);
    assert!(set[0].url.ends_with("123.png"));
}

#[test]
fn unreachable_mirror_yields_empty_set() {
    // Nothing listens on port 9 (discard) on a typical test host.
    let transport = CurlTransport::default();
    let set = resolver::resolve("1", &transport, &mirror_config("http://127.0.0.1:9"));
    assert!(set.is_empty());
}

#[test]
fn head_reports_status_and_type() {
    let mirror = common::mirror_server::start(&[("9.png", "image/png", &b"png"[..])]);
    let transport = CurlTransport::default();
    let hit = transport.head(&mirror.url("9.png")).unwrap();
    assert!(hit.is_image());
    let miss = transport.head(&mirror.url("9.jpg")).unwrap();
    assert_eq!(miss.status, 404);
    assert!(!miss.is_image());
}

#[test]
fn download_to_folder_then_cache_hit_skips_network() {
    let body: Vec<u8> = (0u8..=255).cycle().take(64 * 1024).collect();
    let mirror = common::mirror_server::start(&[("777-2.png", "image/png", &body[..])]);
    let transport = CurlTransport::default();
    let state = tempdir().unwrap();
    let cache = ImageCache::new(state.path().join("image_cache"));
    let url = mirror.url("777-2.png");

    // Prefetch into the cache.
    let first = acquirer::acquire(&url, &Destination::Cache, &cache, &transport).unwrap();
    assert!(matches!(first, AcquireOutcome::Downloaded { bytes, .. } if bytes == body.len() as u64));
    assert_eq!(mirror.get_count(), 1);

    // Save into a folder: served from cache.
    let out = tempdir().unwrap();
    let dest = Destination::folder(FolderDestination::from_handle(out.path().to_str().unwrap()));
    let second = acquirer::acquire(&url, &dest, &cache, &transport).unwrap();
    assert!(matches!(second, AcquireOutcome::SavedFromCache { .. }));
    assert_eq!(mirror.get_count(), 1, "cache hit must not refetch");
    assert_eq!(std::fs::read(out.path().join("777-2.png")).unwrap(), body);
}

#[test]
fn missing_image_surfaces_network_error() {
    let mirror = common::mirror_server::start(&[]);
    let transport = CurlTransport::default();
    let state = tempdir().unwrap();
    let out = tempdir().unwrap();
    let cache = ImageCache::new(state.path().join("image_cache"));
    let dest = Destination::folder(FolderDestination::from_handle(out.path().to_str().unwrap()));

    let msg = acquirer::acquire_and_report(&mirror.url("1.jpg"), &dest, &cache, &transport);
    assert_eq!(msg, "Save failed: network: HTTP 404");
    assert!(!out.path().join("1.jpg").exists());
}

#[tokio::test]
async fn background_resolve_then_concurrent_saves() {
    let mirror = common::mirror_server::start(&[
        ("55.jpg", "image/jpeg", &b"a"[..]),
        ("55-2.png", "image/png", &b"bb"[..]),
        ("55-3.jpg", "image/jpeg", &b"ccc"[..]),
    ]);
    let transport = Arc::new(CurlTransport::default());
    let set = resolver::resolve_in_background(
        "55".to_string(),
        Arc::clone(&transport),
        mirror_config(&mirror.base),
    )
    .await
    .unwrap();
    assert_eq!(set.len(), 3);

    let state = tempdir().unwrap();
    let out = tempdir().unwrap();
    let cache = ImageCache::new(state.path().join("image_cache"));
    let dest = Destination::folder(FolderDestination::from_handle(out.path().to_str().unwrap()));

    let mut tasks = tokio::task::JoinSet::new();
    for locator in set {
        tasks.spawn(acquirer::acquire_in_background(
            locator.url,
            dest.clone(),
            cache.clone(),
            Arc::clone(&transport),
        ));
    }
    let mut saved = 0;
    while let Some(joined) = tasks.join_next().await {
        joined.unwrap().unwrap();
        saved += 1;
    }
    assert_eq!(saved, 3);
    assert_eq!(std::fs::read(out.path().join("55.jpg")).unwrap(), b"a");
    assert_eq!(std::fs::read(out.path().join("55-2.png")).unwrap(), b"bb");
    assert_eq!(std::fs::read(out.path().join("55-3.jpg")).unwrap(), b"ccc");
}
