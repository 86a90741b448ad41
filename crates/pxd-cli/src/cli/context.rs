//! Shared state for one CLI invocation.

use anyhow::Result;
use pxd_core::cache::ImageCache;
use pxd_core::config::{self, PxdConfig};
use pxd_core::prefs::Preferences;
use pxd_core::transport::CurlTransport;
use std::path::PathBuf;
use std::sync::Arc;

pub struct AppContext {
    pub cfg: PxdConfig,
    pub transport: Arc<CurlTransport>,
    pub cache: ImageCache,
    pub prefs_path: PathBuf,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let transport = Arc::new(CurlTransport::new(cfg.transport_options()));
        Ok(Self {
            cache: ImageCache::open_default()?,
            prefs_path: Preferences::default_path()?,
            transport,
            cfg,
        })
    }
}
