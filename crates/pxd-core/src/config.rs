use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::resolver::{MirrorConfig, DEFAULT_MIRROR_BASE};
use crate::transport::TransportOptions;

/// Global configuration loaded from `~/.config/pxd/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PxdConfig {
    /// Mirror base URL; images live at `<mirror_base>/<id>[-<index>].{jpg,png}`.
    pub mirror_base: String,
    /// Connect timeout for every request, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout for one HEAD probe, in seconds.
    pub probe_timeout_secs: u64,
    /// Total timeout for one image GET, in seconds.
    pub fetch_timeout_secs: u64,
    /// Optional User-Agent header.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Optional cap on probed indices (None = probe until the first gap).
    #[serde(default)]
    pub max_index: Option<u32>,
}

impl Default for PxdConfig {
    fn default() -> Self {
        Self {
            mirror_base: DEFAULT_MIRROR_BASE.to_string(),
            connect_timeout_secs: 15,
            probe_timeout_secs: 30,
            fetch_timeout_secs: 300,
            user_agent: Some(concat!("pxd/", env!("CARGO_PKG_VERSION")).to_string()),
            max_index: None,
        }
    }
}

impl PxdConfig {
    pub fn mirror(&self) -> MirrorConfig {
        MirrorConfig {
            base: self.mirror_base.trim_end_matches('/').to_string(),
            max_index: self.max_index,
        }
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            probe_timeout: Duration::from_secs(self.probe_timeout_secs),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pxd")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PxdConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PxdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PxdConfig = toml::from_str(&data)?;
    Ok(cfg)
}
