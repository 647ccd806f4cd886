use crate::addon_list::DEFAULT_ADDON_LIST;
use crate::catalog::DEFAULT_CATALOG_BASE_URL;
use crate::transport::CurlOptions;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

fn default_user_agent() -> String {
    concat!("xpifetch/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Global configuration loaded from `~/.config/xpifetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpifetchConfig {
    /// Catalog endpoint; the addon id is appended as a path segment.
    pub catalog_base_url: String,
    /// Addon list used by `xpifetch fetch` when `--list` is not given.
    pub addon_list: PathBuf,
    /// Where packages are written (None = current directory).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Optional connect timeout in seconds. Unset means no limit.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Optional whole-request timeout in seconds. Unset means no limit.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for XpifetchConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            addon_list: PathBuf::from(DEFAULT_ADDON_LIST),
            output_dir: None,
            user_agent: default_user_agent(),
            connect_timeout_secs: None,
            timeout_secs: None,
        }
    }
}

impl XpifetchConfig {
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            user_agent: Some(self.user_agent.clone()),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("xpifetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<XpifetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = XpifetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: XpifetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
