//! Addon list: the JSON file naming which addons to fetch and from where.
//!
//! ```json
//! [
//!   { "name": "uBlock Origin", "source": "amo", "amoid": 607454 },
//!   { "name": "Internal Theme", "source": "url", "url": "https://example.org/theme.xpi" }
//! ]
//! ```

use crate::error::{FetchError, FetchResult};
use crate::fetch::AddonSource;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default addon list file name, resolved against the working directory.
pub const DEFAULT_ADDON_LIST: &str = "addon-list.json";

/// One entry of the addon list. `source` is kept as a string so an unknown
/// kind surfaces as `UnknownSource` for that addon rather than failing the
/// whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonDescriptor {
    pub name: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amoid: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AddonDescriptor {
    pub fn to_source(&self) -> FetchResult<AddonSource> {
        match self.source.as_str() {
            "amo" => {
                let amoid = self.amoid.ok_or_else(|| self.invalid("source \"amo\" requires \"amoid\""))?;
                Ok(AddonSource::Amo { amoid })
            }
            "url" => {
                let url = self
                    .url
                    .as_deref()
                    .ok_or_else(|| self.invalid("source \"url\" requires \"url\""))?;
                url::Url::parse(url)
                    .map_err(|e| self.invalid(&format!("invalid url {:?}: {}", url, e)))?;
                Ok(AddonSource::Url {
                    url: url.to_string(),
                })
            }
            other => Err(FetchError::UnknownSource {
                name: self.name.clone(),
                source_kind: other.to_string(),
            }),
        }
    }

    fn invalid(&self, reason: &str) -> FetchError {
        FetchError::InvalidDescriptor {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

pub fn parse_addon_list(json: &str) -> Result<Vec<AddonDescriptor>> {
    serde_json::from_str(json).context("addon list is not a JSON array of addon entries")
}

pub fn load_addon_list(path: &Path) -> Result<Vec<AddonDescriptor>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read addon list {}", path.display()))?;
    parse_addon_list(&data).with_context(|| format!("parse addon list {}", path.display()))
}
