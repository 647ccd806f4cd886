//! Catalog resolution: turn an addon id into one installable package URL and
//! the digest the catalog declares for it.
//!
//! Queries `GET <base>/<addon_id>`, parses the `<addon>` document, drops beta
//! installs and picks the first entry eligible for the host OS in document
//! order.

mod parse;
mod select;

use crate::error::{FetchError, FetchResult};
use crate::platform::{CatalogPlatform, OperatingSystem};
use crate::transport::Transport;

/// Numeric addon identifier used by the catalog.
pub type AddonId = u64;

/// Default AMO API 1.5 endpoint; the addon id is appended as a path segment.
pub const DEFAULT_CATALOG_BASE_URL: &str =
    "https://services.addons.mozilla.org/en-US/firefox/api/1.5/addon";

/// One `<install>` element as found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallEntry {
    pub platform: CatalogPlatform,
    /// `status="Beta"`.
    pub beta: bool,
    pub download_url: Option<String>,
    pub declared_digest: Option<String>,
}

impl InstallEntry {
    pub fn is_eligible_for(&self, host: OperatingSystem) -> bool {
        !self.beta && self.platform.is_eligible_for(host)
    }

    /// Validates the fields a download needs.
    fn to_install_option(&self) -> Result<InstallOption, String> {
        let download_url = self
            .download_url
            .as_deref()
            .ok_or_else(|| "selected install has no download URL".to_string())?;
        url::Url::parse(download_url)
            .map_err(|e| format!("selected install URL {:?} is invalid: {}", download_url, e))?;
        let declared_digest = self
            .declared_digest
            .clone()
            .ok_or_else(|| "selected install has no hash attribute".to_string())?;
        Ok(InstallOption {
            platform: self.platform.clone(),
            download_url: download_url.to_string(),
            declared_digest,
        })
    }
}

/// The catalog's answer for a single addon id.
#[derive(Debug, Clone, Default)]
pub struct CatalogDescriptor {
    pub name: Option<String>,
    pub guid: Option<String>,
    pub version: Option<String>,
    /// Document order.
    pub installs: Vec<InstallEntry>,
}

/// The install chosen for this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOption {
    pub platform: CatalogPlatform,
    pub download_url: String,
    /// Raw `hash` attribute, e.g. `sha256:<hex>`.
    pub declared_digest: String,
}

/// Resolves addon ids against a catalog endpoint for a fixed host OS.
#[derive(Debug, Clone)]
pub struct CatalogResolver {
    base_url: String,
    os: OperatingSystem,
}

impl CatalogResolver {
    /// Resolver for `base_url` using the detected host OS.
    pub fn new(base_url: &str) -> Self {
        Self::with_os(base_url, OperatingSystem::detect())
    }

    pub fn with_os(base_url: &str, os: OperatingSystem) -> Self {
        CatalogResolver {
            base_url: base_url.trim_end_matches('/').to_string(),
            os,
        }
    }

    pub fn os(&self) -> OperatingSystem {
        self.os
    }

    pub fn catalog_url(&self, addon_id: AddonId) -> String {
        format!("{}/{}", self.base_url, addon_id)
    }

    /// Fetches and parses the catalog document for `addon_id`.
    pub fn describe(
        &self,
        transport: &mut dyn Transport,
        addon_id: AddonId,
    ) -> FetchResult<CatalogDescriptor> {
        let url = self.catalog_url(addon_id);
        tracing::debug!(addon_id, url = %url, "querying catalog");
        let body = transport
            .get(&url)
            .map_err(|source| FetchError::CatalogUnreachable { addon_id, source })?;
        parse::parse_catalog(&body)
            .map_err(|reason| FetchError::CatalogMalformed { addon_id, reason })
    }

    /// Fetches the catalog document and selects the install for this host.
    pub fn resolve(&self, transport: &mut dyn Transport, addon_id: AddonId) -> FetchResult<InstallOption> {
        let descriptor = self.describe(transport, addon_id)?;
        self.select(&descriptor, addon_id)
    }

    /// Selects the install for this host from an already fetched document.
    pub fn select(&self, descriptor: &CatalogDescriptor, addon_id: AddonId) -> FetchResult<InstallOption> {
        tracing::debug!(
            addon_id,
            name = descriptor.name.as_deref().unwrap_or("?"),
            guid = descriptor.guid.as_deref().unwrap_or("?"),
            version = descriptor.version.as_deref().unwrap_or("?"),
            installs = descriptor.installs.len(),
            "catalog parsed"
        );

        let entry = select::first_eligible(&descriptor.installs, self.os).ok_or(
            FetchError::NoSuitableInstall {
                addon_id,
                os: self.os,
            },
        )?;

        entry
            .to_install_option()
            .map_err(|reason| FetchError::CatalogMalformed { addon_id, reason })
    }
}
