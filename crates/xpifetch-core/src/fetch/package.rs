//! Catalog-verified fetch: resolve, download, verify.

use super::PackageBytes;
use crate::catalog::{AddonId, CatalogResolver};
use crate::error::{FetchError, FetchResult};
use crate::integrity;
use crate::transport::Transport;
use std::fmt;

/// Linear progress of one verified fetch. There are no retries, so each stage
/// is entered at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Resolving,
    Downloading,
    Verifying,
    Verified,
    Rejected,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FetchStage::Resolving => "resolving",
            FetchStage::Downloading => "downloading",
            FetchStage::Verifying => "verifying",
            FetchStage::Verified => "verified",
            FetchStage::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct PackageFetcher {
    resolver: CatalogResolver,
}

impl PackageFetcher {
    pub fn new(resolver: CatalogResolver) -> Self {
        PackageFetcher { resolver }
    }

    pub fn resolver(&self) -> &CatalogResolver {
        &self.resolver
    }

    /// Fetches the package for `addon_id` and returns it only if its content
    /// matches the catalog-declared digest. On mismatch the downloaded bytes
    /// are dropped here and never reach the caller.
    pub fn fetch(&self, transport: &mut dyn Transport, addon_id: AddonId) -> FetchResult<PackageBytes> {
        let span = tracing::info_span!("package_fetch", addon_id);
        let _enter = span.enter();

        tracing::debug!(stage = %FetchStage::Resolving);
        let option = self.resolver.resolve(transport, addon_id)?;
        let declared = integrity::parse_digest(&option.declared_digest)?;

        tracing::debug!(stage = %FetchStage::Downloading, url = %option.download_url);
        let content = transport
            .get(&option.download_url)
            .map_err(|source| FetchError::DownloadFailed {
                url: option.download_url.clone(),
                source,
            })?;

        tracing::debug!(stage = %FetchStage::Verifying, bytes = content.len());
        if let Err(actual) = declared.check(&content) {
            tracing::error!(
                stage = %FetchStage::Rejected,
                expected = %declared,
                actual = %actual,
                "hash did not match downloaded content, discarding"
            );
            return Err(FetchError::IntegrityMismatch {
                url: option.download_url,
                expected: declared.to_string(),
                actual: actual.to_string(),
            });
        }

        tracing::debug!(stage = %FetchStage::Verified, digest = %declared);
        Ok(PackageBytes::new(content))
    }
}
