//! Unverified fetch for URL-sourced addons.
//!
//! The addon list carries no digest for these, so the body is returned as-is.
//! Trust rests with whoever curated the list.

use super::PackageBytes;
use crate::error::{FetchError, FetchResult};
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectFetcher;

impl DirectFetcher {
    pub fn fetch(&self, transport: &mut dyn Transport, url: &str) -> FetchResult<PackageBytes> {
        tracing::debug!(url, "direct download");
        transport
            .get(url)
            .map(PackageBytes::new)
            .map_err(|source| FetchError::DownloadFailed {
                url: url.to_string(),
                source,
            })
    }
}
