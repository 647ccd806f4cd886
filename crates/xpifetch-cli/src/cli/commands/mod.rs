//! CLI command handlers, one file per command.

mod checksum;
mod fetch;
mod get;
mod resolve;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
pub use get::run_get;
pub use resolve::run_resolve;

use anyhow::{Context, Result};
use xpifetch_core::config::XpifetchConfig;
use xpifetch_core::transport::CurlTransport;
use xpifetch_core::{CatalogResolver, Session};

/// Session over a fresh curl handle, resolving for the detected host OS.
fn open_session(cfg: &XpifetchConfig) -> Result<Session<CurlTransport>> {
    let transport =
        CurlTransport::new(&cfg.curl_options()).context("failed to set up HTTP client")?;
    let resolver = CatalogResolver::new(&cfg.catalog_base_url);
    tracing::debug!(
        catalog = %cfg.catalog_base_url,
        os = %resolver.os(),
        "session opened"
    );
    Ok(Session::new(transport, resolver))
}
