//! `xpifetch checksum <path>` – digest a file in catalog form.

use anyhow::Result;
use std::path::Path;
use xpifetch_core::integrity::{self, DigestAlgorithm};

/// Print `sha256:<hex>  <path>` so it can be compared against a catalog `hash`.
pub fn run_checksum(path: &Path) -> Result<()> {
    let digest = integrity::digest_path(path, DigestAlgorithm::Sha256)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
