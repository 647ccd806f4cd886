//! `xpifetch get <amoid>` – fetch and save a single catalog addon.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use xpifetch_core::config::XpifetchConfig;
use xpifetch_core::{output, AddonId, AddonSource};

use super::open_session;

pub fn run_get(cfg: &XpifetchConfig, amoid: AddonId, name: &str, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let mut session = open_session(cfg)?;
    let package = session
        .fetch(&AddonSource::Amo { amoid })
        .with_context(|| format!("addon {}", amoid))?;
    let path = output::save_package(output_dir, name, &package)?;
    println!("{}  {}", name, path.display());
    Ok(())
}
