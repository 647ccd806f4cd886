//! `xpifetch resolve <amoid>` – show the selected install without downloading.

use anyhow::{Context, Result};
use xpifetch_core::config::XpifetchConfig;
use xpifetch_core::AddonId;

use super::open_session;

pub fn run_resolve(cfg: &XpifetchConfig, amoid: AddonId) -> Result<()> {
    let mut session = open_session(cfg)?;
    let descriptor = session
        .describe(amoid)
        .with_context(|| format!("addon {}", amoid))?;
    let option = session
        .resolver()
        .select(&descriptor, amoid)
        .with_context(|| format!("addon {}", amoid))?;

    if let Some(name) = &descriptor.name {
        println!("Name:     {}", name);
    }
    if let Some(version) = &descriptor.version {
        println!("Version:  {}", version);
    }
    println!("Platform: {} (host {})", option.platform, session.resolver().os());
    println!("URL:      {}", option.download_url);
    println!("Digest:   {}", option.declared_digest);
    Ok(())
}
