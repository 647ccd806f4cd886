//! `xpifetch fetch` – download every addon in the addon list.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use xpifetch_core::addon_list::{self, AddonDescriptor};
use xpifetch_core::config::XpifetchConfig;
use xpifetch_core::transport::Transport;
use xpifetch_core::{output, Session};

use super::open_session;

/// Processes the list strictly in order. Without `keep_going` the first
/// failure aborts the run.
pub fn run_fetch(
    cfg: &XpifetchConfig,
    list_path: &Path,
    output_dir: &Path,
    keep_going: bool,
) -> Result<()> {
    let addons = addon_list::load_addon_list(list_path)?;
    tracing::info!("{} addon(s) in {}", addons.len(), list_path.display());
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;

    let mut session = open_session(cfg)?;
    let saved = fetch_all(&mut session, &addons, output_dir, keep_going)?;
    tracing::info!("{} package(s) saved to {}", saved, output_dir.display());
    Ok(())
}

/// Fetches and saves each addon in list order, returning how many were saved.
/// Errors carry the addon name as context.
fn fetch_all<T: Transport>(
    session: &mut Session<T>,
    addons: &[AddonDescriptor],
    output_dir: &Path,
    keep_going: bool,
) -> Result<usize> {
    let mut failed = 0usize;
    for addon in addons {
        tracing::info!("downloading {}", addon.name);
        match fetch_one(session, addon, output_dir) {
            Ok(path) => println!("{}  {}", addon.name, path.display()),
            Err(err) => {
                tracing::error!("{:#}", err);
                if !keep_going {
                    return Err(err);
                }
                eprintln!("xpifetch: {:#}", err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} addon(s) failed", failed, addons.len());
    }
    Ok(addons.len())
}

fn fetch_one<T: Transport>(
    session: &mut Session<T>,
    addon: &AddonDescriptor,
    output_dir: &Path,
) -> Result<PathBuf> {
    let fetched = addon.to_source().and_then(|source| {
        tracing::debug!("using {:?} as the download source", source);
        session.fetch(&source)
    });
    let package = fetched.with_context(|| format!("addon {:?}", addon.name))?;
    output::save_package(output_dir, &addon.name, &package)
        .with_context(|| format!("addon {:?}", addon.name))
}
