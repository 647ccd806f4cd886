//! CLI for the xpifetch addon downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xpifetch_core::config;

use commands::{run_checksum, run_fetch, run_get, run_resolve};

/// Top-level CLI for xpifetch.
#[derive(Debug, Parser)]
#[command(name = "xpifetch")]
#[command(about = "xpifetch: download and verify browser addon packages", long_about = None)]
pub struct Cli {
    /// Override the catalog endpoint from config.toml.
    #[arg(long, global = true, value_name = "URL")]
    pub catalog_url: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every addon in the addon list, one at a time.
    Fetch {
        /// Addon list JSON (default from config, usually addon-list.json).
        #[arg(long, value_name = "PATH")]
        list: Option<PathBuf>,
        /// Directory to write packages into (default from config, else current dir).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Continue with the next addon after a failure; exit non-zero at the end.
        #[arg(long)]
        keep_going: bool,
    },

    /// Download one catalog addon by id.
    Get {
        /// Catalog addon id.
        amoid: u64,
        /// Name used for the output file (default: amo-<id>).
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Show which install the catalog offers for this host, without downloading.
    Resolve {
        /// Catalog addon id.
        amoid: u64,
    },

    /// Compute the SHA-256 digest of a file in catalog form (sha256:<hex>).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        if let Some(url) = cli.catalog_url {
            cfg.catalog_base_url = url;
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                list,
                output_dir,
                keep_going,
            } => {
                let list = list.unwrap_or_else(|| cfg.addon_list.clone());
                let output_dir = resolve_output_dir(output_dir, &cfg)?;
                run_fetch(&cfg, &list, &output_dir, keep_going)?;
            }
            CliCommand::Get {
                amoid,
                name,
                output_dir,
            } => {
                let output_dir = resolve_output_dir(output_dir, &cfg)?;
                let name = name.unwrap_or_else(|| format!("amo-{}", amoid));
                run_get(&cfg, amoid, &name, &output_dir)?;
            }
            CliCommand::Resolve { amoid } => run_resolve(&cfg, amoid)?,
            CliCommand::Checksum { path } => run_checksum(&path)?,
        }

        Ok(())
    }
}

/// Flag, then config, then the working directory.
fn resolve_output_dir(flag: Option<PathBuf>, cfg: &config::XpifetchConfig) -> Result<PathBuf> {
    match flag.or_else(|| cfg.output_dir.clone()) {
        Some(dir) => Ok(dir),
        None => Ok(std::env::current_dir()?),
    }
}
