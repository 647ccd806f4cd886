//! Tracing subscriber setup. Logs go to `$XDG_STATE_HOME/xpifetch/xpifetch.log`,
//! or to stderr when the state dir cannot be used.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info,xpifetch=debug,xpifetch_core=debug";

const LOG_FILE_NAME: &str = "xpifetch.log";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to this file, creating it if needed.
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    fn make_writer(&self) -> Result<BoxMakeWriter> {
        match self {
            LogTarget::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("open log file {}", path.display()))?;
                Ok(BoxMakeWriter::new(Mutex::new(file)))
            }
            LogTarget::Stderr => Ok(BoxMakeWriter::new(std::io::stderr)),
        }
    }
}

/// Path of the log file, creating its parent directory.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("xpifetch")?;
    dirs.place_state_file(LOG_FILE_NAME)
        .context("create xpifetch state directory")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn build_subscriber(
    target: &LogTarget,
    filter: EnvFilter,
) -> Result<impl Subscriber + Send + Sync + 'static> {
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(target.make_writer()?)
        .with_ansi(false)
        .finish())
}

/// Installs the global subscriber for `target`. Fails if the target cannot be
/// opened or a subscriber is already installed.
pub fn install(target: &LogTarget) -> Result<()> {
    let subscriber = build_subscriber(target, env_filter())?;
    tracing::subscriber::set_global_default(subscriber).context("install subscriber")
}

/// Logs to the state-dir file. On error nothing is installed, so the caller
/// can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    install(&LogTarget::File(path.clone()))?;
    tracing::info!("xpifetch logging initialized at {}", path.display());
    Ok(())
}

/// Logs to stderr. Never fails; an already installed subscriber is kept.
pub fn init_logging_stderr() {
    let _ = install(&LogTarget::Stderr);
}
