//! Tracing setup for the binary.
//!
//! Events go to `$XDG_STATE_HOME/mdlocal/mdlocal.log` when that file can be
//! opened. Otherwise only warnings and errors are written to stderr, so the
//! progress lines on stdout stay readable. `RUST_LOG` overrides either filter.

use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "mdlocal.log";
const FILE_FILTER: &str = "info,mdlocal=debug,mdlocal_core=debug";
const STDERR_FILTER: &str = "warn";

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Location of the log file; creates its directory if needed.
fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mdlocal")?;
    xdg_dirs
        .place_state_file(LOG_FILE_NAME)
        .context("create log directory")
}

fn init_file() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_or(FILE_FILTER))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))?;
    Ok(path)
}

/// Installs the global subscriber. Never fails: an unwritable state dir
/// falls back to stderr, and a second call is a no-op.
pub fn init() {
    match init_file() {
        Ok(path) => tracing::info!(path = %path.display(), "logging to file"),
        Err(err) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter_or(STDERR_FILTER))
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .try_init();
            tracing::debug!("log file unavailable: {err:#}");
        }
    }
}
