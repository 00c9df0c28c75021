//! CLI for mdlocal.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use mdlocal_core::clone::CloneOptions;
use mdlocal_core::config::{self, MdlocalConfig};
use mdlocal_core::error::CloneError;
use mdlocal_core::fetch::CurlFetcher;
use std::path::PathBuf;
use std::time::Duration;

use commands::{run_clone_dir, run_clone_file, run_plan};

/// Clone a Markdown file, or every Markdown file under a directory, with
/// remote image links rewritten to locally downloaded copies.
#[derive(Debug, Parser)]
#[command(name = "mdlocal", version)]
#[command(about = "Clone markdown with image links rewritten to local assets", long_about = None)]
pub struct Cli {
    /// Markdown file or directory to clone (sources are never modified).
    pub path: PathBuf,

    /// Suffix inserted before the extension of the clone [default: .local].
    #[arg(long, allow_hyphen_values = true)]
    pub suffix: Option<String>,

    /// Directory, relative to each markdown file, for downloaded images [default: assets].
    #[arg(long, value_name = "DIR")]
    pub assets_dir: Option<String>,

    /// Regex selecting which image targets to download [default: https?://].
    #[arg(long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Per-download timeout in seconds [default: 30].
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Print the planned downloads without fetching or writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Applies command-line flags on top of the loaded config.
    pub fn apply_overrides(&self, mut cfg: MdlocalConfig) -> MdlocalConfig {
        if let Some(suffix) = &self.suffix {
            cfg.suffix = suffix.clone();
        }
        if let Some(dir) = &self.assets_dir {
            cfg.assets_dir = dir.clone();
        }
        if let Some(pattern) = &self.pattern {
            cfg.pattern = pattern.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.fetch_timeout_secs = secs;
        }
        cfg
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init().context("load config")?;
        tracing::debug!("loaded config: {:?}", cfg);
        let cfg = cli.apply_overrides(cfg);
        cfg.validate()?;

        if !cli.path.exists() {
            return Err(CloneError::PathNotFound(cli.path.clone()).into());
        }
        let path = cli.path.canonicalize().unwrap_or_else(|_| cli.path.clone());
        let opts = CloneOptions::from_config(&cfg)?;

        if cli.dry_run {
            return run_plan(&path, &opts);
        }

        let mut fetcher = CurlFetcher::new(
            Duration::from_secs(cfg.fetch_timeout_secs),
            cfg.user_agent.clone(),
        );
        if path.is_dir() {
            run_clone_dir(&path, &opts, &mut fetcher)
        } else {
            run_clone_file(&path, &opts, &mut fetcher)
        }
    }
}

#[cfg(test)]
mod tests;
