//! Single-file mode: clone one document, failures are fatal.

use anyhow::Result;
use mdlocal_core::clone::{clone_document, CloneOptions};
use mdlocal_core::fetch::Fetch;
use std::path::Path;

/// Clones `path` even if it looks like an earlier clone.
pub fn run_clone_file<F: Fetch>(path: &Path, opts: &CloneOptions, fetcher: &mut F) -> Result<()> {
    let report = clone_document(path, opts, fetcher, &mut |asset| {
        println!("[downloaded] {} -> {}", asset.url, asset.path.display());
    })?;

    match &report.output {
        None => println!("[info] no matching image URLs found; nothing to download"),
        Some(out) => {
            println!("[done] cloned markdown: {}", out.display());
            println!(
                "[summary] downloaded {} file(s) to {}",
                report.downloads.len(),
                report.assets_dir.display()
            );
        }
    }
    Ok(())
}
