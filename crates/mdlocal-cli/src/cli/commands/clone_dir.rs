//! Directory mode: clone every document under a root, reporting failures per file.

use anyhow::Result;
use mdlocal_core::batch::{clone_tree, FileOutcome};
use mdlocal_core::clone::CloneOptions;
use mdlocal_core::fetch::Fetch;
use std::path::Path;

/// Succeeds even when individual documents fail; those are printed and counted.
pub fn run_clone_dir<F: Fetch>(root: &Path, opts: &CloneOptions, fetcher: &mut F) -> Result<()> {
    let report = clone_tree(root, opts, fetcher, &mut |path, outcome| match outcome {
        FileOutcome::Skipped => println!("[skip] {}", path.display()),
        FileOutcome::Failed(msg) => println!("[failed] {}: {}", path.display(), msg),
        FileOutcome::Cloned(r) => match &r.output {
            Some(out) => println!(
                "[done] {} -> {} ({} asset(s))",
                path.display(),
                out.display(),
                r.downloads.len()
            ),
            None => println!("[info] {}: no matching image URLs", path.display()),
        },
    })?;

    println!(
        "[batch] processed {} file(s), skipped {}, failed {}, downloaded {} asset(s)",
        report.processed,
        report.skipped.len(),
        report.failed.len(),
        report.assets_downloaded
    );
    println!("[batch] discovered {} markdown file(s) under {}", report.discovered, root.display());
    Ok(())
}
