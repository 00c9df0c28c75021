//! Directory mode: clone every Markdown document under a root.
//!
//! Documents are processed one after another in path order. A failure in one
//! document is recorded and the batch moves on; only setup errors (missing
//! root) abort the run.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::clone::{clone_document, CloneOptions, CloneReport};
use crate::error::{CloneError, Result};
use crate::fetch::Fetch;

/// Extension of documents picked up in directory mode.
pub const DOCUMENT_EXTENSION: &str = "md";

/// What happened to one discovered file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Processed; the report may still say nothing matched.
    Cloned(CloneReport),
    /// Looks like a clone produced by an earlier run.
    Skipped,
    /// Processing failed; the message includes the error chain.
    Failed(String),
}

/// Aggregate result of a directory run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Documents found under the root (including skipped clones).
    pub discovered: usize,
    /// Documents that went through the pipeline without error.
    pub processed: usize,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
    /// Images downloaded across all documents.
    pub assets_downloaded: usize,
}

/// Recursively lists `*.md` files under `root`, sorted by path.
///
/// Unreadable entries are logged and skipped rather than failing discovery.
pub fn discover_documents(root: &Path) -> Vec<PathBuf> {
    let mut docs: Vec<PathBuf> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
        })
        .collect();
    docs.sort();
    docs
}

/// True if `path` is named like a clone for `suffix`: `<stem><suffix>.<ext>`
/// with a non-empty stem (`a.local.md` for `.local`).
///
/// `suffix` must already be normalized. An empty suffix matches nothing.
pub fn is_clone(path: &Path, suffix: &str) -> bool {
    if suffix.is_empty() {
        return false;
    }
    let Some(stem) = path.file_stem().map(|s| s.to_string_lossy()) else {
        return false;
    };
    stem.len() > suffix.len() && stem.ends_with(suffix)
}

/// Clones every document under `root`, skipping prior clones.
///
/// `on_file` is called once per discovered file, in processing order.
pub fn clone_tree<F: Fetch + ?Sized>(
    root: &Path,
    opts: &CloneOptions,
    fetcher: &mut F,
    on_file: &mut dyn FnMut(&Path, &FileOutcome),
) -> Result<BatchReport> {
    if !root.exists() {
        return Err(CloneError::PathNotFound(root.to_path_buf()));
    }

    let docs = discover_documents(root);
    tracing::info!(root = %root.display(), documents = docs.len(), "discovered documents");

    let mut report = BatchReport {
        discovered: docs.len(),
        ..BatchReport::default()
    };

    for doc in docs {
        let outcome = if is_clone(&doc, &opts.suffix) {
            tracing::debug!(path = %doc.display(), "skipping prior clone");
            FileOutcome::Skipped
        } else {
            match clone_document(&doc, opts, fetcher, &mut |_| {}) {
                Ok(r) => FileOutcome::Cloned(r),
                Err(e) => {
                    tracing::warn!(path = %doc.display(), error = %e, "document failed");
                    FileOutcome::Failed(format!("{:#}", anyhow::Error::new(e)))
                }
            }
        };

        on_file(&doc, &outcome);
        match outcome {
            FileOutcome::Cloned(r) => {
                report.processed += 1;
                report.assets_downloaded += r.downloads.len();
            }
            FileOutcome::Skipped => report.skipped.push(doc),
            FileOutcome::Failed(msg) => report.failed.push((doc, msg)),
        }
    }

    tracing::info!(
        processed = report.processed,
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        assets = report.assets_downloaded,
        "batch finished"
    );
    Ok(report)
}
