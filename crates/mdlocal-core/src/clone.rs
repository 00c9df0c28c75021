//! Per-document pipeline: extract → select → allocate → fetch → rewrite → write.
//!
//! The source document is only ever read. Its clone is written next to it as
//! `<stem><suffix><ext>` and downloaded images land in `<assets_dir>/` relative
//! to the source's directory.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::MdlocalConfig;
use crate::error::{CloneError, Result};
use crate::fetch::Fetch;
use crate::markdown::{extract_links, local_link, rewrite_links, select_urls};
use crate::naming::{allocate_filename, derive_base_name, AssetDir, AssetMapping};

/// Settings shared by every document in a run.
#[derive(Debug, Clone)]
pub struct CloneOptions {
    /// Normalized clone suffix (starts with `.` unless empty).
    pub suffix: String,
    /// Asset directory as given (relative to each document).
    pub assets_dir: String,
    /// Compiled selector pattern.
    pub selector: Regex,
}

impl CloneOptions {
    /// Builds options, normalizing `suffix` and compiling `pattern`.
    pub fn new(suffix: &str, assets_dir: &str, pattern: &str) -> Result<Self> {
        let selector = Regex::new(pattern).map_err(|source| CloneError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            suffix: normalize_suffix(suffix),
            assets_dir: assets_dir.to_string(),
            selector,
        })
    }

    pub fn from_config(cfg: &MdlocalConfig) -> Result<Self> {
        Self::new(&cfg.suffix, &cfg.assets_dir, &cfg.pattern)
    }
}

/// Prefixes a non-empty suffix with `.` if it lacks one: `local` → `.local`.
pub fn normalize_suffix(suffix: &str) -> String {
    if suffix.is_empty() || suffix.starts_with('.') {
        suffix.to_string()
    } else {
        format!(".{suffix}")
    }
}

/// Clone path for `source`: `notes/a.md` + `.local` → `notes/a.local.md`.
/// A file without an extension gets the suffix appended: `README` → `README.local`.
pub fn clone_path(source: &Path, suffix: &str) -> PathBuf {
    let suffix = normalize_suffix(suffix);
    let name = match (source.file_stem(), source.extension()) {
        (Some(stem), Some(ext)) => format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            suffix,
            ext.to_string_lossy()
        ),
        _ => format!(
            "{}{}",
            source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            suffix
        ),
    };
    source.with_file_name(name)
}

/// Directory where `source`'s images are stored.
pub fn assets_dir_for(source: &Path, assets_dir: &str) -> PathBuf {
    source
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(assets_dir)
}

/// Everything decided about a document before any network traffic.
#[derive(Debug, Clone)]
pub struct DocumentPlan {
    pub source: PathBuf,
    pub text: String,
    pub assets_dir: PathBuf,
    pub mapping: AssetMapping,
}

impl DocumentPlan {
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

/// One image written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedAsset {
    pub url: String,
    pub filename: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Outcome of cloning one document.
#[derive(Debug, Clone)]
pub struct CloneReport {
    pub source: PathBuf,
    /// Clone path, or `None` when no link matched and nothing was written.
    pub output: Option<PathBuf>,
    pub assets_dir: PathBuf,
    pub downloads: Vec<DownloadedAsset>,
}

/// Reads `source` and allocates a local filename for every selected image URL.
///
/// Names are checked against files already in the asset directory and against
/// each other, so applying the plan never overwrites an existing file.
pub fn plan_document(source: &Path, opts: &CloneOptions) -> Result<DocumentPlan> {
    if !source.exists() {
        return Err(CloneError::PathNotFound(source.to_path_buf()));
    }
    let text = fs::read_to_string(source).map_err(|e| CloneError::fs("read", source, e))?;

    let links = extract_links(&text);
    let selected = select_urls(&links, &opts.selector);
    tracing::debug!(
        source = %source.display(),
        links = links.len(),
        selected = selected.len(),
        "scanned document"
    );

    let assets_dir = assets_dir_for(source, &opts.assets_dir);
    let on_disk = AssetDir::new(&assets_dir);
    let mut mapping = AssetMapping::default();
    for s in &selected {
        let base = derive_base_name(&s.url, &s.alt);
        let filename = allocate_filename(&base, &on_disk, &mapping);
        tracing::debug!(url = %s.url, %filename, "allocated");
        mapping.insert(s.url.clone(), filename);
    }

    Ok(DocumentPlan {
        source: source.to_path_buf(),
        text,
        assets_dir,
        mapping,
    })
}

/// Downloads every planned image, then writes the rewritten clone.
///
/// `on_download` is called after each successful download. The first failure
/// aborts the document; images fetched before it stay on disk and no clone is
/// written.
pub fn apply_plan<F: Fetch + ?Sized>(
    plan: DocumentPlan,
    opts: &CloneOptions,
    fetcher: &mut F,
    on_download: &mut dyn FnMut(&DownloadedAsset),
) -> Result<CloneReport> {
    if plan.is_empty() {
        return Ok(CloneReport {
            source: plan.source,
            output: None,
            assets_dir: plan.assets_dir,
            downloads: Vec::new(),
        });
    }

    let new_text =
        rewrite_links(&plan.text, &plan.mapping, &opts.assets_dir).map_err(CloneError::Rewriter)?;

    fs::create_dir_all(&plan.assets_dir)
        .map_err(|e| CloneError::fs("create assets dir", &plan.assets_dir, e))?;

    let mut downloads = Vec::with_capacity(plan.mapping.len());
    for (url, filename) in plan.mapping.iter() {
        let dest = plan.assets_dir.join(filename);
        let bytes = fetcher
            .fetch(url, &dest)
            .map_err(|source| CloneError::Network {
                url: url.to_string(),
                source,
            })?;
        tracing::info!(url, dest = %dest.display(), bytes, "downloaded");
        let asset = DownloadedAsset {
            url: url.to_string(),
            filename: filename.to_string(),
            path: dest,
            bytes,
        };
        on_download(&asset);
        downloads.push(asset);
    }

    let out_path = clone_path(&plan.source, &opts.suffix);
    fs::write(&out_path, new_text).map_err(|e| CloneError::fs("write clone", &out_path, e))?;
    tracing::info!(clone = %out_path.display(), assets = downloads.len(), "clone written");

    Ok(CloneReport {
        source: plan.source,
        output: Some(out_path),
        assets_dir: plan.assets_dir,
        downloads,
    })
}

/// Plans and applies in one step.
pub fn clone_document<F: Fetch + ?Sized>(
    source: &Path,
    opts: &CloneOptions,
    fetcher: &mut F,
    on_download: &mut dyn FnMut(&DownloadedAsset),
) -> Result<CloneReport> {
    let plan = plan_document(source, opts)?;
    apply_plan(plan, opts, fetcher, on_download)
}

/// Local link text `url` will be rewritten to under `plan`.
pub fn planned_link(plan: &DocumentPlan, opts: &CloneOptions, url: &str) -> Option<String> {
    plan.mapping
        .get(url)
        .map(|filename| local_link(&opts.assets_dir, filename))
}
