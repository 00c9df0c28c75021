//! `--dry-run`: show allocated names without touching the network or disk.

use anyhow::Result;
use mdlocal_core::batch::{discover_documents, is_clone};
use mdlocal_core::clone::{clone_path, plan_document, planned_link, CloneOptions};
use std::path::Path;

pub fn run_plan(path: &Path, opts: &CloneOptions) -> Result<()> {
    if !path.is_dir() {
        return print_plan(path, opts);
    }

    let mut planned = 0usize;
    for doc in discover_documents(path) {
        if is_clone(&doc, &opts.suffix) {
            println!("[skip] {}", doc.display());
            continue;
        }
        match print_plan(&doc, opts) {
            Ok(()) => planned += 1,
            Err(e) => println!("[failed] {}: {:#}", doc.display(), e),
        }
    }
    println!("[batch] planned {planned} file(s)");
    Ok(())
}

fn print_plan(doc: &Path, opts: &CloneOptions) -> Result<()> {
    let plan = plan_document(doc, opts)?;
    if plan.is_empty() {
        println!("[info] {}: no matching image URLs", doc.display());
        return Ok(());
    }
    println!(
        "[plan] {} -> {}",
        doc.display(),
        clone_path(doc, &opts.suffix).display()
    );
    for (url, _) in plan.mapping.iter() {
        let link = planned_link(&plan, opts, url).unwrap_or_default();
        println!("  {url} -> {link}");
    }
    Ok(())
}
