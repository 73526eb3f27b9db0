//! `pagetrace manifest <html> --url <url> [--har <path>]` – scanned references
//! and loaded resources as one JSON list.

use anyhow::Result;
use pagetrace_core::config::PagetraceConfig;
use pagetrace_core::manifest::{build_manifest, unique_urls};
use pagetrace_core::{har, ResourceScanner};
use std::path::Path;

use super::PageInput;

pub fn run_manifest(
    cfg: &PagetraceConfig,
    page: &PageInput,
    har_path: Option<&Path>,
    unique: bool,
) -> Result<()> {
    let document = page.load()?;
    let references = ResourceScanner::new(cfg.scanner.clone()).scan(&document);
    let records = match har_path {
        Some(path) => har::load_timing_records(path)?,
        None => Vec::new(),
    };

    let manifest = build_manifest(&references, &records);
    let out = if unique {
        serde_json::to_string_pretty(&unique_urls(&manifest))?
    } else {
        serde_json::to_string_pretty(&manifest)?
    };
    println!("{out}");
    Ok(())
}
