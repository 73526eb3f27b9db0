//! `pagetrace scan <html> --url <url>` – print the resource inventory as JSON.

use anyhow::Result;
use pagetrace_core::config::PagetraceConfig;
use pagetrace_core::ResourceScanner;

use super::PageInput;

pub fn run_scan(cfg: &PagetraceConfig, page: &PageInput) -> Result<()> {
    let document = page.load()?;
    let references = ResourceScanner::new(cfg.scanner.clone()).scan(&document);
    println!("{}", serde_json::to_string_pretty(&references)?);
    Ok(())
}
