//! Logging init: append to a file under the XDG state dir, or stderr.
//!
//! The filter comes from `PAGETRACE_LOG`, then `RUST_LOG`, then a default that
//! keeps this crate at debug.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,pagetrace=debug,pagetrace_core=debug";
const FILTER_ENV: &str = "PAGETRACE_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/pagetrace/pagetrace.log`, creating the directory.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagetrace")?;
    xdg_dirs
        .place_state_file("pagetrace.log")
        .context("create pagetrace state directory")
}

/// Installs the file subscriber and returns the log path. Errors leave no
/// subscriber installed so the caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "pagetrace logging initialized");
    Ok(path)
}

/// Stderr-only logging. A no-op if a subscriber is already installed.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
