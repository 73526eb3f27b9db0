//! HAR entries to timing records.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use std::path::Path;

use crate::timing::TimingRecord;

use super::parse::{HarEntry, HarLog};

/// Reads a HAR file and converts its entries into timing records, in file
/// order.
pub fn load_timing_records(path: &Path) -> Result<Vec<TimingRecord>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read HAR file: {}", path.display()))?;
    parse_timing_records(&bytes).with_context(|| format!("parse HAR: {}", path.display()))
}

/// Converts HAR JSON into timing records.
///
/// The first `document` entry is the navigation itself and is skipped; later
/// documents are frames. Start times are relative to the first page's
/// `startedDateTime` (or the first entry's when the log has no pages).
pub fn parse_timing_records(bytes: &[u8]) -> Result<Vec<TimingRecord>> {
    let har: HarLog = serde_json::from_slice(bytes).context("parse HAR JSON")?;
    let entries = har.log.entries;

    let origin_stamp = har
        .log
        .pages
        .first()
        .map(|page| page.started_date_time.as_str())
        .or_else(|| entries.first().map(|e| e.started_date_time.as_str()));
    let origin = origin_stamp.and_then(|stamp| match parse_stamp(stamp) {
        Ok(origin) => Some(origin),
        Err(err) => {
            tracing::warn!(stamp, error = %err, "HAR page start time unreadable, start times default to 0");
            None
        }
    });

    let mut seen_navigation = false;
    let mut records = Vec::with_capacity(entries.len());
    for entry in &entries {
        let initiator = match initiator_type(entry) {
            "navigation" if !seen_navigation => {
                seen_navigation = true;
                tracing::trace!(url = %entry.request.url, "skipping navigation entry");
                continue;
            }
            "navigation" => "iframe",
            other => other,
        };

        let start_time = match (origin, parse_stamp(&entry.started_date_time)) {
            (Some(origin), Ok(started)) => millis_between(origin, started),
            (_, Err(err)) => {
                tracing::warn!(url = %entry.request.url, error = %err, "HAR entry start time unreadable");
                0.0
            }
            (None, Ok(_)) => 0.0,
        };

        records.push(
            TimingRecord::new(entry.request.url.clone(), initiator)
                .with_timing(start_time, entry.time)
                .with_transfer_size(transfer_size(entry)),
        );
    }
    tracing::debug!(entries = entries.len(), records = records.len(), "HAR converted");
    Ok(records)
}

fn parse_stamp(stamp: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(stamp).with_context(|| format!("invalid startedDateTime: {stamp}"))
}

fn millis_between(origin: DateTime<FixedOffset>, at: DateTime<FixedOffset>) -> f64 {
    let delta = at.signed_duration_since(origin);
    delta
        .num_microseconds()
        .map(|us| us as f64 / 1000.0)
        .unwrap_or_else(|| delta.num_milliseconds() as f64)
}

/// Initiator type for an entry. `navigation` marks documents.
fn initiator_type(entry: &HarEntry) -> &'static str {
    match entry.resource_type.as_deref() {
        Some(kind) => match kind.to_ascii_lowercase().as_str() {
            "document" => "navigation",
            "stylesheet" => "link",
            "script" => "script",
            "image" => "img",
            "font" => "css",
            "media" => "video",
            "xhr" => "xmlhttprequest",
            "fetch" => "fetch",
            "beacon" | "ping" => "beacon",
            _ => "other",
        },
        None => initiator_from_mime(entry),
    }
}

fn initiator_from_mime(entry: &HarEntry) -> &'static str {
    let mime = entry
        .response
        .content
        .as_ref()
        .and_then(|c| c.mime_type.as_deref())
        .unwrap_or("")
        .to_ascii_lowercase();
    let essence = mime.split(';').next().unwrap_or("").trim();
    match essence {
        "text/html" | "application/xhtml+xml" => "navigation",
        "text/css" => "link",
        m if m.contains("javascript") || m == "application/ecmascript" => "script",
        m if m.starts_with("image/") => "img",
        m if m.starts_with("font/") || m.contains("font-") => "css",
        m if m.starts_with("video/") || m.starts_with("audio/") => "video",
        _ => "other",
    }
}

/// Bytes on the wire, when the exporter recorded them.
fn transfer_size(entry: &HarEntry) -> Option<u64> {
    let response = &entry.response;
    if response.status == 0 {
        return Some(0);
    }
    if let Some(size) = response.transfer_size {
        return u64::try_from(size).ok();
    }
    if response.headers_size >= 0 && response.body_size >= 0 {
        return Some((response.headers_size + response.body_size) as u64);
    }
    None
}
