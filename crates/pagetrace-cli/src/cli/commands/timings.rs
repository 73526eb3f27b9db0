//! `pagetrace timings <har>` – replay a capture through a resource timeline
//! and print what an attached collector ends up with.

use anyhow::Result;
use pagetrace_core::config::PagetraceConfig;
use pagetrace_core::har;
use pagetrace_core::timing::{IdleOutcome, ResourceTimeline, TimingCollector, TimingRecord};
use std::path::Path;
use std::time::Duration;

pub async fn run_timings(
    cfg: &PagetraceConfig,
    har_path: &Path,
    buffered: usize,
    realtime: bool,
) -> Result<()> {
    let records = har::load_timing_records(har_path)?;
    let log = collect(cfg, records, buffered, realtime).await;
    println!("{}", serde_json::to_string_pretty(&log)?);
    Ok(())
}

/// Reports the first `buffered` records before attaching a collector, then
/// the rest, either at once or paced by their start times.
async fn collect(
    cfg: &PagetraceConfig,
    mut records: Vec<TimingRecord>,
    buffered: usize,
    realtime: bool,
) -> Vec<TimingRecord> {
    let timeline = ResourceTimeline::with_buffer_size(cfg.timeline.buffer_size);
    let rest = records.split_off(buffered.min(records.len()));
    timeline.record_batch(records);

    let collector = TimingCollector::attach(&timeline);
    if !realtime {
        timeline.record_batch(rest);
        drop(timeline);
        return collector.finish().await;
    }

    tokio::spawn(replay(timeline, rest));
    match collector.wait_for_idle(&cfg.idle).await {
        IdleOutcome::Idle { records } => tracing::info!(records, "network idle"),
        IdleOutcome::TimedOut { records } => {
            tracing::warn!(records, "timed out waiting for network idle")
        }
    }
    collector.records()
}

async fn replay(timeline: ResourceTimeline, records: Vec<TimingRecord>) {
    let origin = tokio::time::Instant::now();
    for record in records {
        let at = Duration::from_secs_f64(record.start_time / 1000.0);
        tokio::time::sleep_until(origin + at).await;
        timeline.record(record);
    }
}
