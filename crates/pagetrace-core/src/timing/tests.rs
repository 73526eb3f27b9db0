use std::time::Duration;

use super::*;
use crate::config::IdleConfig;

fn rec(name: &str, initiator: &str) -> TimingRecord {
    TimingRecord::new(name, initiator).with_timing(1.0, 2.0)
}

fn names(records: &[TimingRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn attach_seeds_with_buffered_history() {
    let timeline = ResourceTimeline::new();
    timeline.record(rec("https://example.com/a.css", "link"));
    timeline.record(rec("https://example.com/b.js", "script"));

    let collector = TimingCollector::attach(&timeline);
    assert_eq!(
        names(&collector.records()),
        vec!["https://example.com/a.css", "https://example.com/b.js"]
    );
    assert_eq!(timeline.observer_count(), 1);
}

#[tokio::test]
async fn attach_to_fresh_timeline_is_empty() {
    let timeline = ResourceTimeline::new();
    let collector = TimingCollector::attach(&timeline);
    assert!(collector.is_empty());
    assert!(collector.is_following());
}

#[tokio::test]
async fn batches_append_in_delivery_order() {
    let timeline = ResourceTimeline::new();
    timeline.record(rec("seed", "other"));
    let collector = TimingCollector::attach(&timeline);

    timeline.record_batch(vec![rec("one", "img"), rec("two", "img")]);
    timeline.record(rec("three", "fetch"));

    assert_eq!(collector.wait_for_len(4).await, 4);
    assert_eq!(names(&collector.records()), vec!["seed", "one", "two", "three"]);
}

#[tokio::test]
async fn earlier_snapshots_are_prefixes_of_later_ones() {
    let timeline = ResourceTimeline::new();
    let collector = TimingCollector::attach(&timeline);

    timeline.record(rec("a", "img"));
    collector.wait_for_len(1).await;
    let early = collector.records();

    timeline.record_batch(vec![rec("b", "img"), rec("c", "css")]);
    collector.wait_for_len(3).await;
    let late = collector.records();

    assert_eq!(&late[..early.len()], &early[..]);
    assert_eq!(late.len(), 3);
}

#[tokio::test]
async fn duplicate_records_are_kept() {
    let timeline = ResourceTimeline::new();
    let collector = TimingCollector::attach(&timeline);

    let same = rec("https://example.com/poll", "xmlhttprequest");
    timeline.record(same.clone());
    timeline.record(same.clone());

    collector.wait_for_len(2).await;
    assert_eq!(collector.records(), vec![same.clone(), same]);
}

#[tokio::test]
async fn empty_batches_are_not_delivered() {
    let timeline = ResourceTimeline::new();
    let collector = TimingCollector::attach(&timeline);
    timeline.record_batch(Vec::new());
    drop(timeline);
    assert!(collector.finish().await.is_empty());
}

#[tokio::test]
async fn finish_returns_everything_after_the_timeline_is_dropped() {
    let timeline = ResourceTimeline::new();
    timeline.record(rec("seed", "other"));
    let collector = TimingCollector::attach(&timeline);
    timeline.record(rec("late", "img"));
    drop(timeline);

    let log = collector.finish().await;
    assert_eq!(names(&log), vec!["seed", "late"]);
}

#[tokio::test]
async fn full_buffer_still_delivers_to_live_collectors() {
    let timeline = ResourceTimeline::with_buffer_size(2);
    let early = TimingCollector::attach(&timeline);
    timeline.record_batch(vec![rec("a", "img"), rec("b", "img"), rec("c", "img")]);

    assert_eq!(names(&timeline.buffered()), vec!["a", "b"]);
    assert_eq!(early.wait_for_len(3).await, 3);

    let late = TimingCollector::attach(&timeline);
    assert_eq!(names(&late.records()), vec!["a", "b"]);
}

#[tokio::test]
async fn cleared_buffer_does_not_reach_later_collectors() {
    let timeline = ResourceTimeline::new();
    timeline.record(rec("old", "img"));
    timeline.clear_buffer();
    timeline.set_buffer_size(1);
    timeline.record_batch(vec![rec("new", "img"), rec("overflow", "img")]);

    let collector = TimingCollector::attach(&timeline);
    assert_eq!(names(&collector.records()), vec!["new"]);
}

#[tokio::test(start_paused = true)]
async fn idle_after_quiet_period() {
    let timeline = ResourceTimeline::new();
    let collector = TimingCollector::attach(&timeline);

    let producer = timeline.clone();
    tokio::spawn(async move {
        for i in 0..3 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            producer.record(rec(&format!("r{i}"), "img"));
        }
    });

    let config = IdleConfig {
        quiet_ms: 500,
        timeout_secs: 30,
    };
    let outcome = collector.wait_for_idle(&config).await;
    assert_eq!(outcome, IdleOutcome::Idle { records: 3 });
}

#[tokio::test(start_paused = true)]
async fn steady_traffic_times_out() {
    let timeline = ResourceTimeline::new();
    let collector = TimingCollector::attach(&timeline);

    let producer = timeline.clone();
    let traffic = tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(200)).await;
            producer.record(rec("beacon", "fetch"));
        }
    });

    let config = IdleConfig {
        quiet_ms: 500,
        timeout_secs: 2,
    };
    let outcome = collector.wait_for_idle(&config).await;
    traffic.abort();
    assert!(matches!(outcome, IdleOutcome::TimedOut { records } if records > 0));
}

#[tokio::test(start_paused = true)]
async fn closed_timeline_counts_as_idle() {
    let timeline = ResourceTimeline::new();
    timeline.record(rec("only", "img"));
    let collector = TimingCollector::attach(&timeline);
    drop(timeline);

    let outcome = collector.wait_for_idle(&IdleConfig::default()).await;
    assert_eq!(outcome, IdleOutcome::Idle { records: 1 });
}

#[test]
fn record_serializes_with_camel_case_fields() {
    let record = TimingRecord::new("https://example.com/a.png", "img")
        .with_timing(12.5, 3.25)
        .with_transfer_size(Some(2048));
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "https://example.com/a.png",
            "initiatorType": "img",
            "duration": 3.25,
            "transferSize": 2048,
            "startTime": 12.5,
        })
    );
}

#[test]
fn opaque_records_omit_transfer_size() {
    let record = TimingRecord::new("https://cdn.example.net/x.js", "script").with_timing(-4.0, 1.0);
    assert!(record.is_opaque());
    assert_eq!(record.start_time, 0.0);
    let json = serde_json::to_string(&record).unwrap();
    assert!(!json.contains("transferSize"));
    assert!(TimingRecord::new("a", "img")
        .with_transfer_size(Some(0))
        .is_opaque());
}
