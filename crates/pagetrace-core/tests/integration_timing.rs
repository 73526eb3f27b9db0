//! Integration test: HAR capture replayed through a timeline, collected,
//! and merged with the page's scanned references.

mod common;

use common::{write_temp, PAGE_HAR, PAGE_HTML, PAGE_URL, SITE_CSS};
use pagetrace_core::config::IdleConfig;
use pagetrace_core::manifest::{build_manifest, unique_urls};
use pagetrace_core::{har, scan, Document, IdleOutcome, ResourceTimeline, TimingCollector};

#[tokio::test]
async fn late_collector_sees_buffered_then_live_records() {
    let har_file = write_temp(PAGE_HAR);
    let mut records = har::load_timing_records(har_file.path()).unwrap();
    assert_eq!(records.len(), 3);

    let live = records.split_off(1);
    let timeline = ResourceTimeline::new();
    timeline.record_batch(records.clone());

    let collector = TimingCollector::attach(&timeline);
    assert_eq!(collector.records(), records);

    timeline.record_batch(live.clone());
    drop(timeline);
    let log = collector.finish().await;

    let mut expected = records;
    expected.extend(live);
    assert_eq!(log, expected);
}

#[tokio::test(start_paused = true)]
async fn collector_reports_idle_after_the_page_settles() {
    let records = har::parse_timing_records(PAGE_HAR.as_bytes()).unwrap();
    let timeline = ResourceTimeline::new();
    let collector = TimingCollector::attach(&timeline);

    let producer = timeline.clone();
    tokio::spawn(async move {
        for record in records {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            producer.record(record);
        }
    });

    let outcome = collector
        .wait_for_idle(&IdleConfig {
            quiet_ms: 1_000,
            timeout_secs: 10,
        })
        .await;
    assert_eq!(outcome, IdleOutcome::Idle { records: 3 });
    // The timeline is still alive; the collector keeps following it.
    assert!(collector.is_following());
    drop(timeline);
}

#[test]
fn manifest_merges_scan_and_timing() {
    let doc = Document::builder(PAGE_URL)
        .stylesheet("/css/site.css", SITE_CSS)
        .parse(PAGE_HTML)
        .unwrap();
    let refs = scan(&doc);
    let records = har::parse_timing_records(PAGE_HAR.as_bytes()).unwrap();

    let manifest = build_manifest(&refs, &records);
    assert_eq!(manifest.len(), refs.len() + records.len());
    assert_eq!(manifest[0].url, "https://shop.example.com/css/site.css");
    assert_eq!(manifest[0].resource_type, "stylesheet");
    let tail = &manifest[refs.len()..];
    assert_eq!(tail[0].resource_type, "link");
    assert_eq!(tail[1].resource_type, "script");

    // Everything the HAR saw was also referenced by the markup.
    assert_eq!(unique_urls(&manifest).len(), refs.len());
}
