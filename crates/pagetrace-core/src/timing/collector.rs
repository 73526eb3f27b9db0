//! The append-only timing log and the task that feeds it.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::{mpsc::UnboundedReceiver, watch};
use tokio::task::JoinHandle;

use super::{ResourceTimeline, TimingRecord};

/// Owned, long-lived mirror of a [`ResourceTimeline`].
///
/// Readers get snapshots; the only writer is the collector's own task.
#[derive(Debug)]
pub struct TimingCollector {
    records: Arc<RwLock<Vec<TimingRecord>>>,
    /// Record count after each append. Closed once the task ends.
    pub(super) appended: watch::Receiver<usize>,
    task: JoinHandle<()>,
}

impl TimingCollector {
    /// Seeds the log with the timeline's buffered history and starts
    /// following new deliveries. Must be called inside a tokio runtime.
    pub fn attach(timeline: &ResourceTimeline) -> Self {
        let (buffered, deliveries) = timeline.observe();
        let seeded = buffered.len();
        let records = Arc::new(RwLock::new(buffered));
        let (appended_tx, appended) = watch::channel(seeded);
        let task = tokio::spawn(follow(deliveries, Arc::clone(&records), appended_tx));
        tracing::debug!(seeded, "timing collector attached");
        Self {
            records,
            appended,
            task,
        }
    }

    /// Snapshot of every record collected so far, in arrival order.
    pub fn records(&self) -> Vec<TimingRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// False once the timeline has been dropped and every delivery appended.
    pub fn is_following(&self) -> bool {
        !self.task.is_finished()
    }

    /// Waits until at least `count` records have been collected. Returns
    /// early with the current count if the timeline goes away first.
    pub async fn wait_for_len(&self, count: usize) -> usize {
        let mut appended = self.appended.clone();
        let reached = appended.wait_for(|n| *n >= count).await.map(|n| *n);
        reached.unwrap_or_else(|_| self.len())
    }

    /// Waits for the timeline to be dropped and returns the complete log.
    pub async fn finish(self) -> Vec<TimingRecord> {
        let Self { records, task, .. } = self;
        if let Err(err) = task.await {
            tracing::warn!(error = %err, "timing collector task failed");
        }
        let log = records.read().unwrap_or_else(PoisonError::into_inner);
        log.clone()
    }
}

async fn follow(
    mut deliveries: UnboundedReceiver<Vec<TimingRecord>>,
    records: Arc<RwLock<Vec<TimingRecord>>>,
    appended: watch::Sender<usize>,
) {
    while let Some(batch) = deliveries.recv().await {
        let batch_len = batch.len();
        let total = {
            let mut log = records.write().unwrap_or_else(PoisonError::into_inner);
            log.extend(batch);
            log.len()
        };
        appended.send_replace(total);
        tracing::trace!(batch_len, total, "timing records appended");
    }
    tracing::debug!("resource timeline closed; collector stopped");
}
