//! Platform side of resource timing: a bounded history buffer plus live
//! observers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::TimingRecord;

/// Default capacity of the buffered history, matching browsers' default
/// resource timing buffer.
pub const DEFAULT_BUFFER_SIZE: usize = 250;

#[derive(Debug)]
struct TimelineState {
    buffer: Vec<TimingRecord>,
    capacity: usize,
    observers: Vec<UnboundedSender<Vec<TimingRecord>>>,
}

/// Completed resource fetches of one document.
///
/// Clones share state. When the last clone is dropped every observer's
/// stream ends, which is how attached collectors learn the document is gone.
#[derive(Debug, Clone)]
pub struct ResourceTimeline {
    state: Arc<Mutex<TimelineState>>,
}

impl Default for ResourceTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceTimeline {
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    pub fn with_buffer_size(capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(TimelineState {
                buffer: Vec::new(),
                capacity,
                observers: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TimelineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reports one completed fetch.
    pub fn record(&self, entry: TimingRecord) {
        self.record_batch(vec![entry]);
    }

    /// Reports fetches that completed together; observers receive them as
    /// one delivery. Entries past the buffer capacity are still delivered
    /// but not kept for later observers.
    pub fn record_batch(&self, entries: Vec<TimingRecord>) {
        if entries.is_empty() {
            return;
        }
        let mut state = self.lock();
        let room = state.capacity.saturating_sub(state.buffer.len());
        if room < entries.len() {
            tracing::debug!(
                dropped = entries.len() - room,
                capacity = state.capacity,
                "resource timing buffer full"
            );
        }
        state.buffer.extend(entries.iter().take(room).cloned());
        state
            .observers
            .retain(|observer| observer.send(entries.clone()).is_ok());
    }

    /// Snapshot of the buffered history.
    pub fn buffered(&self) -> Vec<TimingRecord> {
        self.lock().buffer.clone()
    }

    /// Empties the buffered history. Live observers are unaffected.
    pub fn clear_buffer(&self) {
        self.lock().buffer.clear();
    }

    /// Changes the buffer capacity. Already-buffered entries are kept.
    pub fn set_buffer_size(&self, capacity: usize) {
        self.lock().capacity = capacity;
    }

    /// Live observers (closed ones are pruned on the next delivery).
    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    /// Atomically snapshots the buffer and subscribes, so that no entry is
    /// missed or seen twice between the two.
    pub(crate) fn observe(&self) -> (Vec<TimingRecord>, UnboundedReceiver<Vec<TimingRecord>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.lock();
        state.observers.push(tx);
        (state.buffer.clone(), rx)
    }
}
