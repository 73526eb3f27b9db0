//! Resource timing: the platform-side [`ResourceTimeline`] and the
//! [`TimingCollector`] that mirrors it into an append-only log.
//!
//! A collector is attached once per document. Attaching copies whatever the
//! timeline already buffered, then a single task appends every batch the
//! timeline delivers afterwards, in delivery order, until the timeline is
//! dropped. Nothing is deduplicated and nothing bounds the log's growth.

mod collector;
mod idle;
mod timeline;

use serde::{Deserialize, Serialize};

pub use collector::TimingCollector;
pub use idle::IdleOutcome;
pub use timeline::{ResourceTimeline, DEFAULT_BUFFER_SIZE};

/// One resource fetch as reported by the platform. Times are milliseconds
/// relative to navigation start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingRecord {
    pub name: String,
    pub initiator_type: String,
    pub duration: f64,
    /// Zero or absent when the response was opaque (cross-origin without
    /// `Timing-Allow-Origin`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_size: Option<u64>,
    pub start_time: f64,
}

impl TimingRecord {
    pub fn new(name: impl Into<String>, initiator_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initiator_type: initiator_type.into(),
            duration: 0.0,
            transfer_size: None,
            start_time: 0.0,
        }
    }

    pub fn with_timing(mut self, start_time: f64, duration: f64) -> Self {
        self.start_time = start_time.max(0.0);
        self.duration = duration.max(0.0);
        self
    }

    pub fn with_transfer_size(mut self, transfer_size: Option<u64>) -> Self {
        self.transfer_size = transfer_size;
        self
    }

    /// True when the origin withheld size detail.
    pub fn is_opaque(&self) -> bool {
        self.transfer_size.unwrap_or(0) == 0
    }
}

#[cfg(test)]
mod tests;
