//! Network idle detection on top of a [`TimingCollector`].

use tokio::time::{timeout, Instant};

use crate::config::IdleConfig;

use super::TimingCollector;

/// How [`TimingCollector::wait_for_idle`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleOutcome {
    /// No record arrived for the quiet period, or the timeline closed.
    Idle { records: usize },
    /// The overall timeout elapsed while records kept arriving.
    TimedOut { records: usize },
}

impl TimingCollector {
    /// Resolves once the page's network has settled.
    ///
    /// Each new record restarts the quiet window; `config.timeout()` bounds
    /// the whole wait regardless.
    pub async fn wait_for_idle(&self, config: &IdleConfig) -> IdleOutcome {
        let quiet = config.quiet();
        let deadline = Instant::now() + config.timeout();
        let mut appended = self.appended.clone();
        appended.borrow_and_update();

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return IdleOutcome::TimedOut {
                    records: self.len(),
                };
            }
            let window = quiet.min(remaining);
            match timeout(window, appended.changed()).await {
                Err(_) if window == quiet => {
                    tracing::debug!(records = self.len(), "network idle");
                    return IdleOutcome::Idle {
                        records: self.len(),
                    };
                }
                Err(_) => {
                    tracing::debug!(records = self.len(), "gave up waiting for network idle");
                    return IdleOutcome::TimedOut {
                        records: self.len(),
                    };
                }
                Ok(Ok(())) => {}
                // Timeline dropped: nothing more can arrive.
                Ok(Err(_)) => {
                    return IdleOutcome::Idle {
                        records: self.len(),
                    }
                }
            }
        }
    }
}
