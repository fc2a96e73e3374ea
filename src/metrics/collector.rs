use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::error;

use super::{AggregateReport, CategorizedBodies, Outcome, OutcomeCategory};

/// Producer half handed to every worker.
#[derive(Debug, Clone)]
pub struct ResultSink {
    tx: mpsc::Sender<Outcome>,
}

impl ResultSink {
    /// Hands one outcome to the collector without waiting.
    ///
    /// Returns `false` once the collector side is gone, or when the buffer is
    /// full. The collector only drains after every worker returned, so a full
    /// buffer can never free up and the outcome is dropped.
    #[must_use]
    pub fn submit(&self, outcome: Outcome) -> bool {
        match self.tx.try_send(outcome) {
            Ok(()) => true,
            Err(TrySendError::Full(outcome)) => {
                error!(
                    category = outcome.category.as_str(),
                    "Result buffer is full; it must hold clients x requests outcomes. Dropping outcome."
                );
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}

/// Consumer half, drained exactly once after every worker returned.
#[derive(Debug)]
pub struct ResultCollector {
    rx: mpsc::Receiver<Outcome>,
}

impl ResultCollector {
    /// Creates the sink/collector pair.
    ///
    /// `capacity` must equal the total number of attempts across all workers
    /// (clients x requests). With that size no `submit` ever waits.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero or above `tokio::sync::Semaphore::MAX_PERMITS`;
    /// `RunConfig::outcome_capacity` rules both out.
    #[must_use]
    pub fn channel(capacity: usize) -> (ResultSink, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (ResultSink { tx }, Self { rx })
    }

    /// Closes the channel to new writes and folds every buffered outcome.
    pub async fn drain(mut self, elapsed: Duration) -> (AggregateReport, CategorizedBodies) {
        self.rx.close();
        let mut tally = Tally::default();
        while let Some(outcome) = self.rx.recv().await {
            tally.record(outcome);
        }
        tally.finish(elapsed)
    }
}

/// Running per-category counters plus the bodies seen so far.
#[derive(Debug, Default)]
pub struct Tally {
    success: u64,
    network_failed: u64,
    bad_failed: u64,
    bodies: CategorizedBodies,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome.category {
            OutcomeCategory::NetworkError => {
                self.network_failed = self.network_failed.saturating_add(1);
                self.bodies.network.push(outcome.payload);
            }
            OutcomeCategory::BadStatus => {
                self.bad_failed = self.bad_failed.saturating_add(1);
                self.bodies.bad.push(outcome.payload);
            }
            OutcomeCategory::Success => {
                self.success = self.success.saturating_add(1);
                self.bodies.success.push(outcome.payload);
            }
        }
    }

    #[must_use]
    pub fn finish(self, elapsed: Duration) -> (AggregateReport, CategorizedBodies) {
        let report =
            AggregateReport::new(self.success, self.network_failed, self.bad_failed, elapsed);
        (report, self.bodies)
    }
}
