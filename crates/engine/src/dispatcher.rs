//! Deduplication and dispatch.
//!
//! For every polled row:
//! 1. Skip it if its id is already in the seen-set
//! 2. Otherwise mark the id seen
//! 3. Build the message and make one delivery attempt
//!
//! The id is marked before the attempt, so a failed delivery is never retried
//! (at-most-once).

use signal_common::pipeline::PushNotifier;
use signal_common::types::{CycleReport, QualifyingRecord};

use crate::seen::SeenStore;

/// Routes newly seen rows to the push notifier.
pub struct Dispatcher<N, K> {
    notifier: N,
    seen: K,
}

impl<N, K> Dispatcher<N, K>
where
    N: PushNotifier,
    K: SeenStore,
{
    pub fn new(notifier: N, seen: K) -> Self {
        Self { notifier, seen }
    }

    pub fn seen(&self) -> &K {
        &self.seen
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Dispatch one cycle's rows, recording counts into `report`.
    pub async fn dispatch(&mut self, records: &[QualifyingRecord], report: &mut CycleReport) {
        for record in records {
            if !self.seen.mark_seen(record.id) {
                report.already_seen += 1;
                continue;
            }

            let message = record.message();
            report.notified += 1;

            match self.notifier.send(&message).await {
                Ok(()) => {
                    report.delivered += 1;
                    tracing::info!(signal_id = record.id, body = %message, "Notified signal");
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        signal_id = record.id,
                        kind = %e.kind(),
                        status = e.status(),
                        error = %e,
                        "Notification failed, signal will not be retried"
                    );
                }
            }
        }
    }
}
