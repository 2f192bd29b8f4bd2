use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{Instant, MissedTickBehavior};

use signal_common::pipeline::{PushNotifier, RecordSource};
use signal_common::types::CycleReport;
use signal_engine::dispatcher::Dispatcher;
use signal_engine::seen::SeenStore;

/// Drives poll → dedupe → notify on a fixed period.
///
/// Cycles run inline on the loop, so they never overlap: an overrunning cycle
/// delays the next tick instead of racing it.
pub struct Scheduler<S, N, K> {
    source: S,
    dispatcher: Dispatcher<N, K>,
    period: Duration,
}

impl<S, N, K> Scheduler<S, N, K>
where
    S: RecordSource,
    N: PushNotifier,
    K: SeenStore,
{
    pub fn new(source: S, dispatcher: Dispatcher<N, K>, period: Duration) -> Self {
        Self {
            source,
            dispatcher,
            period,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<N, K> {
        &self.dispatcher
    }

    /// Run a single dispatch cycle.
    ///
    /// A data-store failure is logged and the cycle is skipped: nothing is
    /// marked seen and nothing is sent.
    pub async fn tick(&mut self) -> CycleReport {
        let mut report = CycleReport::new(Utc::now());
        tracing::debug!("Checking for new signals");

        match self.source.fetch_qualifying().await {
            Ok(rows) => {
                report.fetched = rows.len();
                self.dispatcher.dispatch(&rows, &mut report).await;
            }
            Err(e) => {
                report.skipped = true;
                tracing::error!(
                    kind = %e.kind(),
                    error = %e,
                    "Data store check failed, skipping cycle"
                );
                return report;
            }
        }

        if report.notified > 0 {
            tracing::info!(
                fetched = report.fetched,
                notified = report.notified,
                delivered = report.delivered,
                failed = report.failed,
                seen_total = self.dispatcher.seen().len(),
                "Dispatch cycle complete"
            );
        } else {
            tracing::debug!(fetched = report.fetched, "No new signals");
        }

        report
    }

    /// Tick every period until `shutdown` resolves. Returns the number of
    /// cycles run.
    ///
    /// The first cycle runs one full period after start. Shutdown is only
    /// observed between cycles; a cycle in progress always completes.
    pub async fn run<F>(&mut self, shutdown: F) -> u64
    where
        F: Future,
    {
        let mut interval = tokio::time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(
            period_secs = self.period.as_secs(),
            "Scheduler started"
        );

        let mut cycles = 0u64;
        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = &mut shutdown => break,
            }

            self.tick().await;
            cycles += 1;
        }

        cycles
    }
}
