//! Monitor loop.
//!
//! Drives one evaluation cycle at a time:
//! shutdown check → fetch → evaluate → notify → wait → repeat.
//!
//! Cancellation is cooperative. It is checked before every cycle and
//! raced against the two suspension points (price fetch and the
//! inter-cycle wait). A notification already being sent runs to
//! completion or to the notifier's own timeout.
//!
//! The interval is the gap between cycles, not a fixed rate: a slow
//! fetch stretches the effective sampling period.

use std::fmt;
use std::time::Duration;

use common::logger::warn_if_slow;
use corelib::{AlertEvent, MonitorState, PriceSample, Thresholds};
use tokio::time::sleep;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::api::{Notifier, PriceSource};
use crate::counters::MonitorCounters;
use crate::evaluator::evaluate;
use crate::message::AlertMessage;
use crate::shutdown::Shutdown;

/// Fetches slower than this are reported as slow operations.
const SLOW_FETCH: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct MonitorConfig {
    pub ticker: String,
    pub thresholds: Thresholds,
    /// Delay between the end of one cycle and the start of the next.
    /// Zero means back-to-back cycles.
    pub poll_interval: Duration,
    /// Passed through to the price source untouched.
    pub auth_token: String,
}

impl fmt::Debug for MonitorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorConfig")
            .field("ticker", &self.ticker)
            .field("thresholds", &self.thresholds)
            .field("poll_interval", &self.poll_interval)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

enum CycleOutcome {
    Evaluated,
    FetchFailed,
    Cancelled,
}

pub struct MonitorLoop<P, N> {
    config: MonitorConfig,
    source: P,
    notifier: N,
    state: MonitorState,
    counters: MonitorCounters,
}

impl<P: PriceSource, N: Notifier> MonitorLoop<P, N> {
    /// Both alert sides start armed.
    pub fn new(config: MonitorConfig, source: P, notifier: N) -> Self {
        Self {
            config,
            source,
            notifier,
            state: MonitorState::default(),
            counters: MonitorCounters::default(),
        }
    }

    /// Shared handle on the loop's counters; stays live after `run` consumes it.
    pub fn counters(&self) -> MonitorCounters {
        self.counters.clone()
    }

    /// Runs cycles until `shutdown` is requested and returns the final
    /// alert state. Per-cycle failures are logged and never end the loop.
    pub async fn run(mut self, mut shutdown: Shutdown) -> MonitorState {
        info!(
            ticker = %self.config.ticker,
            buy = %self.config.thresholds.buy,
            sell = %self.config.thresholds.sell,
            interval_ms = self.config.poll_interval.as_millis() as u64,
            "monitor started"
        );

        while !shutdown.is_requested() {
            let cycle = self.counters.next_cycle();
            let span = info_span!("cycle", cycle, ticker = %self.config.ticker);

            let outcome = self.run_cycle(&mut shutdown).instrument(span).await;
            if matches!(outcome, CycleOutcome::Cancelled) {
                break;
            }

            if !self.pause(&mut shutdown).await {
                break;
            }
        }

        info!(
            cycles = self.counters.cycles(),
            alerts = self.counters.alerts_fired(),
            fetch_failures = self.counters.fetch_failures(),
            notify_failures = self.counters.notify_failures(),
            "monitor stopped"
        );

        self.state
    }

    async fn run_cycle(&mut self, shutdown: &mut Shutdown) -> CycleOutcome {
        let fetch = warn_if_slow(
            "price_fetch",
            SLOW_FETCH,
            self.source
                .fetch(&self.config.ticker, &self.config.auth_token),
        );

        let fetched = tokio::select! {
            biased;
            _ = shutdown.requested() => {
                info!("shutdown requested during price fetch, abandoning cycle");
                return CycleOutcome::Cancelled;
            }
            res = fetch => res,
        };

        let price = match fetched {
            Ok(price) => price,
            Err(error) => {
                MonitorCounters::bump(&self.counters.fetch_failures);
                warn!(%error, "price fetch failed, skipping cycle");
                return CycleOutcome::FetchFailed;
            }
        };

        let sample = PriceSample::now(price);
        info!(price = %sample.value, "quote received");

        let (events, next) = evaluate(
            &self.config.ticker,
            &sample,
            &self.config.thresholds,
            self.state,
        );

        if next != self.state {
            debug!(
                buy_armed = next.buy_armed,
                sell_armed = next.sell_armed,
                "alert state changed"
            );
        }
        self.state = next;

        for event in &events {
            self.dispatch(event).await;
        }

        CycleOutcome::Evaluated
    }

    /// Delivery failures are logged and dropped: the side stays fired.
    async fn dispatch(&self, event: &AlertEvent) {
        MonitorCounters::bump(&self.counters.alerts_fired);
        let message = AlertMessage::from(event);

        match self.notifier.send(&message.subject, &message.body).await {
            Ok(()) => info!(
                kind = %event.kind,
                price = %event.price,
                threshold = %event.threshold,
                "alert sent"
            ),
            Err(error) => {
                MonitorCounters::bump(&self.counters.notify_failures);
                error!(
                    kind = %event.kind,
                    price = %event.price,
                    threshold = %event.threshold,
                    %error,
                    "alert delivery failed, notification dropped"
                );
            }
        }
    }

    /// Waits out the poll interval. Returns `false` when shutdown was
    /// requested instead.
    async fn pause(&self, shutdown: &mut Shutdown) -> bool {
        let interval = self.config.poll_interval;

        if interval.is_zero() {
            // Let the trigger side run between back-to-back cycles.
            tokio::task::yield_now().await;
            return !shutdown.is_requested();
        }

        tokio::select! {
            biased;
            _ = shutdown.requested() => {
                info!("shutdown requested, stopping monitor");
                false
            }
            _ = sleep(interval) => true,
        }
    }
}
