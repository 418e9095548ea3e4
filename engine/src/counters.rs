use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimal counters for operational visibility.
///
/// Cloning shares the underlying atomics, so a handle kept outside the
/// monitor observes its progress.
#[derive(Clone, Debug, Default)]
pub struct MonitorCounters {
    /// Poll attempts, including failed and cancelled ones.
    pub cycles: Arc<AtomicU64>,
    pub fetch_failures: Arc<AtomicU64>,
    pub alerts_fired: Arc<AtomicU64>,
    pub notify_failures: Arc<AtomicU64>,
}

impl MonitorCounters {
    /// Increments the cycle counter and returns the new ordinal (1-based).
    pub fn next_cycle(&self) -> u64 {
        self.cycles.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    pub fn fetch_failures(&self) -> u64 {
        self.fetch_failures.load(Ordering::Relaxed)
    }

    pub fn alerts_fired(&self) -> u64 {
        self.alerts_fired.load(Ordering::Relaxed)
    }

    pub fn notify_failures(&self) -> u64 {
        self.notify_failures.load(Ordering::Relaxed)
    }
}
