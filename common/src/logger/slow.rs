use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Awaits `fut` and emits a `performance` warning when it took longer than `max`.
///
/// Timed on the Tokio clock, so under a paused runtime the measurement
/// follows `tokio::time::advance` and auto-advance instead of wall time.
pub async fn warn_if_slow<F, T>(label: &'static str, max: Duration, fut: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    let elapsed = start.elapsed();
    if elapsed > max {
        tracing::warn!(
            target: "performance",
            label = label,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow operation detected"
        );
    }
    out
}
