use std::sync::atomic::Ordering;
use std::time::Duration;

use corelib::{MonitorState, Thresholds};
use engine::{FetchError, MonitorConfig, MonitorLoop, shutdown_channel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::time::{Instant, timeout};

use mock_sources::{ConstantSource, RecordingNotifier, ScriptedSource, Step};

fn config(buy: Decimal, sell: Decimal, poll_interval: Duration) -> MonitorConfig {
    MonitorConfig {
        ticker: "PETR4".into(),
        thresholds: Thresholds::new(buy, sell),
        poll_interval,
        auth_token: "token".into(),
    }
}

fn petr4(poll_interval: Duration) -> MonitorConfig {
    config(dec!(22.59), dec!(22.67), poll_interval)
}

#[tokio::test(start_paused = true)]
async fn scenario_emits_sell_buy_sell_in_order() {
    let (trigger, shutdown) = shutdown_channel();
    let source = ScriptedSource::prices(
        &[dec!(22.70), dec!(22.60), dec!(22.55), dec!(22.62), dec!(22.68)],
        trigger,
    );
    let notifier = RecordingNotifier::default();
    let monitor = MonitorLoop::new(petr4(Duration::from_secs(1)), source, notifier.clone());
    let counters = monitor.counters();

    let state = monitor.run(shutdown).await;

    assert_eq!(
        notifier.subjects(),
        vec!["SELL alert - PETR4", "BUY alert - PETR4", "SELL alert - PETR4"]
    );
    let bodies = notifier.bodies();
    assert!(bodies[0].contains("Current price: R$ 22.70"));
    assert!(bodies[1].contains("Current price: R$ 22.55"));
    assert!(bodies[2].contains("Current price: R$ 22.68"));

    assert_eq!(
        state,
        MonitorState {
            buy_armed: true,
            sell_armed: false
        }
    );
    // Five samples plus the cancelled sixth attempt.
    assert_eq!(counters.cycles(), 6);
    assert_eq!(counters.alerts_fired(), 3);
}

#[tokio::test(start_paused = true)]
async fn degenerate_thresholds_send_both_alerts() {
    let (trigger, shutdown) = shutdown_channel();
    let source = ScriptedSource::prices(&[dec!(22.55)], trigger);
    let notifier = RecordingNotifier::default();
    let cfg = config(dec!(22.60), dec!(22.50), Duration::from_secs(1));

    let state = MonitorLoop::new(cfg, source, notifier.clone())
        .run(shutdown)
        .await;

    assert_eq!(
        notifier.subjects(),
        vec!["BUY alert - PETR4", "SELL alert - PETR4"]
    );
    assert!(!state.buy_armed && !state.sell_armed);
}

#[tokio::test(start_paused = true)]
async fn fetch_failure_only_skips_its_own_cycle() {
    let (trigger, shutdown) = shutdown_channel();
    let source = ScriptedSource::new(
        [
            Step::Fail(FetchError::Timeout),
            Step::Price(dec!(22.50)),
            Step::Fail(FetchError::MalformedResponse("no results".into())),
            Step::Price(dec!(22.80)),
        ],
        trigger,
    );
    let notifier = RecordingNotifier::default();
    let monitor = MonitorLoop::new(petr4(Duration::from_secs(1)), source, notifier.clone());
    let counters = monitor.counters();

    let start = Instant::now();
    monitor.run(shutdown).await;

    assert_eq!(
        notifier.subjects(),
        vec!["BUY alert - PETR4", "SELL alert - PETR4"]
    );
    assert_eq!(counters.fetch_failures(), 2);
    // No fast retry: every cycle, failed or not, is followed by the full wait.
    assert!(start.elapsed() >= Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn failed_delivery_is_not_retried() {
    let (trigger, shutdown) = shutdown_channel();
    let source = ScriptedSource::prices(&[dec!(22.50), dec!(22.45), dec!(22.40)], trigger);
    let notifier = RecordingNotifier::failing();
    let monitor = MonitorLoop::new(petr4(Duration::from_millis(200)), source, notifier.clone());
    let counters = monitor.counters();

    let state = monitor.run(shutdown).await;

    assert_eq!(notifier.subjects(), vec!["BUY alert - PETR4"]);
    assert_eq!(counters.notify_failures(), 1);
    assert!(!state.buy_armed);
}

#[tokio::test(start_paused = true)]
async fn cancellation_during_fetch_skips_evaluation() {
    let (trigger, shutdown) = shutdown_channel();
    // Would fire a buy alert if it were evaluated.
    let source = ScriptedSource::new([Step::CancelDuring(dec!(22.00))], trigger);
    let calls = source.calls.clone();
    let notifier = RecordingNotifier::default();
    let monitor = MonitorLoop::new(petr4(Duration::from_secs(1)), source, notifier.clone());
    let counters = monitor.counters();

    let state = monitor.run(shutdown).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(counters.cycles(), 1);
    assert!(notifier.subjects().is_empty());
    assert_eq!(state, MonitorState::default());
}

#[tokio::test(start_paused = true)]
async fn cancellation_during_wait_does_not_wait_out_interval() {
    let (trigger, shutdown) = shutdown_channel();
    let source = ConstantSource::new(dec!(22.63));
    let calls = source.calls.clone();
    let monitor = MonitorLoop::new(
        petr4(Duration::from_secs(3600)),
        source,
        RecordingNotifier::default(),
    );

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.trigger();
    });

    let start = Instant::now();
    monitor.run(shutdown).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn interval_is_the_gap_between_cycles() {
    let (trigger, shutdown) = shutdown_channel();
    let source = ScriptedSource::prices(&[dec!(22.61), dec!(22.62), dec!(22.63)], trigger);

    let start = Instant::now();
    MonitorLoop::new(
        petr4(Duration::from_secs(2)),
        source,
        RecordingNotifier::default(),
    )
    .run(shutdown)
    .await;

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(6), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(8), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn zero_interval_runs_back_to_back_and_still_stops() {
    let (trigger, shutdown) = shutdown_channel();
    let source = ConstantSource::new(dec!(22.63));
    let calls = source.calls.clone();
    let monitor = MonitorLoop::new(
        petr4(Duration::ZERO),
        source,
        RecordingNotifier::default(),
    );
    let counters = monitor.counters();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.trigger();
    });

    timeout(Duration::from_secs(5), monitor.run(shutdown))
        .await
        .expect("zero-interval loop must observe shutdown");

    assert!(calls.load(Ordering::SeqCst) > 1);
    assert_eq!(counters.fetch_failures(), 0);
}

#[tokio::test]
async fn shutdown_before_start_performs_no_io() {
    let (trigger, shutdown) = shutdown_channel();
    trigger.trigger();
    let source = ConstantSource::new(dec!(1));
    let calls = source.calls.clone();
    let monitor = MonitorLoop::new(
        petr4(Duration::from_secs(1)),
        source,
        RecordingNotifier::default(),
    );
    let counters = monitor.counters();

    let state = monitor.run(shutdown).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(counters.cycles(), 0);
    assert_eq!(state, MonitorState::default());
}
