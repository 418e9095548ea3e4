//! Alert evaluation.
//!
//! A pure state transition: `(sample, thresholds, state) -> (events, state')`.
//! No I/O, no clock reads, no hidden state. The monitor owns the state
//! and feeds it back on the next cycle.
//!
//! Each side is a two-state machine (`Armed` / `Fired`):
//! - buy fires when `price <= buy` while armed, and re-arms once `price > buy`
//! - sell fires when `price >= sell` while armed, and re-arms once `price < sell`
//!
//! The fire and re-arm comparisons of one side are disjoint, so a single
//! sample can never both fire and re-arm the same side. The two sides are
//! evaluated independently; with a degenerate pair (`sell <= buy`) one
//! sample may fire both.

use corelib::{AlertEvent, AlertKind, MonitorState, PriceSample, Thresholds};
use rust_decimal::Decimal;

/// Evaluate one price sample against the thresholds.
///
/// Events are returned in a fixed order: buy first, then sell.
pub fn evaluate(
    ticker: &str,
    sample: &PriceSample,
    thresholds: &Thresholds,
    state: MonitorState,
) -> (Vec<AlertEvent>, MonitorState) {
    let price = sample.value;
    let mut next = state;
    let mut events = Vec::new();

    let event = |kind: AlertKind, threshold: Decimal| AlertEvent {
        kind,
        price,
        threshold,
        ticker: ticker.to_string(),
        timestamp: sample.observed_at,
    };

    if price <= thresholds.buy && next.buy_armed {
        events.push(event(AlertKind::Buy, thresholds.buy));
        next.buy_armed = false;
    }

    if price >= thresholds.sell && next.sell_armed {
        events.push(event(AlertKind::Sell, thresholds.sell));
        next.sell_armed = false;
    }

    // Re-arm against each side's own threshold.
    if price > thresholds.buy {
        next.buy_armed = true;
    }

    if price < thresholds.sell {
        next.sell_armed = true;
    }

    (events, next)
}
