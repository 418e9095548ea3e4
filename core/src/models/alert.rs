use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::AlertKind;

/// Armed/fired flags for both sides of the band.
///
/// `true` means the side is armed: the next qualifying price fires.
/// `false` means it already fired for the current excursion and stays
/// quiet until the price moves back through its own threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorState {
    pub buy_armed: bool,
    pub sell_armed: bool,
}

impl Default for MonitorState {
    /// Both sides start armed: nothing has fired yet.
    fn default() -> Self {
        Self {
            buy_armed: true,
            sell_armed: true,
        }
    }
}

/// A threshold crossing that should be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEvent {
    pub kind: AlertKind,
    pub price: Decimal,
    pub threshold: Decimal,
    pub ticker: String,
    pub timestamp: DateTime<Utc>,
}
