use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// The two fixed price levels watched for one instrument.
///
/// Thresholds are parsed once at startup and never change afterwards.
/// No ordering between them is enforced here: a pair where
/// `sell <= buy` is a degenerate configuration, and the evaluator
/// simply lets both sides fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Floor: a price at or below it fires a buy alert.
    pub buy: Decimal,
    /// Ceiling: a price at or above it fires a sell alert.
    pub sell: Decimal,
}

impl Thresholds {
    pub fn new(buy: Decimal, sell: Decimal) -> Self {
        Self { buy, sell }
    }

    /// True when there is no hysteresis band between the two levels.
    pub fn is_degenerate(&self) -> bool {
        self.sell <= self.buy
    }
}

/// One observed market price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSample {
    pub value: Decimal,
    pub observed_at: DateTime<Utc>,
}

impl PriceSample {
    pub fn new(value: Decimal, observed_at: DateTime<Utc>) -> Self {
        Self { value, observed_at }
    }

    /// Sample stamped with the current wall-clock time.
    pub fn now(value: Decimal) -> Self {
        Self::new(value, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ordered_pair_is_not_degenerate() {
        assert!(!Thresholds::new(dec!(22.59), dec!(22.67)).is_degenerate());
    }

    #[test]
    fn equal_or_inverted_pair_is_degenerate() {
        assert!(Thresholds::new(dec!(22.60), dec!(22.50)).is_degenerate());
        assert!(Thresholds::new(dec!(22.60), dec!(22.60)).is_degenerate());
    }
}
