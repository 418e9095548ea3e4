use std::fmt;

pub mod alert;
pub mod market;

pub use alert::{AlertEvent, MonitorState};
pub use market::{PriceSample, Thresholds};

/// Which side of the band an alert belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// Price dropped to or below the buy floor.
    Buy,
    /// Price rose to or above the sell ceiling.
    Sell,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Buy => "BUY",
            AlertKind::Sell => "SELL",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
