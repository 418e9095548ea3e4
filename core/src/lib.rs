pub mod models;

pub use models::{AlertEvent, AlertKind, MonitorState, PriceSample, Thresholds};
