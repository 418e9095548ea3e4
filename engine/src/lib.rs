//! Price alarm engine.
//!
//! Pure alert evaluation plus the cancellation-aware polling loop that
//! drives it. Transports live behind the [`api::PriceSource`] and
//! [`api::Notifier`] traits so the loop can run against fakes.

pub mod api;
pub mod counters;
pub mod error;
pub mod evaluator;
pub mod message;
pub mod monitor;
pub mod shutdown;

pub use api::{Notifier, PriceSource};
pub use counters::MonitorCounters;
pub use error::{FetchError, NotifyError};
pub use evaluator::evaluate;
pub use message::AlertMessage;
pub use monitor::{MonitorConfig, MonitorLoop};
pub use shutdown::{Shutdown, ShutdownTrigger, shutdown_channel};
