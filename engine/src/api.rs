use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::{FetchError, NotifyError};

/// Source of the current market price of one instrument.
///
/// Cancellation is expressed by dropping the returned future: the
/// monitor races it against its shutdown signal, so implementations
/// must not rely on running to completion.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, ticker: &str, auth_token: &str) -> Result<Decimal, FetchError>;
}

/// Delivery channel for rendered alerts. No internal queue: a call
/// returns once the message was handed off or failed.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError>;
}
