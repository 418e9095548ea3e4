use thiserror::Error;

/// Failure to obtain a price for the current cycle.
///
/// Always recoverable: the cycle is skipped and the loop carries on
/// after its normal wait.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("quote request timed out")]
    Timeout,

    #[error("quote service answered with HTTP {0}")]
    HttpStatus(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed quote response: {0}")]
    MalformedResponse(String),
}

/// Failure to deliver an alert.
///
/// The alert state has already moved to fired when this is observed;
/// the notification is dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("invalid alert message: {0}")]
    InvalidMessage(String),

    #[error("delivery failed: {0}")]
    Transport(String),
}
