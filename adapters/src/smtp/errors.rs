use thiserror::Error;

/// Setup failures of the SMTP notifier. Delivery failures surface as
/// `engine::NotifyError` instead.
#[derive(Error, Debug)]
pub enum SmtpError {
    #[error("invalid {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
