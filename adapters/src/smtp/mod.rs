pub mod errors;
pub mod notifier;

pub use errors::SmtpError;
pub use notifier::{SmtpNotifier, SmtpSettings};
