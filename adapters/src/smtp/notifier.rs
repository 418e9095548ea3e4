use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use engine::{Notifier, NotifyError};
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, instrument};

use super::errors::SmtpError;

/// Port on which TLS starts immediately instead of via STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub to: String,
    pub enable_ssl: bool,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("enable_ssl", &self.enable_ssl)
            .finish()
    }
}

/// Sends alerts as plain-text mail to a single recipient.
///
/// Must be built inside a Tokio runtime: the pooled transport spawns
/// its connection housekeeping there.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(settings: SmtpSettings) -> Result<Self, SmtpError> {
        let from = parse_mailbox("from", &settings.from)?;
        let to = parse_mailbox("to", &settings.to)?;

        let mut builder = if !settings.enable_ssl {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        } else if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };

        builder = builder
            .port(settings.port)
            .timeout(Some(Duration::from_secs(10)));

        if !settings.username.is_empty() {
            builder = builder.credentials(Credentials::new(settings.username, settings.password));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            to,
        })
    }

    pub(crate) fn build_message(&self, subject: &str, body: &str) -> Result<Message, NotifyError> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| NotifyError::InvalidMessage(e.to_string()))
    }
}

fn parse_mailbox(field: &'static str, raw: &str) -> Result<Mailbox, SmtpError> {
    raw.trim()
        .parse()
        .map_err(|source| SmtpError::InvalidAddress { field, source })
}

#[async_trait]
impl Notifier for SmtpNotifier {
    #[instrument(skip(self, body), fields(to = %self.to), level = "debug")]
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        let message = self.build_message(subject, body)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        debug!(code = %response.code(), "smtp accepted message");
        Ok(())
    }
}
