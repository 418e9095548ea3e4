use chrono::Local;
use corelib::{AlertEvent, AlertKind};

const CURRENCY: &str = "R$";

/// Subject and plain-text body for one alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

impl From<&AlertEvent> for AlertMessage {
    fn from(event: &AlertEvent) -> Self {
        let kind = event.kind.as_str();
        let limit_label = match event.kind {
            AlertKind::Buy => "Buy limit",
            AlertKind::Sell => "Sell limit",
        };
        let at = event.timestamp.with_timezone(&Local);

        let subject = format!("{kind} alert - {}", event.ticker);
        let body = format!(
            "{ticker} reached the {kind} price.\n\
             Current price: {CURRENCY} {price}\n\
             {limit_label}: {CURRENCY} {threshold}\n\
             Date/Time: {at}",
            ticker = event.ticker,
            price = event.price,
            threshold = event.threshold,
            at = at.format("%Y-%m-%d %H:%M:%S"),
        );

        Self { subject, body }
    }
}
