use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Output flavour of the process-wide subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, one event per line.
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

impl LogFormat {
    /// `APP_ENV=production` selects JSON, anything else plain text.
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV") {
            Ok(v) if v == "production" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_logger(service_name: &'static str, format: LogFormat) {
    LOGGER_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let builder = fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true);

        match format {
            LogFormat::Json => builder.json().init(),
            LogFormat::Text => builder.init(),
        }

        tracing::info!(service = service_name, ?format, "logger initialized");
    });
}
