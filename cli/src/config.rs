//! `config.json` loading.
//!
//! Read once at startup. Keys are PascalCase, e.g.
//!
//! ```json
//! {
//!   "EmailTo": "investor@example.com",
//!   "PollIntervalMs": 30000,
//!   "BrapiToken": "...",
//!   "SmtpHost": "smtp.gmail.com",
//!   "SmtpPort": 587,
//!   "SmtpUser": "alarm@example.com",
//!   "SmtpPass": "..."
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use adapters::brapi::DEFAULT_BASE_URL;
use adapters::smtp::SmtpSettings;
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppConfig {
    /// Alert recipient.
    pub email_to: String,

    /// Sender address. Falls back to `SmtpUser`.
    #[serde(default)]
    pub email_from: Option<String>,

    /// Delay between polls. Zero polls back-to-back.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Credential for the quote API, passed through untouched.
    pub brapi_token: String,

    #[serde(default)]
    pub brapi_base_url: Option<String>,

    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub smtp_user: String,

    #[serde(default)]
    pub smtp_pass: String,

    #[serde(default = "default_enable_ssl")]
    pub smtp_enable_ssl: bool,
}

fn default_poll_interval_ms() -> u64 {
    10_000
}

fn default_smtp_port() -> u16 {
    587
}

fn default_enable_ssl() -> bool {
    true
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("EmailTo", &self.email_to)?;
        require("BrapiToken", &self.brapi_token)?;
        require("SmtpHost", &self.smtp_host)?;
        require("EmailFrom", self.sender())?;

        if self.smtp_port == 0 {
            return Err(ConfigError::Invalid {
                field: "SmtpPort",
                reason: "must be greater than zero",
            });
        }

        Ok(())
    }

    fn sender(&self) -> &str {
        self.email_from
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.smtp_user)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn brapi_base_url(&self) -> &str {
        self.brapi_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn smtp_settings(&self) -> SmtpSettings {
        SmtpSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            username: self.smtp_user.clone(),
            password: self.smtp_pass.clone(),
            from: self.sender().to_string(),
            to: self.email_to.clone(),
            enable_ssl: self.smtp_enable_ssl,
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field,
            reason: "must not be empty",
        });
    }
    Ok(())
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("email_to", &self.email_to)
            .field("email_from", &self.email_from)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("brapi_token", &"<redacted>")
            .field("brapi_base_url", &self.brapi_base_url)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_pass", &"<redacted>")
            .field("smtp_enable_ssl", &self.smtp_enable_ssl)
            .finish()
    }
}

/// `config.json` in the directory of the running executable.
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}
