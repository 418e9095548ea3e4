use std::time::Duration;

use async_trait::async_trait;
use engine::{FetchError, PriceSource};
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::brapi::errors::BrapiError;
use crate::brapi::types::QuoteEnvelope;

pub const DEFAULT_BASE_URL: &str = "https://brapi.dev/api";

/// Quote client for brapi.dev. Build once and reuse: the inner
/// `reqwest::Client` keeps its connection pool across cycles.
#[derive(Clone)]
pub struct BrapiClient {
    http: Client,
    base_url: Url,
}

impl BrapiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BrapiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        let raw = base_url.into();
        let base_url = Url::parse(&raw).map_err(|e| BrapiError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BrapiError::InvalidBaseUrl {
                url: raw,
                reason: "not a hierarchical url".into(),
            });
        }

        Ok(Self { http, base_url })
    }

    /// `<base>/quote/<ticker>` with the ticker escaped as a single path
    /// segment, so `/`, `?` or `#` in it cannot reshape the request.
    pub fn quote_url(&self, ticker: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("quote").push(ticker);
        }
        url
    }

    /// The token travels in the `Authorization` header, never in the URL,
    /// so it cannot leak through error messages.
    #[instrument(skip(self, token), fields(ticker = %ticker), level = "debug")]
    pub async fn fetch_quote(&self, ticker: &str, token: &str) -> Result<Decimal, BrapiError> {
        let mut req = self.http.get(self.quote_url(ticker));
        if !token.is_empty() {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?.error_for_status()?;
        let envelope: QuoteEnvelope = resp.json().await?;
        let price = envelope.regular_market_price(ticker)?;

        debug!(price = %price, "brapi quote fetched");

        Ok(price)
    }
}

#[async_trait]
impl PriceSource for BrapiClient {
    async fn fetch(&self, ticker: &str, auth_token: &str) -> Result<Decimal, FetchError> {
        Ok(self.fetch_quote(ticker, auth_token).await?)
    }
}
