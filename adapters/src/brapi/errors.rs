use engine::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrapiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no quote returned for {ticker}")]
    NoQuote { ticker: String },

    #[error("quote for {ticker} has no regularMarketPrice")]
    MissingPrice { ticker: String },

    #[error("regularMarketPrice {raw} is not a decimal")]
    InvalidPrice { raw: String },

    #[error("invalid base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<BrapiError> for FetchError {
    fn from(err: BrapiError) -> Self {
        match err {
            BrapiError::Http(e) if e.is_timeout() => FetchError::Timeout,
            BrapiError::Http(e) => match e.status() {
                Some(status) => FetchError::HttpStatus(status.as_u16()),
                None if e.is_decode() => FetchError::MalformedResponse(e.to_string()),
                None => FetchError::Transport(e.to_string()),
            },
            other => FetchError::MalformedResponse(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_errors_map_to_malformed_response() {
        let err: FetchError = BrapiError::NoQuote {
            ticker: "PETR4".into(),
        }
        .into();

        assert_eq!(
            err,
            FetchError::MalformedResponse("no quote returned for PETR4".into())
        );
    }
}
