use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Number;

use super::errors::BrapiError;

/// Body of `GET /quote/{ticker}`. Only the fields the monitor reads.
#[derive(Debug, Deserialize)]
pub struct QuoteEnvelope {
    #[serde(default)]
    pub results: Vec<QuoteResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub symbol: String,
    pub regular_market_price: Option<Number>,
}

impl QuoteEnvelope {
    /// Price of `ticker`, or of the first result when no symbol matches.
    pub fn regular_market_price(&self, ticker: &str) -> Result<Decimal, BrapiError> {
        let quote = self
            .results
            .iter()
            .find(|r| r.symbol.eq_ignore_ascii_case(ticker))
            .or_else(|| self.results.first())
            .ok_or_else(|| BrapiError::NoQuote {
                ticker: ticker.to_string(),
            })?;

        let raw = quote
            .regular_market_price
            .as_ref()
            .ok_or_else(|| BrapiError::MissingPrice {
                ticker: ticker.to_string(),
            })?;

        number_to_decimal(raw)
    }
}

/// Converts through the JSON text so `22.67` stays exactly `22.67`.
fn number_to_decimal(n: &Number) -> Result<Decimal, BrapiError> {
    let text = n.to_string();
    Decimal::from_str_exact(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| BrapiError::InvalidPrice { raw: text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(json: &str) -> QuoteEnvelope {
        serde_json::from_str(json).expect("valid envelope")
    }

    #[test]
    fn reads_price_of_matching_symbol() {
        let env = parse(
            r#"{
                "results": [
                    { "symbol": "VALE3", "regularMarketPrice": 61.2 },
                    { "symbol": "PETR4", "regularMarketPrice": 22.67, "currency": "BRL" }
                ],
                "requestedAt": "2024-05-02T14:30:00.000Z"
            }"#,
        );

        assert_eq!(env.regular_market_price("petr4").unwrap(), dec!(22.67));
    }

    #[test]
    fn falls_back_to_first_result() {
        let env = parse(r#"{ "results": [ { "symbol": "PETR4F", "regularMarketPrice": 38 } ] }"#);

        assert_eq!(env.regular_market_price("PETR4").unwrap(), dec!(38));
    }

    #[test]
    fn keeps_every_decimal_digit() {
        let env = parse(r#"{ "results": [ { "symbol": "X", "regularMarketPrice": 0.1234 } ] }"#);

        assert_eq!(env.regular_market_price("X").unwrap(), dec!(0.1234));
    }

    #[test]
    fn empty_results_is_an_error() {
        let env = parse(r#"{ "results": [] }"#);

        assert!(matches!(
            env.regular_market_price("PETR4"),
            Err(BrapiError::NoQuote { .. })
        ));
    }

    #[test]
    fn missing_results_field_is_an_error() {
        let env = parse(r#"{ "error": true, "message": "not found" }"#);

        assert!(matches!(
            env.regular_market_price("PETR4"),
            Err(BrapiError::NoQuote { .. })
        ));
    }

    #[test]
    fn null_price_is_an_error() {
        let env = parse(r#"{ "results": [ { "symbol": "PETR4", "regularMarketPrice": null } ] }"#);

        assert!(matches!(
            env.regular_market_price("PETR4"),
            Err(BrapiError::MissingPrice { .. })
        ));
    }
}
