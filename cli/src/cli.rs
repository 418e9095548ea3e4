use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use rust_decimal::Decimal;

pub const EXAMPLE: &str = "Example:\n  stock-alarm PETR4 22.67 22.59";

#[derive(Debug, Parser)]
#[command(
    name = "stock-alarm",
    version,
    about = "Watches one ticker and sends an e-mail when it crosses the sell or buy price",
    after_help = EXAMPLE
)]
pub struct Cli {
    /// Ticker symbol, e.g. PETR4
    #[arg(value_parser = parse_ticker)]
    pub ticker: String,

    /// Sell alert price: alert when the quote is at or above it
    #[arg(value_parser = parse_price)]
    pub sell_price: Decimal,

    /// Buy alert price: alert when the quote is at or below it
    #[arg(value_parser = parse_price)]
    pub buy_price: Decimal,

    /// Path to config.json [default: next to the executable]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

pub(crate) fn parse_ticker(raw: &str) -> Result<String, String> {
    let ticker = raw.trim().to_uppercase();

    if ticker.is_empty() {
        return Err("ticker must not be empty".into());
    }
    if ticker.chars().any(char::is_whitespace) {
        return Err(format!("ticker '{ticker}' must not contain spaces"));
    }
    // The ticker becomes a URL path segment.
    if !ticker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(format!(
            "ticker '{ticker}' may only contain letters, digits, '.' and '-'"
        ));
    }

    Ok(ticker)
}

/// `.` is the only decimal separator, whatever the host locale says.
pub(crate) fn parse_price(raw: &str) -> Result<Decimal, String> {
    let text = raw.trim();

    if text.contains(',') {
        return Err(format!(
            "invalid price '{text}': use '.' as decimal separator (e.g. 22.67)"
        ));
    }

    // `Decimal::from_str` also takes `_` separators and exponents.
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    let well_formed = digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1;
    if !well_formed {
        return Err(format!(
            "invalid price '{text}': use '.' as decimal separator (e.g. 22.67)"
        ));
    }

    let price = Decimal::from_str(text).map_err(|_| {
        format!("invalid price '{text}': use '.' as decimal separator (e.g. 22.67)")
    })?;

    if price.is_sign_negative() {
        return Err(format!("invalid price '{text}': must not be negative"));
    }

    Ok(price)
}
