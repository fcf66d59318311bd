//! Input parsing and validation for the Levante CLI.

use anyhow::{bail, Context, Result};
use levante_traits::{Date, Ticker};

/// Compact date format accepted alongside ISO dates.
const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

const MIN_TICKER_LENGTH: usize = 1;
const MAX_TICKER_LENGTH: usize = 5;

/// Parse a date string in YYYY-MM-DD or YYYYMMDD format.
pub(crate) fn parse_date(raw: &str) -> Result<Date> {
    Date::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| Date::parse_from_str(raw, COMPACT_DATE_FORMAT))
        .with_context(|| format!("invalid date '{raw}', expected YYYY-MM-DD or YYYYMMDD"))
}

/// Reject tickers the engine cannot have data for: empty lists, names
/// outside 1-5 characters, or non-alphanumeric names.
pub(crate) fn validate_tickers(tickers: &[Ticker]) -> Result<()> {
    if tickers.is_empty() {
        bail!("at least one ticker is required");
    }
    for ticker in tickers {
        if ticker.len() < MIN_TICKER_LENGTH || ticker.len() > MAX_TICKER_LENGTH {
            bail!(
                "ticker '{ticker}' must be {MIN_TICKER_LENGTH} to {MAX_TICKER_LENGTH} characters"
            );
        }
        if !ticker.chars().all(|c| c.is_ascii_alphanumeric()) {
            bail!("ticker '{ticker}' must contain only ASCII letters and digits");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_iso_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_compact_date() {
        let date = parse_date("20240115").unwrap();
        assert_eq!(date, parse_date("2024-01-15").unwrap());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("invalid").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_validate_tickers_accepts_plain_names() {
        let tickers = vec!["AAPL".to_string(), "T".to_string(), "BRKB5".to_string()];
        assert!(validate_tickers(&tickers).is_ok());
    }

    #[test]
    fn test_validate_tickers_rejects_bad_shapes() {
        assert!(validate_tickers(&[]).is_err());
        assert!(validate_tickers(&["TOOLONG".to_string()]).is_err());
        assert!(validate_tickers(&[String::new()]).is_err());
        assert!(validate_tickers(&["BR.K".to_string()]).is_err());
    }
}
