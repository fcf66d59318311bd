//! CSV price history loading.
//!
//! Each ticker's history lives in `<dir>/<TICKER>.csv` with `Date`,
//! `Close` and `Dividends` columns. Rows may arrive in any order; the
//! loader sorts them by date and requires every ticker to trade on
//! exactly the same calendar as the first one before assembling the
//! panel.

use std::path::Path;

use levante_traits::{Date, PricePanel, Ticker};
use polars::prelude::*;

use crate::error::DataError;
use crate::Result;

/// Column holding the trading date.
pub const DATE_COLUMN: &str = "Date";
/// Column holding the closing price.
pub const CLOSE_COLUMN: &str = "Close";
/// Column holding the dividend per share.
pub const DIVIDENDS_COLUMN: &str = "Dividends";
/// Expected date cell format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loads `<dir>/<TICKER>.csv` for every ticker and assembles a panel.
///
/// The first ticker's sorted dates become the panel calendar; every
/// later ticker must match it exactly.
///
/// # Errors
///
/// Returns [`DataError::Polars`] when a file cannot be read,
/// [`DataError::MissingColumn`], [`DataError::InvalidDate`] or
/// [`DataError::NullValue`] for malformed cells,
/// [`DataError::MisalignedCalendar`] when a ticker trades on different
/// dates than the first, and [`DataError::Panel`] when the assembled
/// data fails panel validation.
pub fn load_panel(dir: &Path, tickers: &[Ticker]) -> Result<PricePanel> {
    let mut calendar: Option<Vec<Date>> = None;
    let mut closes = Vec::with_capacity(tickers.len());
    let mut dividends = Vec::with_capacity(tickers.len());

    for ticker in tickers {
        let history = load_history(dir, ticker)?;
        match &calendar {
            None => calendar = Some(history.dates),
            Some(reference) => {
                if history.dates != *reference {
                    return Err(DataError::MisalignedCalendar {
                        ticker: ticker.clone(),
                        detail: describe_mismatch(reference, &history.dates),
                    });
                }
            }
        }
        closes.push(history.closes);
        dividends.push(history.dividends);
    }

    let dates = calendar.unwrap_or_default();
    Ok(PricePanel::new(tickers.to_vec(), dates, closes, dividends)?)
}

/// One ticker's history, sorted by date.
struct History {
    dates: Vec<Date>,
    closes: Vec<f64>,
    dividends: Vec<f64>,
}

fn load_history(dir: &Path, ticker: &str) -> Result<History> {
    let path = dir.join(format!("{ticker}.csv"));
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path))?
        .finish()?;

    let dates = date_values(&df, ticker)?;
    let closes = float_values(&df, ticker, CLOSE_COLUMN)?;
    let dividends = float_values(&df, ticker, DIVIDENDS_COLUMN)?;

    let mut rows: Vec<(Date, f64, f64)> = dates
        .into_iter()
        .zip(closes)
        .zip(dividends)
        .map(|((date, close), dividend)| (date, close, dividend))
        .collect();
    rows.sort_by_key(|&(date, _, _)| date);

    let mut history = History {
        dates: Vec::with_capacity(rows.len()),
        closes: Vec::with_capacity(rows.len()),
        dividends: Vec::with_capacity(rows.len()),
    };
    for (date, close, dividend) in rows {
        history.dates.push(date);
        history.closes.push(close);
        history.dividends.push(dividend);
    }
    Ok(history)
}

fn series<'a>(df: &'a DataFrame, ticker: &str, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(Column::as_materialized_series)
        .map_err(|_| DataError::MissingColumn {
            ticker: ticker.to_string(),
            column: name.to_string(),
        })
}

fn date_values(df: &DataFrame, ticker: &str) -> Result<Vec<Date>> {
    let strings = series(df, ticker, DATE_COLUMN)?.str()?;
    let mut dates = Vec::with_capacity(strings.len());
    for (row, value) in strings.into_iter().enumerate() {
        let raw = value.ok_or_else(|| DataError::NullValue {
            ticker: ticker.to_string(),
            column: DATE_COLUMN.to_string(),
            row,
        })?;
        let date =
            Date::parse_from_str(raw, DATE_FORMAT).map_err(|_| DataError::InvalidDate {
                ticker: ticker.to_string(),
                value: raw.to_string(),
            })?;
        dates.push(date);
    }
    Ok(dates)
}

fn float_values(df: &DataFrame, ticker: &str, name: &str) -> Result<Vec<f64>> {
    let cast = series(df, ticker, name)?.cast(&DataType::Float64)?;
    let floats = cast.f64()?;
    let mut values = Vec::with_capacity(floats.len());
    for (row, value) in floats.into_iter().enumerate() {
        match value {
            Some(v) => values.push(v),
            None => {
                return Err(DataError::NullValue {
                    ticker: ticker.to_string(),
                    column: name.to_string(),
                    row,
                });
            }
        }
    }
    Ok(values)
}

fn describe_mismatch(reference: &[Date], actual: &[Date]) -> String {
    for (row, (expected, got)) in reference.iter().zip(actual).enumerate() {
        if expected != got {
            return format!("row {row} has {got}, expected {expected}");
        }
    }
    format!("{} rows, expected {}", actual.len(), reference.len())
}
