//! Common types used throughout the Levante engine.
//!
//! This module defines the price panel: one shared trading calendar plus
//! per-ticker close and dividend series, aligned by position and validated
//! at construction. All downstream components index into the panel by
//! calendar position, never by date comparison.

use chrono::Datelike;

use crate::error::{LevanteError, Result};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A ticker identifier.
///
/// Tickers identify securities across the Levante engine, e.g. "AAPL" or
/// "SPY". Shape validation (length, character set) is the caller's job;
/// the panel only requires tickers to be non-empty and unique.
pub type Ticker = String;

/// Position-aligned daily market history for a set of tickers.
///
/// A `PricePanel` holds one shared date vector and, per ticker, a close
/// vector and a dividend vector of identical length. Construction validates
/// the alignment once so that every later computation can index by position
/// without re-deriving offsets by date comparison.
///
/// # Invariants (enforced by [`PricePanel::new`])
///
/// - at least one ticker; tickers non-empty and unique
/// - at least one date; dates strictly increasing
/// - every close/dividend series has exactly one value per date
/// - closes are finite and positive; dividends are finite and non-negative
///
/// # Example
///
/// ```
/// use levante_traits::{Date, PricePanel};
///
/// let dates = vec![
///     Date::from_ymd_opt(2023, 1, 30).unwrap(),
///     Date::from_ymd_opt(2023, 1, 31).unwrap(),
///     Date::from_ymd_opt(2023, 2, 1).unwrap(),
/// ];
/// let panel = PricePanel::new(
///     vec!["SPY".to_string()],
///     dates,
///     vec![vec![400.0, 402.5, 401.0]],
///     vec![vec![0.0, 0.0, 1.2]],
/// )
/// .unwrap();
///
/// assert_eq!(panel.n_days(), 3);
/// assert_eq!(panel.month_end_positions(), vec![1]);
/// ```
#[derive(Debug, Clone)]
pub struct PricePanel {
    tickers: Vec<Ticker>,
    dates: Vec<Date>,
    closes: Vec<Vec<f64>>,
    dividends: Vec<Vec<f64>>,
}

impl PricePanel {
    /// Creates a validated panel.
    ///
    /// `closes[t]` and `dividends[t]` are the series for `tickers[t]`, one
    /// value per entry of `dates`.
    ///
    /// # Errors
    ///
    /// Returns [`LevanteError::InvalidData`] for an empty universe or
    /// calendar, duplicate tickers, non-increasing dates, or out-of-domain
    /// values, and [`LevanteError::MismatchedSeries`] when a series length
    /// disagrees with the calendar.
    pub fn new(
        tickers: Vec<Ticker>,
        dates: Vec<Date>,
        closes: Vec<Vec<f64>>,
        dividends: Vec<Vec<f64>>,
    ) -> Result<Self> {
        if tickers.is_empty() {
            return Err(LevanteError::InvalidData(
                "panel requires at least one ticker".to_string(),
            ));
        }
        if dates.is_empty() {
            return Err(LevanteError::InvalidData(
                "panel requires at least one date".to_string(),
            ));
        }
        for (i, ticker) in tickers.iter().enumerate() {
            if ticker.is_empty() {
                return Err(LevanteError::InvalidData(format!(
                    "ticker at index {i} is empty"
                )));
            }
            if tickers[..i].contains(ticker) {
                return Err(LevanteError::InvalidData(format!(
                    "duplicate ticker: {ticker}"
                )));
            }
        }
        for pair in dates.windows(2) {
            if pair[1] <= pair[0] {
                return Err(LevanteError::InvalidData(format!(
                    "dates must be strictly increasing, got {} then {}",
                    pair[0], pair[1]
                )));
            }
        }
        if closes.len() != tickers.len() || dividends.len() != tickers.len() {
            return Err(LevanteError::InvalidData(format!(
                "expected {} close and dividend series, got {} and {}",
                tickers.len(),
                closes.len(),
                dividends.len()
            )));
        }
        for (t, ticker) in tickers.iter().enumerate() {
            if closes[t].len() != dates.len() {
                return Err(LevanteError::MismatchedSeries {
                    ticker: ticker.clone(),
                    expected: dates.len(),
                    actual: closes[t].len(),
                });
            }
            if dividends[t].len() != dates.len() {
                return Err(LevanteError::MismatchedSeries {
                    ticker: ticker.clone(),
                    expected: dates.len(),
                    actual: dividends[t].len(),
                });
            }
            for (pos, &close) in closes[t].iter().enumerate() {
                if !close.is_finite() || close <= 0.0 {
                    return Err(LevanteError::InvalidData(format!(
                        "close for {ticker} at {} must be finite and positive, got {close}",
                        dates[pos]
                    )));
                }
            }
            for (pos, &dividend) in dividends[t].iter().enumerate() {
                if !dividend.is_finite() || dividend < 0.0 {
                    return Err(LevanteError::InvalidData(format!(
                        "dividend for {ticker} at {} must be finite and non-negative, got {dividend}",
                        dates[pos]
                    )));
                }
            }
        }

        Ok(Self {
            tickers,
            dates,
            closes,
            dividends,
        })
    }

    /// Number of tickers in the panel.
    pub fn n_tickers(&self) -> usize {
        self.tickers.len()
    }

    /// Number of trading days in the shared calendar.
    pub fn n_days(&self) -> usize {
        self.dates.len()
    }

    /// The tickers, in panel order. This order is the tie-break order for
    /// every ranking downstream.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// The shared trading calendar.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The date at a calendar position.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= n_days()`.
    pub fn date(&self, pos: usize) -> Date {
        self.dates[pos]
    }

    /// Closing price for ticker index `ticker` at calendar position `pos`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn close(&self, ticker: usize, pos: usize) -> f64 {
        self.closes[ticker][pos]
    }

    /// Dividend per share for ticker index `ticker` at calendar position `pos`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn dividend(&self, ticker: usize, pos: usize) -> f64 {
        self.dividends[ticker][pos]
    }

    /// The full close series for a ticker index.
    pub fn closes(&self, ticker: usize) -> &[f64] {
        &self.closes[ticker]
    }

    /// Resolves a ticker name to its panel index.
    ///
    /// # Errors
    ///
    /// Returns [`LevanteError::TickerNotFound`] for unknown tickers.
    pub fn ticker_index(&self, ticker: &str) -> Result<usize> {
        self.tickers
            .iter()
            .position(|t| t == ticker)
            .ok_or_else(|| LevanteError::TickerNotFound(ticker.to_string()))
    }

    /// Whether position `pos` is the last trading day of its calendar month.
    ///
    /// True when the next calendar entry falls in a different (year, month).
    /// The final position is never a month end: there is no following entry
    /// to prove the month is over.
    pub fn is_month_end(&self, pos: usize) -> bool {
        pos + 1 < self.dates.len() && !same_month(self.dates[pos], self.dates[pos + 1])
    }

    /// All month-end positions, in increasing order.
    pub fn month_end_positions(&self) -> Vec<usize> {
        (0..self.dates.len())
            .filter(|&pos| self.is_month_end(pos))
            .collect()
    }

    /// The closest month-end position strictly before `pos`, if any.
    pub fn previous_month_end(&self, pos: usize) -> Option<usize> {
        (0..pos.min(self.dates.len())).rev().find(|&p| self.is_month_end(p))
    }

    /// The first calendar position whose date is `>= date`, if any.
    pub fn first_position_on_or_after(&self, date: Date) -> Option<usize> {
        let pos = self.dates.partition_point(|d| *d < date);
        (pos < self.dates.len()).then_some(pos)
    }

    /// The last calendar position whose date is `<= date`, if any.
    pub fn last_position_on_or_before(&self, date: Date) -> Option<usize> {
        let pos = self.dates.partition_point(|d| *d <= date);
        pos.checked_sub(1)
    }
}

/// Whether two dates fall in the same calendar (year, month).
fn same_month(a: Date, b: Date) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
