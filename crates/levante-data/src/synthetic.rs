//! Deterministic synthetic price histories.
//!
//! Demos and tests need panels with known month ends and price paths
//! without touching the filesystem. Each series is a linear drift plus
//! a sine swing, so trailing returns and rankings are predictable by
//! hand.

use chrono::{Datelike, Weekday};
use levante_traits::{Date, PricePanel, Ticker};

use crate::Result;

/// Parameters for one synthetic price series.
#[derive(Debug, Clone)]
pub struct SyntheticSeries {
    /// Ticker the series trades under.
    pub ticker: Ticker,
    /// Price on the first trading day.
    pub start_price: f64,
    /// Additive price change per trading day.
    pub drift: f64,
    /// Amplitude of the sine swing around the drift line.
    pub oscillation: f64,
    /// Swing length in trading days.
    pub period: f64,
    /// Dividend payments keyed by exact trading date. Payments dated
    /// off-calendar are dropped.
    pub dividends: Vec<(Date, f64)>,
}

impl SyntheticSeries {
    /// A flat series at `start_price` with no swing and no dividends.
    #[must_use]
    pub fn new(ticker: &str, start_price: f64) -> Self {
        Self {
            ticker: ticker.to_string(),
            start_price,
            drift: 0.0,
            oscillation: 0.0,
            period: 21.0,
            dividends: Vec::new(),
        }
    }

    fn price_on(&self, day: usize) -> f64 {
        let t = day as f64;
        self.start_price
            + self.drift * t
            + self.oscillation * (t * std::f64::consts::TAU / self.period).sin()
    }
}

/// Every Monday-to-Friday date in `begin..=end`, in order.
#[must_use]
pub fn weekday_calendar(begin: Date, end: Date) -> Vec<Date> {
    let mut dates = Vec::new();
    let mut day = begin;
    while day <= end {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(day);
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    dates
}

/// Builds a panel over the weekday calendar of `begin..=end` from the
/// given series.
///
/// # Errors
///
/// Returns [`crate::DataError::Panel`] when the series parameters
/// produce an invalid panel, e.g. a price path crossing zero or a
/// negative dividend.
pub fn synthetic_panel(begin: Date, end: Date, series: &[SyntheticSeries]) -> Result<PricePanel> {
    let dates = weekday_calendar(begin, end);
    let tickers = series.iter().map(|s| s.ticker.clone()).collect();
    let mut closes = Vec::with_capacity(series.len());
    let mut dividends = Vec::with_capacity(series.len());

    for spec in series {
        closes.push((0..dates.len()).map(|day| spec.price_on(day)).collect());
        dividends.push(
            dates
                .iter()
                .map(|date| {
                    spec.dividends
                        .iter()
                        .find(|(paid, _)| paid == date)
                        .map_or(0.0, |&(_, amount)| amount)
                })
                .collect(),
        );
    }

    Ok(PricePanel::new(tickers, dates, closes, dividends)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_calendar_skips_weekends() {
        // 2023-01-07 and 2023-01-08 are Saturday and Sunday.
        let dates = weekday_calendar(ymd(2023, 1, 5), ymd(2023, 1, 10));
        assert_eq!(
            dates,
            vec![
                ymd(2023, 1, 5),
                ymd(2023, 1, 6),
                ymd(2023, 1, 9),
                ymd(2023, 1, 10),
            ]
        );
    }

    #[test]
    fn test_weekday_calendar_empty_when_reversed() {
        assert!(weekday_calendar(ymd(2023, 1, 10), ymd(2023, 1, 5)).is_empty());
    }

    #[test]
    fn test_drift_series_prices() {
        let mut series = SyntheticSeries::new("AAA", 100.0);
        series.drift = 0.5;
        let panel =
            synthetic_panel(ymd(2023, 1, 2), ymd(2023, 1, 6), &[series]).unwrap();
        assert_eq!(panel.n_days(), 5);
        assert_relative_eq!(panel.close(0, 0), 100.0);
        assert_relative_eq!(panel.close(0, 4), 102.0);
    }

    #[test]
    fn test_dividends_land_on_trading_days() {
        let mut series = SyntheticSeries::new("AAA", 50.0);
        series.dividends = vec![
            (ymd(2023, 1, 4), 0.75),
            // Saturday, off the trading calendar.
            (ymd(2023, 1, 7), 9.99),
        ];
        let panel =
            synthetic_panel(ymd(2023, 1, 2), ymd(2023, 1, 9), &[series]).unwrap();
        assert_relative_eq!(panel.dividend(0, 2), 0.75);
        let total: f64 = (0..panel.n_days()).map(|pos| panel.dividend(0, pos)).sum();
        assert_relative_eq!(total, 0.75);
    }

    #[test]
    fn test_oscillation_swings_around_drift_line() {
        let mut series = SyntheticSeries::new("AAA", 100.0);
        series.oscillation = 4.0;
        series.period = 4.0;
        let panel =
            synthetic_panel(ymd(2023, 1, 2), ymd(2023, 1, 6), &[series]).unwrap();
        // Quarter period peaks at +4, half period returns to the line.
        assert_relative_eq!(panel.close(0, 1), 104.0, epsilon = 1e-9);
        assert_relative_eq!(panel.close(0, 2), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_price_path_is_rejected() {
        let mut series = SyntheticSeries::new("AAA", 1.0);
        series.drift = -1.0;
        let err = synthetic_panel(ymd(2023, 1, 2), ymd(2023, 1, 6), &[series]);
        assert!(matches!(err, Err(crate::DataError::Panel(_))));
    }
}
