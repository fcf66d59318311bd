//! End-of-run summary statistics.

use levante_traits::stats::{mean, sample_std, MIN_STD_THRESHOLD};
use levante_traits::{Date, LevanteError, Result};
use serde::{Deserialize, Serialize};

use crate::roller::PerformanceRow;

/// Daily risk-free rate used by the Sharpe ratio.
pub const DAILY_RISK_FREE: f64 = 1e-4;

/// Calendar days per year used for annualization.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Headline statistics computed from a run's sliced performance series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// First trading day of the reported series.
    pub begin_date: Date,
    /// Last trading day of the reported series.
    pub end_date: Date,
    /// Calendar days between begin and end.
    pub calendar_days: i64,
    /// AUM the run started with.
    pub initial_aum: f64,
    /// AUM on the last trading day.
    pub final_aum: f64,
    /// Cumulative dividends received by the end of the run.
    pub final_dividends: f64,
    /// Final AUM plus dividends minus the initial AUM.
    pub profit_loss: f64,
    /// Price-only return over the run, as a fraction.
    pub total_stock_return: f64,
    /// Return including dividends, as a fraction.
    pub total_return: f64,
    /// Dividend-inclusive return compounded to a calendar year.
    pub annualized_return: f64,
    /// Mean daily AUM over the reported series.
    pub average_daily_aum: f64,
    /// Highest daily AUM over the reported series.
    pub maximum_daily_aum: f64,
    /// Mean day-over-day AUM return.
    pub average_daily_return: f64,
    /// Sample standard deviation of daily returns.
    pub daily_std_deviation: f64,
    /// Mean daily excess return over [`DAILY_RISK_FREE`], per unit of
    /// daily volatility. NaN when the series never moves.
    pub daily_sharpe: f64,
}

/// Day-over-day AUM returns of a performance series.
///
/// One value per consecutive pair of rows; days before the first
/// rebalance contribute zeros because the seeded AUM is flat there.
#[must_use]
pub fn daily_returns(rows: &[PerformanceRow]) -> Vec<f64> {
    rows.windows(2)
        .map(|pair| (pair[1].aum - pair[0].aum) / pair[0].aum)
        .collect()
}

impl SummaryStats {
    /// Computes the summary of a sliced performance series.
    ///
    /// # Errors
    ///
    /// Returns [`LevanteError::InvalidData`] for an empty series.
    pub fn from_performance(rows: &[PerformanceRow], initial_aum: f64) -> Result<Self> {
        let (first, last) = match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(LevanteError::InvalidData(
                    "cannot summarize an empty performance series".to_string(),
                ))
            }
        };

        let calendar_days = (last.date - first.date).num_days();
        let final_aum = last.aum;
        let final_dividends = last.dividends;
        let profit_loss = final_aum - initial_aum + final_dividends;
        let total_stock_return = (final_aum - initial_aum) / initial_aum;
        let total_return = profit_loss / initial_aum;
        let annualized_return = if calendar_days > 0 {
            (1.0 + total_return).powf(DAYS_PER_YEAR / calendar_days as f64) - 1.0
        } else {
            f64::NAN
        };

        let aums: Vec<f64> = rows.iter().map(|row| row.aum).collect();
        let average_daily_aum = mean(&aums);
        let maximum_daily_aum = aums.iter().fold(f64::MIN, |acc, &aum| acc.max(aum));

        let returns = daily_returns(rows);
        let average_daily_return = mean(&returns);
        let daily_std_deviation = sample_std(&returns);
        let daily_sharpe = if daily_std_deviation < MIN_STD_THRESHOLD {
            f64::NAN
        } else {
            (average_daily_return - DAILY_RISK_FREE) / daily_std_deviation
        };

        Ok(Self {
            begin_date: first.date,
            end_date: last.date,
            calendar_days,
            initial_aum,
            final_aum,
            final_dividends,
            profit_loss,
            total_stock_return,
            total_return,
            annualized_return,
            average_daily_aum,
            maximum_daily_aum,
            average_daily_return,
            daily_std_deviation,
            daily_sharpe,
        })
    }
}
