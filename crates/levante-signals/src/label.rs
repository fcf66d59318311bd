//! Realized month-over-month returns, the supervised-learning target.

use levante_traits::{LevanteError, PricePanel, Result};

use crate::pct_change;

/// Realized percentage return for one ticker into a target month end.
///
/// The return runs from the month-end position immediately before
/// `month_end` to `month_end` itself. Together with
/// [`trailing_return`](crate::feature::trailing_return) evaluated at the
/// *previous* month end this forms one causally-ordered training pair:
/// the feature is fully observable before the period the label measures.
///
/// # Errors
///
/// Returns [`LevanteError::InsufficientHistory`] when no month end
/// precedes `month_end` in the panel calendar.
///
/// # Panics
///
/// Panics if `ticker` or `month_end` is out of range for the panel.
pub fn realized_return(panel: &PricePanel, ticker: usize, month_end: usize) -> Result<f64> {
    let previous = panel.previous_month_end(month_end).ok_or_else(|| {
        LevanteError::InsufficientHistory(format!(
            "no month end precedes {} in the panel calendar",
            panel.date(month_end),
        ))
    })?;
    Ok(pct_change(
        panel.close(ticker, previous),
        panel.close(ticker, month_end),
    ))
}

/// Realized returns for every ticker in the panel, in panel order.
///
/// # Errors
///
/// Returns [`LevanteError::InsufficientHistory`] when no month end
/// precedes `month_end`.
pub fn realized_returns(panel: &PricePanel, month_end: usize) -> Result<Vec<f64>> {
    (0..panel.n_tickers())
        .map(|ticker| realized_return(panel, ticker, month_end))
        .collect()
}
