//! Trailing-return features computed from panel close prices.

use levante_traits::{LevanteError, PricePanel, Result, StrategySpec};

use crate::pct_change;

/// Trailing percentage return for one ticker at a reference position.
///
/// The window ends `spec.shift()` positions before `reference` and spans
/// `spec.window` positions, so a momentum feature skips the most recent
/// month of prices while a reversal feature runs right up to the
/// reference day. The value is the percentage change from the window's
/// first close to its last.
///
/// # Arguments
///
/// * `panel` - Validated price panel.
/// * `ticker` - Ticker index into the panel universe.
/// * `spec` - Strategy family and lookback window.
/// * `reference` - Calendar position the feature is observed at.
///
/// # Errors
///
/// Returns [`LevanteError::InsufficientHistory`] when fewer than
/// `spec.min_history()` positions precede `reference`.
///
/// # Panics
///
/// Panics if `ticker` or `reference` is out of range for the panel.
pub fn trailing_return(
    panel: &PricePanel,
    ticker: usize,
    spec: StrategySpec,
    reference: usize,
) -> Result<f64> {
    let shifted = checked_back(reference, spec.shift(), panel, spec, reference)?;
    let start = checked_back(shifted, spec.window, panel, spec, reference)?;
    Ok(pct_change(
        panel.close(ticker, start),
        panel.close(ticker, shifted),
    ))
}

/// Trailing returns for every ticker in the panel, in panel order.
///
/// # Errors
///
/// Returns [`LevanteError::InsufficientHistory`] when the panel calendar
/// is too short for `spec` at `reference`; the check is shared across the
/// universe because all tickers sit on one calendar.
pub fn trailing_returns(
    panel: &PricePanel,
    spec: StrategySpec,
    reference: usize,
) -> Result<Vec<f64>> {
    (0..panel.n_tickers())
        .map(|ticker| trailing_return(panel, ticker, spec, reference))
        .collect()
}

fn checked_back(
    pos: usize,
    back: usize,
    panel: &PricePanel,
    spec: StrategySpec,
    reference: usize,
) -> Result<usize> {
    pos.checked_sub(back).ok_or_else(|| {
        LevanteError::InsufficientHistory(format!(
            "{spec} needs {} trading days before {}, panel has {reference}",
            spec.min_history(),
            panel.date(reference),
        ))
    })
}
