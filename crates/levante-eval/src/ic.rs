//! Monthly information-coefficient series.
//!
//! The IC here is a hit rate mapped onto [-1, 1]: the share of a
//! period's selected names that closed higher at the next rebalance,
//! rescaled so that all-correct scores +1, all-wrong -1 and a coin flip
//! 0. The cumulative column is a running sum across periods.

use levante_traits::{Date, LevanteError, PricePanel, Result};
use serde::{Deserialize, Serialize};

use crate::portfolio::Portfolio;

/// One rebalance period's IC and the running total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIc {
    /// Rebalance date the period starts at.
    pub date: Date,
    /// Hit-rate IC for the period, in [-1, 1].
    pub ic: f64,
    /// Running sum of ICs up to and including this period.
    pub cumulative: f64,
}

/// Hit-rate IC of one portfolio over the period `current..next`.
///
/// # Errors
///
/// Returns [`LevanteError::EmptySelection`] for a portfolio with no
/// holdings and [`LevanteError::TickerNotFound`] when a holding is not
/// in the panel.
pub fn period_ic(
    panel: &PricePanel,
    portfolio: &Portfolio,
    current: usize,
    next: usize,
) -> Result<f64> {
    if portfolio.holdings.is_empty() {
        return Err(LevanteError::EmptySelection(format!(
            "portfolio dated {} holds nothing to score",
            portfolio.date
        )));
    }
    let mut correct = 0usize;
    for holding in &portfolio.holdings {
        let idx = panel.ticker_index(&holding.ticker)?;
        if panel.close(idx, next) > panel.close(idx, current) {
            correct += 1;
        }
    }
    let prop_correct = correct as f64 / portfolio.holdings.len() as f64;
    Ok(2.0 * prop_correct - 1.0)
}

/// IC series over a run's rebalances, one row per period except the
/// last, which lacks a forward month end to score against.
///
/// `positions[i]` is the rebalance that bought `portfolios[i]`; row `i`
/// is dated at that rebalance and scores the holdings over
/// `positions[i]..positions[i + 1]`.
///
/// # Errors
///
/// Returns [`LevanteError::InvalidData`] when fewer portfolios than
/// scoreable periods are supplied, plus any [`period_ic`] failure.
pub fn cumulative_ic(
    panel: &PricePanel,
    positions: &[usize],
    portfolios: &[Portfolio],
) -> Result<Vec<MonthlyIc>> {
    let periods = positions.len().saturating_sub(1);
    if portfolios.len() < periods {
        return Err(LevanteError::InvalidData(format!(
            "{} portfolios cannot cover {periods} rebalance periods",
            portfolios.len()
        )));
    }
    let mut rows = Vec::with_capacity(periods);
    let mut running = 0.0;
    for i in 0..periods {
        let ic = period_ic(panel, &portfolios[i], positions[i], positions[i + 1])?;
        running += ic;
        rows.push(MonthlyIc {
            date: panel.date(positions[i]),
            ic,
            cumulative: running,
        });
    }
    Ok(rows)
}
