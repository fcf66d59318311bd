//! Daily AUM and dividend accounting over the panel calendar.

use levante_traits::{Date, PricePanel, Result};
use serde::{Deserialize, Serialize};

use crate::portfolio::Portfolio;

/// One day of portfolio performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRow {
    /// Trading day.
    pub date: Date,
    /// Assets under management at that day's close.
    pub aum: f64,
    /// Dividends received since the run started, cumulative.
    pub dividends: f64,
}

/// Day-by-day performance ledger aligned with the panel calendar.
///
/// Every row starts seeded with the initial AUM and zero dividends;
/// [`mark`](Self::mark) overwrites a row once a live portfolio exists on
/// that day. Rows before the first rebalance therefore stay flat at the
/// initial AUM, which is what the sliced output reports for the warm-up
/// span.
#[derive(Debug, Clone)]
pub struct PerformanceLedger {
    rows: Vec<PerformanceRow>,
    initial_aum: f64,
}

impl PerformanceLedger {
    /// Creates a ledger with one seeded row per panel date.
    #[must_use]
    pub fn seeded(panel: &PricePanel, initial_aum: f64) -> Self {
        let rows = panel
            .dates()
            .iter()
            .map(|&date| PerformanceRow {
                date,
                aum: initial_aum,
                dividends: 0.0,
            })
            .collect();
        Self { rows, initial_aum }
    }

    /// AUM available to a rebalance at `pos`: the previous day's close
    /// value, or the seed when the calendar has no previous day.
    #[must_use]
    pub fn aum_before(&self, pos: usize) -> f64 {
        if pos == 0 {
            self.initial_aum
        } else {
            self.rows[pos - 1].aum
        }
    }

    /// Marks `portfolio` to market on day `pos` and rolls the cumulative
    /// dividend total forward.
    ///
    /// # Errors
    ///
    /// Returns an error when a holding's ticker is not in the panel.
    pub fn mark(&mut self, panel: &PricePanel, portfolio: &Portfolio, pos: usize) -> Result<()> {
        let value = portfolio.market_value(panel, pos)?;
        let income = portfolio.dividend_income(panel, pos)?;
        let carried = if pos == 0 {
            0.0
        } else {
            self.rows[pos - 1].dividends
        };
        self.rows[pos].aum = value;
        self.rows[pos].dividends = carried + income;
        Ok(())
    }

    /// All rows, one per panel date.
    #[must_use]
    pub fn rows(&self) -> &[PerformanceRow] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Days;
    use levante_traits::Date;

    fn flat_then_moving_panel() -> PricePanel {
        let start = Date::from_ymd_opt(2023, 5, 1).unwrap();
        let dates = (0..5).map(|i| start + Days::new(i)).collect::<Vec<_>>();
        PricePanel::new(
            vec!["AAA".to_string()],
            dates,
            vec![vec![100.0, 100.0, 110.0, 120.0, 90.0]],
            vec![vec![0.0, 0.25, 0.0, 0.25, 0.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_seeded_rows_carry_initial_aum() {
        let panel = flat_then_moving_panel();
        let ledger = PerformanceLedger::seeded(&panel, 5000.0);
        assert_eq!(ledger.rows().len(), 5);
        for row in ledger.rows() {
            assert_relative_eq!(row.aum, 5000.0);
            assert_relative_eq!(row.dividends, 0.0);
        }
        assert_relative_eq!(ledger.aum_before(0), 5000.0);
        assert_relative_eq!(ledger.aum_before(3), 5000.0);
    }

    #[test]
    fn test_mark_overwrites_with_market_value() {
        let panel = flat_then_moving_panel();
        let mut ledger = PerformanceLedger::seeded(&panel, 10000.0);
        let portfolio = Portfolio::equal_weight(&panel, &[0], 10000.0, 1).unwrap();
        // 100 shares bought at 100.
        ledger.mark(&panel, &portfolio, 2).unwrap();
        assert_relative_eq!(ledger.rows()[2].aum, 11000.0, epsilon = 1e-9);
        assert_relative_eq!(ledger.aum_before(3), 11000.0, epsilon = 1e-9);
        // Untouched rows keep their seed.
        assert_relative_eq!(ledger.rows()[3].aum, 10000.0);
    }

    #[test]
    fn test_dividends_accumulate_across_marks() {
        let panel = flat_then_moving_panel();
        let mut ledger = PerformanceLedger::seeded(&panel, 10000.0);
        let portfolio = Portfolio::equal_weight(&panel, &[0], 10000.0, 0).unwrap();
        for pos in 0..4 {
            ledger.mark(&panel, &portfolio, pos).unwrap();
        }
        // 100 shares, payouts of 0.25 on days 1 and 3.
        assert_relative_eq!(ledger.rows()[0].dividends, 0.0);
        assert_relative_eq!(ledger.rows()[1].dividends, 25.0, epsilon = 1e-9);
        assert_relative_eq!(ledger.rows()[2].dividends, 25.0, epsilon = 1e-9);
        assert_relative_eq!(ledger.rows()[3].dividends, 50.0, epsilon = 1e-9);
    }
}
