//! Portfolio construction and valuation.

use levante_traits::{Date, LevanteError, PricePanel, Result, Ticker};
use serde::{Deserialize, Serialize};

/// One position: a ticker and a fractional share quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker the position is held in.
    pub ticker: Ticker,
    /// Number of shares, fractional shares allowed.
    pub quantity: f64,
}

/// The set of holdings bought at one rebalance.
///
/// Holdings carry ticker names rather than panel positions, so an
/// archived portfolio stays meaningful after the run and can be
/// serialized as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Date the holdings were bought.
    pub date: Date,
    /// Positions in selection order, best-ranked first.
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    /// Buys the selected panel indices with equal capital per name.
    ///
    /// Each name receives `aum / selected.len()` of capital converted to
    /// shares at that day's close, so the portfolio is worth exactly
    /// `aum` the instant it is built.
    ///
    /// # Errors
    ///
    /// Returns [`LevanteError::EmptySelection`] when `selected` is empty.
    ///
    /// # Panics
    ///
    /// Panics if an index in `selected` or `pos` is out of range for the
    /// panel.
    pub fn equal_weight(
        panel: &PricePanel,
        selected: &[usize],
        aum: f64,
        pos: usize,
    ) -> Result<Self> {
        if selected.is_empty() {
            return Err(LevanteError::EmptySelection(format!(
                "no names selected to buy on {}",
                panel.date(pos)
            )));
        }
        let aum_per_name = aum / selected.len() as f64;
        let holdings = selected
            .iter()
            .map(|&idx| Holding {
                ticker: panel.tickers()[idx].clone(),
                quantity: aum_per_name / panel.close(idx, pos),
            })
            .collect();
        Ok(Self {
            date: panel.date(pos),
            holdings,
        })
    }

    /// Marks the holdings to market at a calendar position.
    ///
    /// # Errors
    ///
    /// Returns [`LevanteError::TickerNotFound`] when a holding's ticker
    /// is not in the panel.
    pub fn market_value(&self, panel: &PricePanel, pos: usize) -> Result<f64> {
        let mut total = 0.0;
        for holding in &self.holdings {
            let idx = panel.ticker_index(&holding.ticker)?;
            total += holding.quantity * panel.close(idx, pos);
        }
        Ok(total)
    }

    /// Cash paid by the holdings' dividends on one calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`LevanteError::TickerNotFound`] when a holding's ticker
    /// is not in the panel.
    pub fn dividend_income(&self, panel: &PricePanel, pos: usize) -> Result<f64> {
        let mut total = 0.0;
        for holding in &self.holdings {
            let idx = panel.ticker_index(&holding.ticker)?;
            total += holding.quantity * panel.dividend(idx, pos);
        }
        Ok(total)
    }
}
