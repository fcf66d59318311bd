//! Append-only training history accumulated across rebalances.

use levante_signals::{realized_return, trailing_return};
use levante_traits::{LevanteError, PricePanel, Result, StrategySpec, Ticker};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// One training observation: a ticker's features and the return they
/// preceded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    /// Ticker the observation belongs to.
    pub ticker: Ticker,
    /// Feature values, one per strategy column.
    pub features: Vec<f64>,
    /// Realized month-over-month return in percent.
    pub label: f64,
}

/// The growing table a model fits on.
///
/// Rows are only ever appended, never removed or altered. Each call to
/// [`extend_from_panel`](Self::extend_from_panel) adds one row per ticker
/// whose features were observable a full month before the label's period
/// closed, so a model fit on this table has seen no outcome from the
/// period it is about to predict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSet {
    n_features: usize,
    rows: Vec<TrainingRow>,
}

impl TrainingSet {
    /// Creates an empty table with a fixed feature width.
    #[must_use]
    pub const fn new(n_features: usize) -> Self {
        Self {
            n_features,
            rows: Vec::new(),
        }
    }

    /// Number of feature columns.
    #[must_use]
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of accumulated rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows have been accumulated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Accumulated rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[TrainingRow] {
        &self.rows
    }

    /// Appends a single row.
    ///
    /// # Errors
    ///
    /// Returns [`LevanteError::InvalidData`] when the row's feature width
    /// disagrees with the table.
    pub fn push(&mut self, row: TrainingRow) -> Result<()> {
        if row.features.len() != self.n_features {
            return Err(LevanteError::InvalidData(format!(
                "row for {} has {} features, table expects {}",
                row.ticker,
                row.features.len(),
                self.n_features
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Appends one row per panel ticker for the period ending at
    /// `month_end`.
    ///
    /// Features are evaluated at the month end immediately *before*
    /// `month_end` and labels at `month_end` itself, keeping every row
    /// causally ordered. Either the whole cross-section is appended or
    /// nothing is.
    ///
    /// # Errors
    ///
    /// Returns [`LevanteError::InvalidData`] when `specs` does not match
    /// the table's feature width, and
    /// [`LevanteError::InsufficientHistory`] when no month end precedes
    /// `month_end` or the calendar is too short for a feature window.
    pub fn extend_from_panel(
        &mut self,
        panel: &PricePanel,
        specs: &[StrategySpec],
        month_end: usize,
    ) -> Result<()> {
        if specs.len() != self.n_features {
            return Err(LevanteError::InvalidData(format!(
                "{} strategy columns offered, table expects {}",
                specs.len(),
                self.n_features
            )));
        }
        let reference = panel.previous_month_end(month_end).ok_or_else(|| {
            LevanteError::InsufficientHistory(format!(
                "no month end precedes {} to anchor training features",
                panel.date(month_end),
            ))
        })?;

        let mut batch = Vec::with_capacity(panel.n_tickers());
        for (ticker_idx, ticker) in panel.tickers().iter().enumerate() {
            let features = specs
                .iter()
                .map(|&spec| trailing_return(panel, ticker_idx, spec, reference))
                .collect::<Result<Vec<f64>>>()?;
            let label = realized_return(panel, ticker_idx, month_end)?;
            batch.push(TrainingRow {
                ticker: ticker.clone(),
                features,
                label,
            });
        }
        self.rows.extend(batch);
        Ok(())
    }

    /// Design matrix with one row per observation and one column per
    /// feature.
    #[must_use]
    pub fn design_matrix(&self) -> Array2<f64> {
        let mut matrix = Array2::zeros((self.rows.len(), self.n_features));
        for (i, row) in self.rows.iter().enumerate() {
            for (j, &value) in row.features.iter().enumerate() {
                matrix[[i, j]] = value;
            }
        }
        matrix
    }

    /// Label vector aligned with [`design_matrix`](Self::design_matrix).
    #[must_use]
    pub fn labels(&self) -> Array1<f64> {
        self.rows.iter().map(|row| row.label).collect()
    }
}
