//! Error types for the Levante engine.
//!
//! This module defines the error taxonomy used throughout the Levante
//! workspace: history preconditions, regression degeneracy, selection
//! invariants, and panel construction faults.

use thiserror::Error;

/// The main error type for Levante operations.
///
/// A backtest is a deterministic batch computation: every variant here is
/// fatal to the run that raised it. Nothing is retried and partial results
/// are never returned.
#[derive(Debug, Error)]
pub enum LevanteError {
    /// A lookback window or label horizon reaches before available history.
    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    /// The training set is too small or rank-deficient for the regression.
    #[error("Degenerate fit: {0}")]
    DegenerateFit(String),

    /// The selector produced zero stocks. Upstream must guarantee
    /// `top_pct >= 1` and a non-empty universe, so reaching this is an
    /// invariant violation rather than a user error.
    #[error("Empty selection: {0}")]
    EmptySelection(String),

    /// Invalid or malformed input data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A per-ticker series does not align with the shared calendar.
    #[error("Series for {ticker} has {actual} rows, calendar has {expected}")]
    MismatchedSeries {
        /// Ticker whose series is misaligned.
        ticker: String,
        /// Calendar length the series must match.
        expected: usize,
        /// Actual series length.
        actual: usize,
    },

    /// A ticker is not present in the panel.
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),

    /// A date is out of range or cannot be constructed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for LevanteError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for LevanteError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Levante operations.
///
/// This is a convenience type that uses [`LevanteError`] as the error type.
pub type Result<T> = std::result::Result<T, LevanteError>;
