//! Error types for price history loading.

use thiserror::Error;

/// Errors that can occur while loading or exporting price data.
#[derive(Debug, Error)]
pub enum DataError {
    /// CSV read or DataFrame operation failed.
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// A required column is absent from a ticker's history file.
    #[error("column '{column}' missing from history for {ticker}")]
    MissingColumn {
        /// Ticker whose file is malformed.
        ticker: String,
        /// Name of the absent column.
        column: String,
    },

    /// A date cell could not be parsed.
    #[error("unparseable date '{value}' in history for {ticker}")]
    InvalidDate {
        /// Ticker whose file is malformed.
        ticker: String,
        /// The offending cell text.
        value: String,
    },

    /// A price or dividend cell is null.
    #[error("null '{column}' value at row {row} in history for {ticker}")]
    NullValue {
        /// Ticker whose file is malformed.
        ticker: String,
        /// Column holding the null.
        column: String,
        /// Zero-based row index in file order.
        row: usize,
    },

    /// A ticker's trading calendar disagrees with the first ticker's.
    #[error("calendar for {ticker} does not match the panel calendar: {detail}")]
    MisalignedCalendar {
        /// Ticker whose calendar diverges.
        ticker: String,
        /// First point of divergence.
        detail: String,
    },

    /// Loaded data failed panel validation.
    #[error(transparent)]
    Panel(#[from] levante_traits::LevanteError),
}
