//! Price history loading and report export for Levante.
//!
//! This crate turns on-disk CSV histories into validated
//! [`PricePanel`](levante_traits::PricePanel)s and backtest output back
//! into polars frames.
//!
//! # History layout
//!
//! Each ticker lives in its own `<TICKER>.csv` with `Date`, `Close` and
//! `Dividends` columns, dates formatted `%Y-%m-%d`. All tickers must
//! trade on the same calendar; the loader rejects anything else before
//! the engine sees it.
//!
//! # Usage
//!
//! ```rust
//! use levante_data::{synthetic_panel, SyntheticSeries};
//! use levante_traits::Date;
//!
//! let begin = Date::from_ymd_opt(2023, 1, 2).unwrap();
//! let end = Date::from_ymd_opt(2023, 3, 31).unwrap();
//!
//! let mut series = SyntheticSeries::new("AAA", 100.0);
//! series.drift = 0.4;
//!
//! let panel = synthetic_panel(begin, end, &[series]).unwrap();
//! assert_eq!(panel.month_end_positions().len(), 2);
//! ```

mod error;
mod export;
mod loader;
mod synthetic;

pub use error::DataError;
pub use export::{ic_frame, model_frame, performance_frame, write_frame};
pub use loader::{load_panel, CLOSE_COLUMN, DATE_COLUMN, DATE_FORMAT, DIVIDENDS_COLUMN};
pub use synthetic::{synthetic_panel, weekday_calendar, SyntheticSeries};

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;
