//! Cross-sectional return signals for the levante backtest engine.
//!
//! This crate computes the two per-stock quantities the walk-forward loop
//! consumes at every rebalance:
//! - Features: trailing percentage returns over a strategy-defined lookback
//!   window, optionally shifted back to skip the most recent month
//!   ([`feature::trailing_return`]).
//! - Labels: the realized percentage return between two consecutive
//!   month-end positions, the supervised-learning target
//!   ([`label::realized_return`]).
//!
//! Both calculators address the shared calendar of a
//! [`PricePanel`](levante_traits::PricePanel) by position, so a feature and
//! a label computed for the same reference position are guaranteed to come
//! from the same trading day across every ticker.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use levante_signals::label::realized_return;
//! use levante_traits::PricePanel;
//!
//! let dates = [(1, 30), (1, 31), (2, 27), (2, 28), (3, 1)]
//!     .iter()
//!     .map(|&(m, d)| NaiveDate::from_ymd_opt(2023, m, d).unwrap())
//!     .collect();
//! let panel = PricePanel::new(
//!     vec!["ACME".to_string()],
//!     dates,
//!     vec![vec![100.0, 100.0, 104.0, 105.0, 103.0]],
//!     vec![vec![0.0; 5]],
//! )
//! .unwrap();
//!
//! // January closes at position 1, February at position 3.
//! let label = realized_return(&panel, 0, 3).unwrap();
//! assert!((label - 5.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod feature;
pub mod label;

pub use feature::{trailing_return, trailing_returns};
pub use label::{realized_return, realized_returns};

/// Percentage change from `start` to `end`, in percent.
///
/// This is the single return formula used throughout the engine, for
/// features and labels alike.
///
/// # Examples
///
/// ```
/// use levante_signals::pct_change;
///
/// assert!((pct_change(100.0, 110.0) - 10.0).abs() < 1e-12);
/// assert!((pct_change(80.0, 60.0) + 25.0).abs() < 1e-12);
/// ```
#[must_use]
pub const fn pct_change(start: f64, end: f64) -> f64 {
    (end - start) / start * 100.0
}
