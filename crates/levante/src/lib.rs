#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/levante/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # levante
//!
//! Walk-forward backtest engine for monthly-rebalanced equity strategies.
//!
//! levante is an umbrella crate that re-exports all levante sub-crates for
//! convenience. It provides one API surface for loading price histories,
//! computing trailing-return signals, fitting return models, and running
//! causally-ordered backtests.
//!
//! ## Quick Start
//!
//! ```
//! use levante::data::{synthetic_panel, SyntheticSeries};
//! use levante::{Backtest, BacktestConfig, Date, SelectionMode, StrategySpec, SummaryStats};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Eighteen months of synthetic history for three names.
//! let begin = Date::from_ymd_opt(2022, 1, 3).unwrap();
//! let end = Date::from_ymd_opt(2023, 6, 30).unwrap();
//! let mut fast = SyntheticSeries::new("AAA", 100.0);
//! fast.drift = 0.30;
//! let mut slow = SyntheticSeries::new("BBB", 80.0);
//! slow.drift = 0.05;
//! let mut fading = SyntheticSeries::new("CCC", 120.0);
//! fading.drift = -0.10;
//! let panel = synthetic_panel(begin, end, &[fast, slow, fading])?;
//!
//! // Momentum over 50 trading days, buy the top half of the ranking.
//! let config = BacktestConfig {
//!     begin: Date::from_ymd_opt(2022, 9, 1).unwrap(),
//!     end: None,
//!     initial_aum: 10_000.0,
//!     top_pct: 50,
//!     mode: SelectionMode::Raw {
//!         strategy: StrategySpec::momentum(50),
//!     },
//! };
//! let report = Backtest::new(config).run(&panel)?;
//! let stats = SummaryStats::from_performance(&report.performance, 10_000.0)?;
//!
//! assert!(stats.calendar_days > 0);
//! assert_eq!(report.monthly_ic.len() + 1, report.portfolios.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - The price panel, strategy vocabulary, model seam and errors
//! - [`signals`] - Trailing-return features and realized-return labels
//! - [`model`] - Training-set accumulation and no-intercept least squares
//! - [`eval`] - Selection, portfolio accounting, IC and the backtest loop
//! - [`data`] - CSV history loading, synthetic panels and DataFrame export
//!
//! ## Architecture
//!
//! levante keeps strict temporal causality through four stages:
//!
//! 1. **Panels** align every ticker onto one trading calendar at load time
//! 2. **Signals** read trailing windows that end at or before the reference day
//! 3. **Models** refit at each rebalance on an append-only training set
//! 4. **The evaluator** buys at month-end closes and marks daily from there

/// Version information for the levante crate.
///
/// This constant contains the current version of levante as specified in
/// Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core type definitions for levante.
///
/// This module re-exports the foundational pieces the engine is built on:
///
/// - [`PricePanel`] - Position-aligned daily history for a ticker universe
/// - [`StrategySpec`] - A momentum or reversal signal bound to a window
/// - [`ReturnModel`](traits::ReturnModel) - The fit/predict seam models plug into
/// - [`LevanteError`] - The error taxonomy shared across the workspace
pub mod traits {
    pub use levante_traits::*;
}

// Re-export the engine entry points at top level for convenience
pub use levante_eval::{Backtest, BacktestConfig, BacktestReport, SelectionMode};

// Re-export error types
pub use levante_traits::{LevanteError, Result};

// Re-export common types
pub use levante_eval::SummaryStats;
pub use levante_traits::{Date, PricePanel, StrategyKind, StrategySpec, Ticker};

// ============================================================================
// Signals
// ============================================================================

/// Trailing-return signal computation.
///
/// Features are percentage price changes over a lookback window that ends
/// at (reversal) or one month before (momentum) a reference day; labels
/// are the realized return from the previous month end to the reference.
///
/// # Example
///
/// ```ignore
/// use levante::signals::trailing_return;
/// use levante::StrategySpec;
///
/// let signal = trailing_return(&panel, 0, &StrategySpec::reversal(5), month_end)?;
/// ```
pub mod signals {
    pub use levante_signals::*;
}

// ============================================================================
// Return Models
// ============================================================================

/// Return-model fitting.
///
/// The model variant of the backtest accumulates one training row per
/// stock per rebalance and refits a no-intercept ordinary-least-squares
/// regression each month:
///
/// - [`TrainingSet`](model::TrainingSet) - Append-only observation store
/// - [`LeastSquares`](model::LeastSquares) - Closed-form OLS through the origin
/// - [`ModelRecord`](model::ModelRecord) - Dated coefficient/t-value audit entries
pub mod model {
    pub use levante_model::*;
}

// ============================================================================
// Evaluation
// ============================================================================

/// Portfolio simulation and evaluation.
///
/// This module contains the walk-forward loop and everything it records:
///
/// - [`Backtest`] - The orchestrator; one call runs the whole simulation
/// - [`Portfolio`](eval::Portfolio) - Equal-weight fractional-share holdings
/// - [`MonthlyIc`](eval::MonthlyIc) - Hit-rate information coefficient per period
/// - [`SummaryStats`] - P&L, annualized return and Sharpe over the run
///
/// ## Information Coefficient
///
/// The IC here is a hit rate mapped onto [-1, 1]:
///
/// ```text
/// IC_t = 2 * (names that rose by the next rebalance / names held) - 1
/// ```
///
/// All-correct scores +1, a coin flip 0, all-wrong -1. The cumulative
/// column is a running sum, so a persistently positive signal trends up.
pub mod eval {
    pub use levante_eval::*;
}

// ============================================================================
// Data
// ============================================================================

/// Price history loading and report export.
///
/// Histories load from one CSV per ticker (`Date`, `Close`, `Dividends`
/// columns) onto a shared calendar; backtest output exports back to
/// polars frames for CSV persistence.
///
/// ## Example
///
/// ```ignore
/// use levante::data::load_panel;
///
/// let panel = load_panel(Path::new("data/"), &tickers)?;
/// ```
pub mod data {
    pub use levante_data::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types for working with
/// levante. Import it with:
///
/// ```ignore
/// use levante::prelude::*;
/// ```
///
/// This brings into scope:
/// - The engine: [`Backtest`], [`BacktestConfig`], [`SelectionMode`]
/// - Common types: [`PricePanel`], [`StrategySpec`], [`Date`], [`SummaryStats`]
/// - Error types: [`Result`], [`LevanteError`]
pub mod prelude {
    pub use crate::traits::*;
    pub use crate::{Backtest, BacktestConfig, BacktestReport, SelectionMode, SummaryStats};
    pub use crate::{LevanteError, Result};
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        // Version should be in semver format (x.y.z)
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        // This test verifies that all re-exports compile correctly
        // by using them in type annotations

        fn _accept_panel(_panel: &PricePanel) {}
        fn _accept_model(_model: &dyn traits::ReturnModel) {}
        fn _accept_config(_config: &BacktestConfig) {}
        fn _accept_spec(_spec: StrategySpec) {}

        // If this compiles, re-exports are working
    }

    #[test]
    fn test_error_types() {
        // Verify Result type works
        let _result: Result<()> = Ok(());

        // Verify error construction works
        let _error: LevanteError = LevanteError::InvalidData("test".to_string());
    }
}
