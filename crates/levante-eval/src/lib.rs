//! Walk-forward backtesting and evaluation for levante.
//!
//! This crate assembles the monthly-rebalanced simulation from its
//! parts:
//! - Stock selection by ranked score ([`select_top`])
//! - Equal-weight portfolio construction ([`Portfolio`])
//! - Day-by-day AUM and dividend accounting ([`PerformanceLedger`])
//! - Per-period hit-rate IC ([`cumulative_ic`])
//! - The orchestrating month-end loop ([`Backtest`])
//! - End-of-run summary statistics ([`SummaryStats`])
//!
//! # Example
//!
//! ```rust,ignore
//! use levante_eval::{Backtest, BacktestConfig, SelectionMode, SummaryStats};
//! use levante_traits::StrategySpec;
//!
//! let config = BacktestConfig {
//!     mode: SelectionMode::Raw {
//!         strategy: StrategySpec::momentum(20),
//!     },
//!     ..BacktestConfig::default()
//! };
//! let report = Backtest::new(config).run(&panel)?;
//! let summary = SummaryStats::from_performance(&report.performance, 10_000.0)?;
//! println!("total return {:.3}%", summary.total_return * 100.0);
//! ```

pub mod backtest;
pub mod ic;
pub mod portfolio;
pub mod roller;
pub mod select;
pub mod summary;

// Re-export main types
pub use backtest::{Backtest, BacktestConfig, BacktestReport, SelectionMode};
pub use ic::{cumulative_ic, period_ic, MonthlyIc};
pub use portfolio::{Holding, Portfolio};
pub use roller::{PerformanceLedger, PerformanceRow};
pub use select::{select_top, selection_count};
pub use summary::{daily_returns, SummaryStats, DAILY_RISK_FREE, DAYS_PER_YEAR};
