//! Walk-forward backtest orchestration.
//!
//! Drives the month-end loop: at every eligible month end the engine
//! scores the universe, replaces the portfolio against the AUM observed
//! the instant before, and then marks the new holdings to market day by
//! day until the next month end. Model-driven runs additionally grow a
//! training set and refit a regression at every rebalance, using only
//! outcomes that had fully realized by that day.

use chrono::Months;
use levante_model::{LeastSquares, ModelRecord, TrainingSet};
use levante_signals::trailing_returns;
use levante_traits::{
    Date, LevanteError, PricePanel, RankDirection, Result, ReturnModel, StrategySpec,
};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::ic::{cumulative_ic, MonthlyIc};
use crate::portfolio::Portfolio;
use crate::roller::{PerformanceLedger, PerformanceRow};
use crate::select::select_top;

/// How each rebalance picks names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Rank the universe directly on one strategy's trailing return.
    /// Momentum buys the best trailing performers, reversal the worst.
    Raw {
        /// Strategy whose signal orders the universe.
        strategy: StrategySpec,
    },
    /// Regress realized month-over-month returns on two strategy
    /// features and rank on the predicted return, lowest first.
    Model {
        /// Feature columns, in training-table order.
        strategies: [StrategySpec; 2],
    },
}

/// Backtest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// First date the reported performance series may start on.
    pub begin: Date,
    /// Optional last simulated date; `None` runs to the panel's end.
    pub end: Option<Date>,
    /// Assets under management the run starts with.
    pub initial_aum: f64,
    /// Percentage of the universe to buy at each rebalance, 1 to 100.
    pub top_pct: usize,
    /// Selection policy.
    pub mode: SelectionMode,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            begin: Date::from_ymd_opt(2020, 1, 1).unwrap(),
            end: None,
            initial_aum: 10_000.0,
            top_pct: 50,
            mode: SelectionMode::Model {
                strategies: [StrategySpec::momentum(50), StrategySpec::reversal(5)],
            },
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Daily performance, sliced to start at the configured begin date.
    pub performance: Vec<PerformanceRow>,
    /// Per-period IC rows, one per rebalance except the last.
    pub monthly_ic: Vec<MonthlyIc>,
    /// One model snapshot per fit, in call order. Empty for raw runs.
    pub model_log: Vec<ModelRecord>,
    /// Every portfolio bought, in rebalance order.
    pub portfolios: Vec<Portfolio>,
    /// The accumulated training table. `None` for raw runs.
    pub training: Option<TrainingSet>,
}

/// Walk-forward backtesting engine.
#[derive(Debug, Default)]
pub struct Backtest {
    config: BacktestConfig,
}

impl Backtest {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub const fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// The configuration the engine runs with.
    #[must_use]
    pub const fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Runs the backtest over a panel.
    ///
    /// Month ends are eligible for rebalancing when they fall after
    /// `begin` minus one calendar month, giving the first reported days
    /// a live portfolio bought during the warm-up span. The performance
    /// series is computed over the whole panel and then sliced to the
    /// first date on or after `begin`.
    ///
    /// # Errors
    ///
    /// Returns [`LevanteError::InsufficientHistory`] when the window
    /// contains no eligible month end (or only one, in model mode), when
    /// a feature window reaches before the panel's first day, or when
    /// the begin date falls after the last simulated day.
    /// [`LevanteError::DegenerateFit`] and
    /// [`LevanteError::EmptySelection`] abort the run as configuration
    /// faults.
    pub fn run(&self, panel: &PricePanel) -> Result<BacktestReport> {
        let end_pos = match self.config.end {
            Some(end) => panel.last_position_on_or_before(end).ok_or_else(|| {
                LevanteError::InsufficientHistory(format!(
                    "panel has no trading day on or before {end}"
                ))
            })?,
            None => panel.n_days() - 1,
        };
        let cutoff = self
            .config
            .begin
            .checked_sub_months(Months::new(1))
            .ok_or_else(|| {
                LevanteError::InvalidDate(format!(
                    "cannot step one month back from {}",
                    self.config.begin
                ))
            })?;
        let eligible: Vec<usize> = panel
            .month_end_positions()
            .into_iter()
            .filter(|&pos| pos <= end_pos && panel.date(pos) > cutoff)
            .collect();
        if eligible.is_empty() {
            return Err(LevanteError::InsufficientHistory(format!(
                "no month end after {cutoff} within the backtest window"
            )));
        }

        match &self.config.mode {
            SelectionMode::Raw { strategy } => self.run_raw(panel, &eligible, end_pos, *strategy),
            SelectionMode::Model { strategies } => {
                self.run_model(panel, &eligible, end_pos, *strategies)
            }
        }
    }

    /// Single-strategy loop: every eligible month end rebalances.
    fn run_raw(
        &self,
        panel: &PricePanel,
        eligible: &[usize],
        end_pos: usize,
        strategy: StrategySpec,
    ) -> Result<BacktestReport> {
        let mut ledger = PerformanceLedger::seeded(panel, self.config.initial_aum);
        let mut portfolios: Vec<Portfolio> = Vec::with_capacity(eligible.len());
        let mut current: Option<Portfolio> = None;
        let mut next_idx = 0;

        for pos in eligible[0]..=end_pos {
            if next_idx < eligible.len() && eligible[next_idx] == pos {
                let scores = trailing_returns(panel, strategy, pos)?;
                let selected = select_top(&scores, strategy.kind.direction(), self.config.top_pct);
                let portfolio =
                    Portfolio::equal_weight(panel, &selected, ledger.aum_before(pos), pos)?;
                portfolios.push(portfolio.clone());
                current = Some(portfolio);
                next_idx += 1;
            }
            if let Some(portfolio) = &current {
                ledger.mark(panel, portfolio, pos)?;
            }
        }

        let monthly_ic = cumulative_ic(panel, eligible, &portfolios)?;
        Ok(BacktestReport {
            performance: self.slice_performance(panel, &ledger, end_pos)?,
            monthly_ic,
            model_log: Vec::new(),
            portfolios,
            training: None,
        })
    }

    /// Two-strategy loop: the first eligible month end only anchors the
    /// training features, so rebalancing starts at the second.
    fn run_model(
        &self,
        panel: &PricePanel,
        eligible: &[usize],
        end_pos: usize,
        strategies: [StrategySpec; 2],
    ) -> Result<BacktestReport> {
        if eligible.len() < 2 {
            return Err(LevanteError::InsufficientHistory(
                "model selection needs two month ends in the window, \
                 the first anchors training features only"
                    .to_string(),
            ));
        }

        let model = LeastSquares::new();
        let mut training = TrainingSet::new(strategies.len());
        let mut model_log: Vec<ModelRecord> = Vec::with_capacity(eligible.len() - 1);
        let mut ledger = PerformanceLedger::seeded(panel, self.config.initial_aum);
        let mut portfolios: Vec<Portfolio> = Vec::with_capacity(eligible.len() - 1);
        let mut current: Option<Portfolio> = None;
        let mut next_idx = 1;

        for pos in eligible[1]..=end_pos {
            if next_idx < eligible.len() && eligible[next_idx] == pos {
                training.extend_from_panel(panel, &strategies, pos)?;
                let fit = model.fit(training.design_matrix().view(), training.labels().view())?;
                model_log.push(ModelRecord::from_fit(panel.date(pos), &fit));

                let features = feature_matrix(panel, &strategies, pos)?;
                let scores = model.predict(&fit, features.view()).to_vec();
                let selected = select_top(&scores, RankDirection::Ascending, self.config.top_pct);
                let portfolio =
                    Portfolio::equal_weight(panel, &selected, ledger.aum_before(pos), pos)?;
                portfolios.push(portfolio.clone());
                current = Some(portfolio);
                next_idx += 1;
            }
            if let Some(portfolio) = &current {
                ledger.mark(panel, portfolio, pos)?;
            }
        }

        let monthly_ic = cumulative_ic(panel, &eligible[1..], &portfolios)?;
        Ok(BacktestReport {
            performance: self.slice_performance(panel, &ledger, end_pos)?,
            monthly_ic,
            model_log,
            portfolios,
            training: Some(training),
        })
    }

    fn slice_performance(
        &self,
        panel: &PricePanel,
        ledger: &PerformanceLedger,
        end_pos: usize,
    ) -> Result<Vec<PerformanceRow>> {
        let slice_start = panel
            .first_position_on_or_after(self.config.begin)
            .ok_or_else(|| {
                LevanteError::InsufficientHistory(format!(
                    "panel has no trading day on or after {}",
                    self.config.begin
                ))
            })?;
        if slice_start > end_pos {
            return Err(LevanteError::InsufficientHistory(format!(
                "begin {} falls after the last simulated day {}",
                self.config.begin,
                panel.date(end_pos)
            )));
        }
        Ok(ledger.rows()[slice_start..=end_pos].to_vec())
    }
}

/// Current-period feature matrix: one row per ticker, one column per
/// strategy, evaluated at `reference`.
fn feature_matrix(
    panel: &PricePanel,
    strategies: &[StrategySpec],
    reference: usize,
) -> Result<Array2<f64>> {
    let mut matrix = Array2::zeros((panel.n_tickers(), strategies.len()));
    for (j, &spec) in strategies.iter().enumerate() {
        let column = trailing_returns(panel, spec, reference)?;
        for (i, value) in column.into_iter().enumerate() {
            matrix[[i, j]] = value;
        }
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Days;

    // Multiplicative random walk with a fixed seed, so every run sees
    // the same prices without a rand dependency.
    fn walk(seed: u64, start_price: f64, n: usize) -> Vec<f64> {
        let mut state = seed;
        let mut price = start_price;
        let mut series = Vec::with_capacity(n);
        for _ in 0..n {
            series.push(price);
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let step = ((state >> 33) % 2001) as f64 / 1000.0 - 1.0;
            price *= 1.0 + 0.02 * step;
        }
        series
    }

    // Daily calendar from September 2022 through 2023-04-10. Month ends
    // land at positions 29, 60, 90, 121 (Dec 31), 152 (Jan 31),
    // 180 (Feb 28) and 211 (Mar 31).
    fn walk_panel() -> PricePanel {
        let start = Date::from_ymd_opt(2022, 9, 1).unwrap();
        let dates = (0..222).map(|i| start + Days::new(i)).collect::<Vec<_>>();
        let n = dates.len();
        let closes = vec![
            walk(11, 50.0, n),
            walk(23, 120.0, n),
            walk(37, 80.0, n),
            walk(51, 200.0, n),
        ];
        PricePanel::new(
            vec![
                "AAA".to_string(),
                "BBB".to_string(),
                "CCC".to_string(),
                "DDD".to_string(),
            ],
            dates,
            closes,
            vec![vec![0.0; n]; 4],
        )
        .unwrap()
    }

    fn model_config() -> BacktestConfig {
        BacktestConfig {
            begin: Date::from_ymd_opt(2023, 1, 1).unwrap(),
            end: None,
            initial_aum: 10_000.0,
            top_pct: 50,
            mode: SelectionMode::Model {
                strategies: [StrategySpec::momentum(50), StrategySpec::reversal(5)],
            },
        }
    }

    fn row_index(report: &BacktestReport, date: Date) -> usize {
        report
            .performance
            .iter()
            .position(|row| row.date == date)
            .unwrap()
    }

    #[test]
    fn test_model_run_shape() {
        let panel = walk_panel();
        let report = Backtest::new(model_config()).run(&panel).unwrap();

        // Four eligible month ends: the December one anchors training,
        // the other three rebalance.
        assert_eq!(report.portfolios.len(), 3);
        assert_eq!(report.model_log.len(), 3);
        assert_eq!(report.monthly_ic.len(), 2);
        let training = report.training.as_ref().unwrap();
        assert_eq!(training.n_features(), 2);
        assert_eq!(training.len(), 12);
        assert_eq!(report.model_log[0].n_obs, 4);
        assert_eq!(report.model_log[2].n_obs, 12);

        // Half of four names per portfolio.
        for portfolio in &report.portfolios {
            assert_eq!(portfolio.holdings.len(), 2);
        }

        // Sliced output starts at the configured begin date, still flat
        // at the seed because the first rebalance is January's.
        assert_eq!(report.performance.len(), 100);
        assert_eq!(
            report.performance[0].date,
            Date::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_relative_eq!(report.performance[0].aum, 10_000.0);
        assert_relative_eq!(report.performance[0].dividends, 0.0);
        assert_eq!(
            report.portfolios[0].date,
            Date::from_ymd_opt(2023, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_model_run_preserves_aum_across_rebalances() {
        let panel = walk_panel();
        let report = Backtest::new(model_config()).run(&panel).unwrap();

        // A rebalance only converts the previous close's AUM into new
        // holdings, so the marked value that day must equal it.
        for portfolio in &report.portfolios {
            let idx = row_index(&report, portfolio.date);
            assert!(idx > 0);
            assert_relative_eq!(
                report.performance[idx].aum,
                report.performance[idx - 1].aum,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_model_log_dates_match_rebalances() {
        let panel = walk_panel();
        let report = Backtest::new(model_config()).run(&panel).unwrap();
        for (record, portfolio) in report.model_log.iter().zip(&report.portfolios) {
            assert_eq!(record.date, portfolio.date);
            assert_eq!(record.coefficients.len(), 2);
        }
    }

    #[test]
    fn test_raw_run_rebalances_every_eligible_month_end() {
        let panel = walk_panel();
        let config = BacktestConfig {
            mode: SelectionMode::Raw {
                strategy: StrategySpec::momentum(20),
            },
            ..model_config()
        };
        let report = Backtest::new(config).run(&panel).unwrap();

        assert_eq!(report.portfolios.len(), 4);
        assert_eq!(report.monthly_ic.len(), 3);
        assert!(report.model_log.is_empty());
        assert!(report.training.is_none());
        assert_eq!(
            report.portfolios[0].date,
            Date::from_ymd_opt(2022, 12, 31).unwrap()
        );
        // December's rebalance happens during warm-up, so the first
        // reported day is already marked to market.
        assert_eq!(report.performance.len(), 100);
    }

    #[test]
    fn test_raw_reversal_buys_the_losers() {
        let panel = walk_panel();
        let config = BacktestConfig {
            top_pct: 25,
            mode: SelectionMode::Raw {
                strategy: StrategySpec::reversal(10),
            },
            ..model_config()
        };
        let report = Backtest::new(config).run(&panel).unwrap();

        for portfolio in &report.portfolios {
            assert_eq!(portfolio.holdings.len(), 1);
            let pos = panel
                .dates()
                .iter()
                .position(|&d| d == portfolio.date)
                .unwrap();
            let scores = trailing_returns(&panel, StrategySpec::reversal(10), pos).unwrap();
            let worst = scores
                .iter()
                .enumerate()
                .min_by(|a, b| a.1.total_cmp(b.1))
                .unwrap()
                .0;
            assert_eq!(portfolio.holdings[0].ticker, panel.tickers()[worst]);
        }
    }

    fn dividend_panel() -> PricePanel {
        let start = Date::from_ymd_opt(2023, 1, 2).unwrap();
        let dates = (0..68).map(|i| start + Days::new(i)).collect::<Vec<_>>();
        let n = dates.len();
        let mut dividends = vec![0.0; n];
        dividends[7] = 0.50; // before the first rebalance, never collected
        dividends[39] = 0.68;
        dividends[58] = 0.68;
        PricePanel::new(
            vec!["DIV".to_string()],
            dates,
            vec![vec![50.0; n]],
            vec![dividends],
        )
        .unwrap()
    }

    #[test]
    fn test_dividends_accrue_only_while_positioned() {
        let panel = dividend_panel();
        let config = BacktestConfig {
            begin: Date::from_ymd_opt(2023, 1, 15).unwrap(),
            end: None,
            initial_aum: 10_000.0,
            top_pct: 100,
            mode: SelectionMode::Raw {
                strategy: StrategySpec::reversal(3),
            },
        };
        let report = Backtest::new(config).run(&panel).unwrap();

        // 200 shares at a flat 50: AUM never moves, the two post-entry
        // payouts of 0.68 are worth 136 each.
        let last = report.performance.last().unwrap();
        assert_relative_eq!(last.aum, 10_000.0, max_relative = 1e-12);
        assert_relative_eq!(last.dividends, 272.0, max_relative = 1e-12);
        assert_relative_eq!(report.performance[0].dividends, 0.0);
    }

    #[test]
    fn test_window_without_month_end_fails() {
        let panel = dividend_panel();
        let config = BacktestConfig {
            begin: Date::from_ymd_opt(2024, 1, 1).unwrap(),
            ..model_config()
        };
        let err = Backtest::new(config).run(&panel).unwrap_err();
        assert!(matches!(err, LevanteError::InsufficientHistory(_)));
    }

    #[test]
    fn test_model_mode_needs_two_month_ends() {
        let panel = dividend_panel();
        let config = BacktestConfig {
            begin: Date::from_ymd_opt(2023, 3, 1).unwrap(),
            end: None,
            initial_aum: 10_000.0,
            top_pct: 100,
            mode: SelectionMode::Model {
                strategies: [StrategySpec::momentum(5), StrategySpec::reversal(3)],
            },
        };
        let err = Backtest::new(config).run(&panel).unwrap_err();
        assert!(matches!(err, LevanteError::InsufficientHistory(_)));
    }

    #[test]
    fn test_single_month_end_still_runs_raw() {
        let panel = dividend_panel();
        let config = BacktestConfig {
            begin: Date::from_ymd_opt(2023, 3, 1).unwrap(),
            end: None,
            initial_aum: 10_000.0,
            top_pct: 100,
            mode: SelectionMode::Raw {
                strategy: StrategySpec::reversal(3),
            },
        };
        let report = Backtest::new(config).run(&panel).unwrap();
        assert_eq!(report.portfolios.len(), 1);
        assert!(report.monthly_ic.is_empty());
        assert_eq!(
            report.performance[0].date,
            Date::from_ymd_opt(2023, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_begin_after_window_end_fails() {
        let panel = dividend_panel();
        let config = BacktestConfig {
            begin: Date::from_ymd_opt(2023, 3, 5).unwrap(),
            end: Some(Date::from_ymd_opt(2023, 2, 28).unwrap()),
            initial_aum: 10_000.0,
            top_pct: 100,
            mode: SelectionMode::Raw {
                strategy: StrategySpec::reversal(3),
            },
        };
        let err = Backtest::new(config).run(&panel).unwrap_err();
        assert!(matches!(err, LevanteError::InsufficientHistory(_)));
    }

    #[test]
    fn test_zero_top_pct_aborts_with_empty_selection() {
        let panel = dividend_panel();
        let config = BacktestConfig {
            begin: Date::from_ymd_opt(2023, 1, 15).unwrap(),
            end: None,
            initial_aum: 10_000.0,
            top_pct: 0,
            mode: SelectionMode::Raw {
                strategy: StrategySpec::reversal(3),
            },
        };
        let err = Backtest::new(config).run(&panel).unwrap_err();
        assert!(matches!(err, LevanteError::EmptySelection(_)));
    }

    #[test]
    fn test_default_config() {
        let config = BacktestConfig::default();
        assert_eq!(config.top_pct, 50);
        assert_relative_eq!(config.initial_aum, 10_000.0);
        assert!(config.end.is_none());
        match config.mode {
            SelectionMode::Model { strategies } => {
                assert_eq!(strategies[0], StrategySpec::momentum(50));
                assert_eq!(strategies[1], StrategySpec::reversal(5));
            }
            SelectionMode::Raw { .. } => panic!("default mode should be model-driven"),
        }
    }
}
