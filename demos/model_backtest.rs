//! Walk-forward model backtest combining momentum and reversal features.
//!
//! This example demonstrates:
//! - Building a synthetic price panel with mixed trend and swing stocks
//! - Growing a training table month by month and refitting a linear model
//!   at each rebalance
//! - Ranking the universe on predicted returns, lowest first
//! - Reading the model's coefficient path out of the run report

use levante::data::{synthetic_panel, SyntheticSeries};
use levante::model::ModelRecord;
use levante::{Backtest, BacktestConfig, Date, SelectionMode, StrategySpec, SummaryStats};

/// Simulated price history period.
const HISTORY_BEGIN: &str = "2021-01-04";
const HISTORY_END: &str = "2023-12-29";

/// First date the reported performance may start on.
const BACKTEST_BEGIN: &str = "2022-01-01";

/// Feature lookbacks in trading days.
const MOMENTUM_DAYS: usize = 50;
const REVERSAL_DAYS: usize = 5;

/// Percentage of the universe bought at each rebalance.
const TOP_PCT: usize = 50;

/// Starting assets under management.
const INITIAL_AUM: f64 = 10_000.0;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let history_begin = Date::parse_from_str(HISTORY_BEGIN, "%Y-%m-%d")?;
    let history_end = Date::parse_from_str(HISTORY_END, "%Y-%m-%d")?;
    let backtest_begin = Date::parse_from_str(BACKTEST_BEGIN, "%Y-%m-%d")?;

    // Trending names separate the momentum feature, swinging names the
    // short reversal feature, so both regression columns carry signal.
    let mut bull = SyntheticSeries::new("BULL", 100.0);
    bull.drift = 0.22;
    let mut bear = SyntheticSeries::new("BEAR", 140.0);
    bear.drift = -0.12;
    let mut wave = SyntheticSeries::new("WAVE", 70.0);
    wave.oscillation = 5.0;
    wave.period = 34.0;
    let mut chop = SyntheticSeries::new("CHOP", 55.0);
    chop.drift = 0.03;
    chop.oscillation = 3.0;
    chop.period = 13.0;
    let mut calm = SyntheticSeries::new("CALM", 95.0);
    calm.drift = 0.05;

    let panel = synthetic_panel(history_begin, history_end, &[bull, bear, wave, chop, calm])?;

    let config = BacktestConfig {
        begin: backtest_begin,
        end: None,
        initial_aum: INITIAL_AUM,
        top_pct: TOP_PCT,
        mode: SelectionMode::Model {
            strategies: [
                StrategySpec::momentum(MOMENTUM_DAYS),
                StrategySpec::reversal(REVERSAL_DAYS),
            ],
        },
    };
    let report = Backtest::new(config).run(&panel)?;
    let stats = SummaryStats::from_performance(&report.performance, INITIAL_AUM)?;

    print_results(&stats, report.portfolios.len(), panel.n_tickers());
    print_coefficient_path(&report.model_log);

    Ok(())
}

/// Print performance results.
fn print_results(stats: &SummaryStats, rebalances: usize, universe: usize) {
    println!("\nModel Strategy (momentum/{MOMENTUM_DAYS} + reversal/{REVERSAL_DAYS})");
    println!("════════════════════════════════════════════");
    println!("Period:     {} to {}", stats.begin_date, stats.end_date);
    println!("Universe:   {universe} stocks");
    println!("Rebalances: {rebalances}");
    println!();
    println!("Performance:");
    println!("  Total Return:      {:+.2}%", stats.total_return * 100.0);
    println!(
        "  Annualized Return: {:+.2}%",
        stats.annualized_return * 100.0
    );
    println!("  Daily Sharpe:      {:.2}", stats.daily_sharpe);
    println!("  Final AUM:         {:.2}", stats.final_aum);
}

/// Print one line per refit: coefficients, t-statistics, sample size.
fn print_coefficient_path(log: &[ModelRecord]) {
    if log.is_empty() {
        return;
    }
    println!();
    println!("Coefficient path:");
    for record in log {
        let betas: Vec<String> = record.coefficients.iter().map(|c| format!("{c:+.4}")).collect();
        let tvals: Vec<String> = record.t_values.iter().map(|t| format!("{t:+.2}")).collect();
        println!(
            "  {}  beta = [{}]  t = [{}]  n = {}",
            record.date,
            betas.join(", "),
            tvals.join(", "),
            record.n_obs
        );
    }
}
