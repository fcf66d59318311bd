//! Raw momentum backtest over a synthetic five-stock universe.
//!
//! This example demonstrates:
//! - Building a synthetic price panel with per-stock drift and dividends
//! - Running a monthly-rebalanced walk-forward backtest on a raw signal
//! - Computing summary statistics (returns, Sharpe, AUM path)
//! - Reading the monthly information-coefficient series

use levante::data::{synthetic_panel, SyntheticSeries};
use levante::eval::MonthlyIc;
use levante::{Backtest, BacktestConfig, Date, SelectionMode, StrategySpec, SummaryStats};

/// Simulated price history period.
const HISTORY_BEGIN: &str = "2022-01-03";
const HISTORY_END: &str = "2023-12-29";

/// First date the reported performance may start on.
const BACKTEST_BEGIN: &str = "2022-08-01";

/// Momentum lookback in trading days.
const MOMENTUM_DAYS: usize = 50;

/// Percentage of the universe bought at each rebalance.
const TOP_PCT: usize = 40;

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

    // Five stocks with distinct trends so the momentum ranking has
    // something to find. GROW pays a small quarterly dividend.
    let mut grow = SyntheticSeries::new("GROW", 120.0);
    grow.drift = 0.35;
    grow.dividends = vec![
        (Date::from_ymd_opt(2022, 3, 31).ok_or("bad date")?, 0.40),
        (Date::from_ymd_opt(2022, 6, 30).ok_or("bad date")?, 0.40),
        (Date::from_ymd_opt(2022, 9, 30).ok_or("bad date")?, 0.45),
        (Date::from_ymd_opt(2023, 3, 31).ok_or("bad date")?, 0.45),
    ];
    let mut rise = SyntheticSeries::new("RISE", 80.0);
    rise.drift = 0.15;
    rise.oscillation = 2.0;
    let mut flat = SyntheticSeries::new("FLAT", 60.0);
    flat.drift = 0.01;
    flat.oscillation = 1.5;
    let mut slip = SyntheticSeries::new("SLIP", 90.0);
    slip.drift = -0.05;
    let mut fall = SyntheticSeries::new("FALL", 150.0);
    fall.drift = -0.20;

    let panel = synthetic_panel(history_begin, history_end, &[grow, rise, flat, slip, fall])?;

    let config = BacktestConfig {
        begin: backtest_begin,
        end: None,
        initial_aum: INITIAL_AUM,
        top_pct: TOP_PCT,
        mode: SelectionMode::Raw {
            strategy: StrategySpec::momentum(MOMENTUM_DAYS),
        },
    };
    let report = Backtest::new(config).run(&panel)?;
    let stats = SummaryStats::from_performance(&report.performance, INITIAL_AUM)?;

    print_results(&stats, report.portfolios.len(), panel.n_tickers());
    print_monthly_ic(&report.monthly_ic);

    Ok(())
}

/// Print performance results.
fn print_results(stats: &SummaryStats, rebalances: usize, universe: usize) {
    println!("\nMomentum Strategy ({MOMENTUM_DAYS}d)");
    println!("══════════════════════");
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
    println!("  Dividends:         {:.2}", stats.final_dividends);
}

/// Print the information-coefficient series, one row per holding month.
fn print_monthly_ic(series: &[MonthlyIc]) {
    if series.is_empty() {
        return;
    }
    println!();
    println!("Monthly IC:");
    for row in series {
        println!("  {}  ic = {:+.4}  cum = {:+.4}", row.date, row.ic, row.cumulative);
    }
}
