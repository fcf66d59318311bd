//! Backtest command implementation.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use levante_data::{ic_frame, load_panel, model_frame, performance_frame, write_frame};
use levante_eval::{Backtest, BacktestConfig, BacktestReport, SelectionMode, SummaryStats};
use levante_traits::{StrategyKind, StrategySpec};

use crate::data;

/// Parameters for the backtest command.
pub(crate) struct BacktestRequest {
    pub tickers: Vec<String>,
    pub data_dir: PathBuf,
    pub begin: String,
    pub end: Option<String>,
    pub aum: f64,
    pub strategy: String,
    pub days: u16,
    pub second_strategy: String,
    pub second_days: u16,
    pub top_pct: u16,
    pub model: bool,
    pub format: String,
    pub output_dir: Option<PathBuf>,
}

/// Run a walk-forward backtest over on-disk price histories.
pub(crate) fn run_backtest(request: BacktestRequest) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Walk-Forward Backtest                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    data::validate_tickers(&request.tickers)?;
    let begin = data::parse_date(&request.begin)?;
    let end = request.end.as_deref().map(data::parse_date).transpose()?;
    if let Some(end) = end
        && end <= begin
    {
        bail!("end date {end} must fall after begin date {begin}");
    }
    if request.aum <= 0.0 {
        bail!("initial AUM must be positive, got {}", request.aum);
    }

    let first: StrategyKind = request.strategy.parse()?;
    let first_spec = StrategySpec::new(first, usize::from(request.days));
    let mode = if request.model {
        let second: StrategyKind = request.second_strategy.parse()?;
        let second_spec = StrategySpec::new(second, usize::from(request.second_days));
        SelectionMode::Model {
            strategies: [first_spec, second_spec],
        }
    } else {
        SelectionMode::Raw {
            strategy: first_spec,
        }
    };

    println!("Tickers:  {}", request.tickers.join(", "));
    match end {
        Some(end) => println!("Period:   {} to {}", begin, end),
        None => println!("Period:   {} to latest on file", begin),
    }
    println!("AUM:      {:.2}", request.aum);
    println!("Mode:     {}", describe_mode(&mode));
    println!("Top pct:  {}%", request.top_pct);
    println!();

    println!(
        "Loading price histories from {}...",
        request.data_dir.display()
    );
    let panel = load_panel(&request.data_dir, &request.tickers)?;
    println!(
        "Loaded {} trading days for {} tickers",
        panel.n_days(),
        panel.n_tickers()
    );
    println!();

    let config = BacktestConfig {
        begin,
        end,
        initial_aum: request.aum,
        top_pct: usize::from(request.top_pct),
        mode,
    };
    let report = Backtest::new(config).run(&panel)?;
    let stats = SummaryStats::from_performance(&report.performance, request.aum)?;

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("BACKTEST RESULTS");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    if request.format == "json" {
        print_json(&report, &stats)?;
    } else {
        print_text(&report, &stats);
    }

    if let Some(dir) = &request.output_dir {
        export_report(&report, dir)?;
    }

    Ok(())
}

fn describe_mode(mode: &SelectionMode) -> String {
    match mode {
        SelectionMode::Raw { strategy } => format!("raw {strategy}"),
        SelectionMode::Model { strategies } => {
            format!("model on {} and {}", strategies[0], strategies[1])
        }
    }
}

fn print_text(report: &BacktestReport, stats: &SummaryStats) {
    println!("Summary Statistics:");
    println!("  Begin Date:                {}", stats.begin_date);
    println!("  End Date:                  {}", stats.end_date);
    println!("  Number of Days:            {}", stats.calendar_days);
    println!(
        "  Total Stock Return:        {:>12.3}%",
        stats.total_stock_return * 100.0
    );
    println!(
        "  Total Return:              {:>12.3}%",
        stats.total_return * 100.0
    );
    println!(
        "  Annualized Rate of Return: {:>12.3}%",
        stats.annualized_return * 100.0
    );
    println!("  Initial AUM:               {:>12.2}", stats.initial_aum);
    println!("  Final AUM:                 {:>12.2}", stats.final_aum);
    println!(
        "  Average Daily AUM:         {:>12.2}",
        stats.average_daily_aum
    );
    println!(
        "  Maximum Daily AUM:         {:>12.2}",
        stats.maximum_daily_aum
    );
    println!("  Profit and Loss:           {:>12.2}", stats.profit_loss);
    println!(
        "  Average Daily Return:      {:>12.5}%",
        stats.average_daily_return * 100.0
    );
    println!(
        "  Daily Standard Deviation:  {:>12.5}%",
        stats.daily_std_deviation * 100.0
    );
    println!("  Daily Sharpe Ratio:        {:>12.5}", stats.daily_sharpe);
    println!();

    if let Some(last) = report.portfolios.last() {
        println!("Final Holdings ({}):", last.date);
        for holding in &last.holdings {
            println!("  {:<6} {:>14.4} shares", holding.ticker, holding.quantity);
        }
        println!();
    }

    if !report.monthly_ic.is_empty() {
        println!("Monthly Information Coefficient:");
        println!("  {:<12} {:>8} {:>12}", "Date", "IC", "Cumulative");
        for row in &report.monthly_ic {
            println!(
                "  {:<12} {:>8.3} {:>12.3}",
                row.date.to_string(),
                row.ic,
                row.cumulative
            );
        }
        println!();
    }

    if !report.model_log.is_empty() {
        println!("Model Coefficient Path:");
        for record in &report.model_log {
            println!(
                "  {}  beta = [{}]  t = [{}]  n = {}",
                record.date,
                join_values(&record.coefficients),
                join_values(&record.t_values),
                record.n_obs
            );
        }
        println!();
    }
}

fn join_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.4}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_json(report: &BacktestReport, stats: &SummaryStats) -> Result<()> {
    let payload = serde_json::json!({
        "summary": stats,
        "monthly_ic": report.monthly_ic,
        "model_log": report.model_log,
        "portfolios": report.portfolios,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn export_report(report: &BacktestReport, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create output directory {}", dir.display()))?;

    let mut performance = performance_frame(&report.performance)?;
    write_frame(&mut performance, &dir.join("performance.csv"))?;
    let mut ic = ic_frame(&report.monthly_ic)?;
    write_frame(&mut ic, &dir.join("monthly_ic.csv"))?;
    if !report.model_log.is_empty() {
        let mut model = model_frame(&report.model_log)?;
        write_frame(&mut model, &dir.join("model.csv"))?;
    }

    println!("Wrote report CSVs to {}", dir.display());
    Ok(())
}
