//! Levante CLI binary.
//!
//! Provides the command-line interface for the Levante backtest engine.

mod cmd;
mod data;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cmd::backtest::BacktestRequest;
use crate::cmd::rank::RankRequest;

#[derive(Parser)]
#[command(name = "levante")]
#[command(about = "Walk-forward backtest engine for monthly-rebalanced equity strategies", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a walk-forward backtest
    Backtest {
        /// Ticker symbol(s), comma separated
        #[arg(value_delimiter = ',', required = true)]
        tickers: Vec<String>,

        /// Directory holding one <TICKER>.csv history per name
        #[arg(long, value_name = "DIR")]
        data_dir: PathBuf,

        /// Backtest start date (YYYY-MM-DD or YYYYMMDD)
        #[arg(short, long)]
        begin: String,

        /// Backtest end date (defaults to the last day on file)
        #[arg(short, long)]
        end: Option<String>,

        /// Initial assets under management
        #[arg(long, default_value = "10000")]
        aum: f64,

        /// Strategy family: M (momentum) or R (reversal)
        #[arg(short, long, default_value = "M")]
        strategy: String,

        /// Lookback window in trading days
        #[arg(short, long, default_value = "50", value_parser = clap::value_parser!(u16).range(1..=250))]
        days: u16,

        /// Second strategy family, used by the model variant
        #[arg(long, default_value = "R")]
        second_strategy: String,

        /// Second lookback window, used by the model variant
        #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=250))]
        second_days: u16,

        /// Percentage of the ranking to buy (1-100)
        #[arg(short, long, default_value = "50", value_parser = clap::value_parser!(u16).range(1..=100))]
        top_pct: u16,

        /// Rank by fitted model predictions instead of the raw signal
        #[arg(long)]
        model: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Directory to write performance, IC and model CSVs into
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Rank a universe by signal at one month end
    Rank {
        /// Ticker symbol(s), comma separated
        #[arg(value_delimiter = ',', required = true)]
        tickers: Vec<String>,

        /// Directory holding one <TICKER>.csv history per name
        #[arg(long, value_name = "DIR")]
        data_dir: PathBuf,

        /// Month end to rank at (defaults to the last month end on file)
        #[arg(long)]
        date: Option<String>,

        /// Strategy family: M (momentum) or R (reversal)
        #[arg(short, long, default_value = "M")]
        strategy: String,

        /// Lookback window in trading days
        #[arg(short, long, default_value = "50", value_parser = clap::value_parser!(u16).range(1..=250))]
        days: u16,

        /// Percentage of the ranking to buy (1-100)
        #[arg(short, long, default_value = "50", value_parser = clap::value_parser!(u16).range(1..=100))]
        top_pct: u16,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Backtest {
            tickers,
            data_dir,
            begin,
            end,
            aum,
            strategy,
            days,
            second_strategy,
            second_days,
            top_pct,
            model,
            format,
            output_dir,
        } => cmd::backtest::run_backtest(BacktestRequest {
            tickers,
            data_dir,
            begin,
            end,
            aum,
            strategy,
            days,
            second_strategy,
            second_days,
            top_pct,
            model,
            format,
            output_dir,
        }),
        Commands::Rank {
            tickers,
            data_dir,
            date,
            strategy,
            days,
            top_pct,
        } => cmd::rank::run_rank(RankRequest {
            tickers,
            data_dir,
            date,
            strategy,
            days,
            top_pct,
        }),
    }
}
