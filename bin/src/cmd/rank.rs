//! Rank command implementation.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use levante_data::load_panel;
use levante_eval::{select_top, selection_count};
use levante_signals::trailing_returns;
use levante_traits::{PricePanel, StrategyKind, StrategySpec};

use crate::data;

/// Parameters for the rank command.
pub(crate) struct RankRequest {
    pub tickers: Vec<String>,
    pub data_dir: PathBuf,
    pub date: Option<String>,
    pub strategy: String,
    pub days: u16,
    pub top_pct: u16,
}

/// Rank a universe by its trailing-return signal at one month end.
pub(crate) fn run_rank(request: RankRequest) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                        Signal Ranking                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    data::validate_tickers(&request.tickers)?;
    let kind: StrategyKind = request.strategy.parse()?;
    let spec = StrategySpec::new(kind, usize::from(request.days));

    let panel = load_panel(&request.data_dir, &request.tickers)?;
    let pos = resolve_month_end(&panel, request.date.as_deref())?;

    let signals = trailing_returns(&panel, spec, pos)?;
    let order = select_top(&signals, spec.kind.direction(), 100);
    let held = selection_count(panel.n_tickers(), usize::from(request.top_pct));

    println!("Strategy: {}", spec);
    println!("Date:     {}", panel.date(pos));
    println!("Universe: {}", request.tickers.join(", "));
    println!();

    println!("  {:>4}  {:<6} {:>16} {:>6}", "Rank", "Ticker", "Signal", "Buy");
    for (rank, &idx) in order.iter().enumerate() {
        let marker = if rank < held { "yes" } else { "" };
        println!(
            "  {:>4}  {:<6} {:>15.3}% {:>6}",
            rank + 1,
            panel.tickers()[idx],
            signals[idx],
            marker
        );
    }
    println!();

    Ok(())
}

/// The month end the ranking is computed at: the given date's month end,
/// or the panel's last month end when no date is given.
fn resolve_month_end(panel: &PricePanel, date: Option<&str>) -> Result<usize> {
    match date {
        Some(raw) => {
            let date = data::parse_date(raw)?;
            let pos = panel
                .last_position_on_or_before(date)
                .ok_or_else(|| anyhow!("no trading day on or before {date}"))?;
            if panel.is_month_end(pos) {
                Ok(pos)
            } else {
                panel
                    .previous_month_end(pos)
                    .ok_or_else(|| anyhow!("no month end on or before {date}"))
            }
        }
        None => panel
            .month_end_positions()
            .last()
            .copied()
            .ok_or_else(|| anyhow!("price history spans less than one full month")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levante_data::weekday_calendar;
    use levante_traits::Date;
    use tempfile::TempDir;

    fn write_history(dir: &TempDir, ticker: &str, start_price: f64, end: Date) {
        let begin = Date::from_ymd_opt(2023, 1, 2).unwrap();
        let mut content = String::from("Date,Close,Dividends\n");
        for (i, date) in weekday_calendar(begin, end).iter().enumerate() {
            let close = start_price + i as f64;
            content.push_str(&format!("{date},{close},0.0\n"));
        }
        std::fs::write(dir.path().join(format!("{ticker}.csv")), content).unwrap();
    }

    fn sample_request(dir: &TempDir, date: Option<&str>) -> RankRequest {
        RankRequest {
            tickers: vec!["AAA".to_string(), "BBB".to_string()],
            data_dir: dir.path().to_path_buf(),
            date: date.map(str::to_string),
            strategy: "R".to_string(),
            days: 5,
            top_pct: 50,
        }
    }

    #[test]
    fn test_ranks_at_latest_month_end() {
        let dir = TempDir::new().unwrap();
        let end = Date::from_ymd_opt(2023, 4, 28).unwrap();
        write_history(&dir, "AAA", 100.0, end);
        write_history(&dir, "BBB", 50.0, end);

        run_rank(sample_request(&dir, None)).unwrap();
    }

    #[test]
    fn test_ranks_at_explicit_mid_month_date() {
        let dir = TempDir::new().unwrap();
        let end = Date::from_ymd_opt(2023, 4, 28).unwrap();
        write_history(&dir, "AAA", 100.0, end);
        write_history(&dir, "BBB", 50.0, end);

        // Mid-March resolves back to the February month end.
        run_rank(sample_request(&dir, Some("2023-03-15"))).unwrap();
    }

    #[test]
    fn test_rejects_history_without_a_month_end() {
        let dir = TempDir::new().unwrap();
        let end = Date::from_ymd_opt(2023, 1, 20).unwrap();
        write_history(&dir, "AAA", 100.0, end);
        write_history(&dir, "BBB", 50.0, end);

        assert!(run_rank(sample_request(&dir, None)).is_err());
    }

    #[test]
    fn test_rejects_date_before_first_month_end() {
        let dir = TempDir::new().unwrap();
        let end = Date::from_ymd_opt(2023, 4, 28).unwrap();
        write_history(&dir, "AAA", 100.0, end);
        write_history(&dir, "BBB", 50.0, end);

        assert!(run_rank(sample_request(&dir, Some("2023-01-15"))).is_err());
    }
}
