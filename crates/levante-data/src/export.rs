//! DataFrame views of backtest output.
//!
//! The engine's report types are plain vectors of rows; these helpers
//! lift them into polars frames for CSV export and tabular inspection.
//! Dates are rendered as ISO strings so the frames round-trip through
//! CSV without schema hints.

use std::path::Path;

use levante_eval::{MonthlyIc, PerformanceRow};
use levante_model::ModelRecord;
use polars::prelude::*;

use crate::Result;

/// Daily performance rows as a `datetime`/`aum`/`dividends` frame.
///
/// # Errors
///
/// Returns [`crate::DataError::Polars`] when frame assembly fails.
pub fn performance_frame(rows: &[PerformanceRow]) -> Result<DataFrame> {
    let dates: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();
    let aum: Vec<f64> = rows.iter().map(|r| r.aum).collect();
    let dividends: Vec<f64> = rows.iter().map(|r| r.dividends).collect();
    Ok(df! {
        "datetime" => dates,
        "aum" => aum,
        "dividends" => dividends,
    }?)
}

/// Monthly IC rows as a `datetime`/`ic`/`cumulative_ic` frame.
///
/// # Errors
///
/// Returns [`crate::DataError::Polars`] when frame assembly fails.
pub fn ic_frame(rows: &[MonthlyIc]) -> Result<DataFrame> {
    let dates: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();
    let ic: Vec<f64> = rows.iter().map(|r| r.ic).collect();
    let cumulative: Vec<f64> = rows.iter().map(|r| r.cumulative).collect();
    Ok(df! {
        "datetime" => dates,
        "ic" => ic,
        "cumulative_ic" => cumulative,
    }?)
}

/// Model fit records as a frame with one `coef_j`/`tstat_j` column pair
/// per feature plus `n_obs`.
///
/// # Errors
///
/// Returns [`crate::DataError::Polars`] when frame assembly fails.
pub fn model_frame(records: &[ModelRecord]) -> Result<DataFrame> {
    let width = records.first().map_or(0, |r| r.coefficients.len());
    let dates: Vec<String> = records.iter().map(|r| r.date.to_string()).collect();

    let mut columns = vec![Column::new("datetime".into(), dates)];
    for j in 0..width {
        let coefs: Vec<f64> = records.iter().map(|r| r.coefficients[j]).collect();
        columns.push(Column::new(format!("coef_{j}").into(), coefs));
    }
    for j in 0..width {
        let tstats: Vec<f64> = records.iter().map(|r| r.t_values[j]).collect();
        columns.push(Column::new(format!("tstat_{j}").into(), tstats));
    }
    let n_obs: Vec<i64> = records.iter().map(|r| r.n_obs as i64).collect();
    columns.push(Column::new("n_obs".into(), n_obs));

    Ok(DataFrame::new(columns)?)
}

/// Writes a frame to `path` as headered CSV.
///
/// # Errors
///
/// Returns [`crate::DataError::Polars`] when the file cannot be created
/// or written.
pub fn write_frame(frame: &mut DataFrame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(PolarsError::from)?;
    CsvWriter::new(file).finish(frame)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use levante_traits::Date;
    use tempfile::TempDir;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_performance() -> Vec<PerformanceRow> {
        vec![
            PerformanceRow {
                date: ymd(2023, 1, 30),
                aum: 10000.0,
                dividends: 0.0,
            },
            PerformanceRow {
                date: ymd(2023, 1, 31),
                aum: 10150.0,
                dividends: 12.5,
            },
        ]
    }

    #[test]
    fn test_performance_frame_shape_and_values() {
        let frame = performance_frame(&sample_performance()).unwrap();
        assert_eq!(frame.height(), 2);
        assert_eq!(
            frame.get_column_names_str(),
            vec!["datetime", "aum", "dividends"]
        );
        let dates = frame
            .column("datetime")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap();
        assert_eq!(dates.get(0), Some("2023-01-30"));
        let aum = frame
            .column("aum")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap();
        assert_eq!(aum.get(1), Some(10150.0));
    }

    #[test]
    fn test_ic_frame_columns() {
        let rows = vec![
            MonthlyIc {
                date: ymd(2023, 1, 31),
                ic: 0.2,
                cumulative: 0.2,
            },
            MonthlyIc {
                date: ymd(2023, 2, 28),
                ic: -0.6,
                cumulative: -0.4,
            },
        ];
        let frame = ic_frame(&rows).unwrap();
        assert_eq!(frame.height(), 2);
        assert_eq!(
            frame.get_column_names_str(),
            vec!["datetime", "ic", "cumulative_ic"]
        );
        let cumulative = frame
            .column("cumulative_ic")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap();
        assert_eq!(cumulative.get(1), Some(-0.4));
    }

    #[test]
    fn test_model_frame_widens_per_feature() {
        let records = vec![ModelRecord {
            date: ymd(2023, 3, 31),
            coefficients: vec![0.5, -0.25],
            t_values: vec![2.0, -1.0],
            n_obs: 40,
        }];
        let frame = model_frame(&records).unwrap();
        assert_eq!(frame.height(), 1);
        assert_eq!(
            frame.get_column_names_str(),
            vec!["datetime", "coef_0", "coef_1", "tstat_0", "tstat_1", "n_obs"]
        );
        let coef = frame
            .column("coef_1")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap();
        assert_eq!(coef.get(0), Some(-0.25));
    }

    #[test]
    fn test_model_frame_empty_records() {
        let frame = model_frame(&[]).unwrap();
        assert_eq!(frame.height(), 0);
        assert_eq!(frame.get_column_names_str(), vec!["datetime", "n_obs"]);
    }

    #[test]
    fn test_write_frame_emits_headered_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("performance.csv");
        let mut frame = performance_frame(&sample_performance()).unwrap();
        write_frame(&mut frame, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("datetime,aum,dividends"));
        assert!(written.contains("2023-01-31"));
    }
}
