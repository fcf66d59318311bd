//! Serializable audit log entries for fitted models.

use levante_traits::{Date, ModelFit};
use serde::{Deserialize, Serialize};

/// Snapshot of one fitted model, dated at the rebalance that produced it.
///
/// The orchestrator appends one record per rebalance in call order, so the
/// log reads as the model's coefficient path through the backtest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Rebalance date the fit was produced at.
    pub date: Date,
    /// Fitted coefficients, one per feature column.
    pub coefficients: Vec<f64>,
    /// Coefficient t-statistics; NaN when the fit has no residual
    /// degrees of freedom.
    pub t_values: Vec<f64>,
    /// Number of training observations behind the fit.
    pub n_obs: usize,
}

impl ModelRecord {
    /// Captures a fit into a dated record.
    #[must_use]
    pub fn from_fit(date: Date, fit: &ModelFit) -> Self {
        Self {
            date,
            coefficients: fit.coefficients.to_vec(),
            t_values: fit.t_values.to_vec(),
            n_obs: fit.n_obs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_fit_copies_every_field() {
        let fit = ModelFit {
            coefficients: array![0.25, -0.5],
            t_values: array![1.5, -2.5],
            n_obs: 8,
        };
        let date = Date::from_ymd_opt(2023, 3, 31).unwrap();
        let record = ModelRecord::from_fit(date, &fit);
        assert_eq!(record.date, date);
        assert_eq!(record.coefficients, vec![0.25, -0.5]);
        assert_eq!(record.t_values, vec![1.5, -2.5]);
        assert_eq!(record.n_obs, 8);
    }

    #[test]
    fn test_serializes_with_iso_date() {
        let record = ModelRecord {
            date: Date::from_ymd_opt(2023, 1, 31).unwrap(),
            coefficients: vec![1.0],
            t_values: vec![f64::NAN],
            n_obs: 4,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"2023-01-31\""));
        assert!(json.contains("null"));
    }
}
