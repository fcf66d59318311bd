//! Ordinary least-squares return model.

use levante_traits::stats::MIN_STD_THRESHOLD;
use levante_traits::{LevanteError, ModelFit, Result, ReturnModel};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

/// Pivots below this magnitude mark the normal equations as singular.
const DET_EPSILON: f64 = 1e-12;

/// Closed-form no-intercept linear regression.
///
/// Fits `label = features · beta` by solving the normal equations
/// `(XᵀX) beta = Xᵀy` with Gauss-Jordan elimination and partial pivoting.
/// The inverse of `XᵀX` also yields per-coefficient standard errors, so
/// each fit carries t-statistics alongside the coefficients.
///
/// There is no intercept column: features and labels are both percentage
/// returns centred on zero by construction, matching the engine's signal
/// definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastSquares;

impl LeastSquares {
    /// Creates the model.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReturnModel for LeastSquares {
    fn fit(&self, features: ArrayView2<'_, f64>, labels: ArrayView1<'_, f64>) -> Result<ModelFit> {
        let n = features.nrows();
        let k = features.ncols();
        if k == 0 {
            return Err(LevanteError::DegenerateFit(
                "design matrix has no feature columns".to_string(),
            ));
        }
        if n < k {
            return Err(LevanteError::DegenerateFit(format!(
                "{n} observations cannot determine {k} coefficients"
            )));
        }
        if labels.len() != n {
            return Err(LevanteError::InvalidData(format!(
                "{} labels for {n} observations",
                labels.len()
            )));
        }

        let xtx = features.t().dot(&features);
        let xty = features.t().dot(&labels);
        let inverse = gauss_jordan_inverse(&xtx)?;
        let coefficients: Array1<f64> = inverse.dot(&xty);

        let residuals = &labels - &features.dot(&coefficients);
        let rss = residuals.iter().map(|r| r * r).sum::<f64>();
        let dof = n - k;
        let sigma2 = if dof > 0 { rss / dof as f64 } else { f64::NAN };

        let t_values = coefficients
            .iter()
            .enumerate()
            .map(|(j, &beta)| {
                let se = (sigma2 * inverse[[j, j]]).sqrt();
                if se.is_finite() && se >= MIN_STD_THRESHOLD {
                    beta / se
                } else {
                    f64::NAN
                }
            })
            .collect();

        Ok(ModelFit {
            coefficients,
            t_values,
            n_obs: n,
        })
    }
}

/// Inverts a square matrix, failing on near-singular input.
fn gauss_jordan_inverse(matrix: &Array2<f64>) -> Result<Array2<f64>> {
    let k = matrix.nrows();
    let mut work = Array2::zeros((k, 2 * k));
    work.slice_mut(s![.., ..k]).assign(matrix);
    for j in 0..k {
        work[[j, k + j]] = 1.0;
    }

    for col in 0..k {
        let mut pivot_row = col;
        for row in (col + 1)..k {
            if work[[row, col]].abs() > work[[pivot_row, col]].abs() {
                pivot_row = row;
            }
        }
        if pivot_row != col {
            for j in 0..2 * k {
                work.swap([col, j], [pivot_row, j]);
            }
        }

        let pivot = work[[col, col]];
        if pivot.abs() < DET_EPSILON {
            return Err(LevanteError::DegenerateFit(
                "normal equations are singular, features are collinear or constant".to_string(),
            ));
        }
        for j in 0..2 * k {
            work[[col, j]] /= pivot;
        }
        for row in 0..k {
            if row == col {
                continue;
            }
            let factor = work[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * k {
                work[[row, j]] -= factor * work[[col, j]];
            }
        }
    }

    Ok(work.slice(s![.., k..]).to_owned())
}
