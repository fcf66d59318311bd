//! Return-model seam: fit coefficients on training rows, score features.
//!
//! The backtest orchestrator only ever talks to this trait, so any
//! ordinary-least-squares implementation (closed-form normal equations, QR,
//! an external linear-algebra routine) can be substituted without touching
//! the simulation loop.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::Result;

/// A fitted linear model snapshot.
///
/// Produced by [`ReturnModel::fit`], consumed by prediction and archived in
/// the model audit log. Snapshots are never mutated after creation.
#[derive(Debug, Clone)]
pub struct ModelFit {
    /// One coefficient per feature column, in column order.
    pub coefficients: Array1<f64>,
    /// Per-coefficient t-statistics; NaN when residual degrees of freedom
    /// are zero or a standard error vanishes.
    pub t_values: Array1<f64>,
    /// Number of training rows the fit consumed.
    pub n_obs: usize,
}

impl ModelFit {
    /// Number of feature columns this fit expects.
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Scores a feature matrix: one row per stock, one column per feature.
    ///
    /// Returns one predicted return per row.
    ///
    /// # Panics
    ///
    /// Panics if the feature matrix width differs from the coefficient
    /// count.
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Array1<f64> {
        features.dot(&self.coefficients)
    }
}

/// A model that maps accumulated training rows to return predictions.
///
/// # Example
///
/// ```
/// use levante_traits::{ModelFit, Result, ReturnModel};
/// use ndarray::{Array1, ArrayView1, ArrayView2, array};
///
/// /// Predicts zero for everything; useful as a null baseline.
/// struct ZeroModel;
///
/// impl ReturnModel for ZeroModel {
///     fn fit(&self, features: ArrayView2<'_, f64>, _labels: ArrayView1<'_, f64>) -> Result<ModelFit> {
///         let k = features.ncols();
///         Ok(ModelFit {
///             coefficients: Array1::zeros(k),
///             t_values: Array1::from_elem(k, f64::NAN),
///             n_obs: features.nrows(),
///         })
///     }
/// }
///
/// let x = array![[1.0, 2.0], [3.0, 4.0]];
/// let y = array![0.5, -0.5];
/// let fit = ZeroModel.fit(x.view(), y.view()).unwrap();
/// assert_eq!(ZeroModel.predict(&fit, x.view()), array![0.0, 0.0]);
/// ```
pub trait ReturnModel: Send + Sync {
    /// Fits the model on a design matrix (one row per training observation,
    /// one column per feature) and its realized labels.
    ///
    /// # Errors
    ///
    /// Returns an error when the training data cannot support a fit, e.g.
    /// fewer rows than features or a rank-deficient design.
    fn fit(&self, features: ArrayView2<'_, f64>, labels: ArrayView1<'_, f64>) -> Result<ModelFit>;

    /// Scores current-period features with an existing fit.
    ///
    /// The default forwards to [`ModelFit::predict`].
    fn predict(&self, fit: &ModelFit, features: ArrayView2<'_, f64>) -> Array1<f64> {
        fit.predict(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_predict_is_dot_product() {
        let fit = ModelFit {
            coefficients: array![0.5, -1.0],
            t_values: array![f64::NAN, f64::NAN],
            n_obs: 4,
        };
        let features = array![[1.0, 2.0], [3.0, 4.0]];
        let scores = fit.predict(features.view());
        assert_eq!(scores, array![-1.5, -2.5]);
        assert_eq!(fit.n_features(), 2);
    }

    #[test]
    fn test_trait_object_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ReturnModel>();
    }
}
