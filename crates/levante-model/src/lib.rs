//! Return prediction models for the levante backtest engine.
//!
//! This crate owns the supervised side of the walk-forward loop: the
//! append-only [`TrainingSet`] that grows by one cross-section per
//! rebalance, the closed-form [`LeastSquares`] regression that fits it,
//! and the [`ModelRecord`] audit log the orchestrator keeps of every fit.
//!
//! # Examples
//!
//! ```
//! use levante_model::LeastSquares;
//! use levante_traits::ReturnModel;
//! use ndarray::array;
//!
//! let x = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 1.0]];
//! let y = array![2.0, -3.0, -1.0, 1.0]; // exactly 2*f1 - 3*f2
//! let model = LeastSquares::new();
//! let fit = model.fit(x.view(), y.view()).unwrap();
//! assert!((fit.coefficients[0] - 2.0).abs() < 1e-9);
//! assert!((fit.coefficients[1] + 3.0).abs() < 1e-9);
//! ```

mod least_squares;
mod record;
mod training;

pub use least_squares::LeastSquares;
pub use record::ModelRecord;
pub use training::{TrainingRow, TrainingSet};
