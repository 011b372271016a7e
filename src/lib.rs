//! Linear regression fitted by fixed-iteration batch gradient descent.
//!
//! The pipeline is: split a named-column [`Dataset`] into train/test tables,
//! z-score the training features, prepend an intercept column, run gradient
//! descent from a zero coefficient vector, then score on the held-out rows
//! using the normalization parameters frozen at training time.
//!
//! ```rust
//! use linreg_gd::{Dataset, GradientDescent, Regressor, RegressorConfig};
//!
//! let x: Vec<f64> = (1..=10).map(f64::from).collect();
//! let y: Vec<f64> = x.iter().map(|v| 3.0 * v + 2.0).collect();
//! let df = Dataset::from_columns(vec![("x", x), ("y", y)]).unwrap();
//!
//! let config = RegressorConfig::default().test_fraction(0.2).random_seed(42);
//! let mut model = Regressor::new(&df, &["x"], &["y"], config).unwrap();
//! let (beta, history) = model.fit(&GradientDescent::default()).unwrap();
//! assert_eq!(beta.shape(), &[2, 1]);
//! assert_eq!(history.len(), 10_000);
//!
//! let score = model.score().unwrap();
//! assert!(score.r2 > 0.99);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod dataset;
pub mod error;
pub mod linear_model;
pub mod metrics;
pub mod preprocessing;

pub use dataset::{Dataset, Split, features_targets, train_test_split};
pub use error::{LinRegError, Result};
pub use linear_model::{
    FitState, GradientDescent, Regressor, RegressorConfig, Score, compute_cost, gradient_descent,
    predict, predict_raw,
};
pub use preprocessing::{ZScoreParams, normalize_z, prepare_feature};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let vec = Vector::zeros(5);
        let mat = Matrix::zeros((3, 4));
        assert_eq!(vec.len(), 5);
        assert_eq!(mat.shape(), &[3, 4]);
    }
}
