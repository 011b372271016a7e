//! Batch gradient-descent linear regression.
//!
//! - `gradient_descent`: prediction, the half mean squared error cost and the
//!   fixed-iteration optimizer.
//! - `Regressor`: owns the train/test split, the frozen normalization
//!   parameters and the fitted coefficients.
//!
//! # Examples
//!
//! ```rust
//! use linreg_gd::{GradientDescent, Matrix, compute_cost, prepare_feature};
//! use ndarray::array;
//!
//! let x = prepare_feature(&array![[-1.0], [0.0], [1.0]]);
//! let y = array![[1.0], [3.0], [5.0]];
//!
//! let (beta, history) = GradientDescent::new()
//!     .num_iterations(2_000)
//!     .learning_rate(0.1)
//!     .run(&x, &y, Matrix::zeros((2, 1)))
//!     .unwrap();
//! assert!(compute_cost(&x, &y, &beta).unwrap() < history[0]);
//! ```

mod gradient_descent;
mod regressor;

pub use gradient_descent::{GradientDescent, compute_cost, gradient_descent, predict, predict_raw};
pub use regressor::{FitState, Regressor, RegressorConfig, Score};
