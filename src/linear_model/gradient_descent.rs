use crate::preprocessing::{normalize_z, prepare_feature};
use crate::{LinRegError, Matrix, Result, Vector};
use tracing::debug;

/// Multiplies an augmented feature matrix by the coefficient matrix.
pub fn predict(x: &Matrix, beta: &Matrix) -> Result<Matrix> {
    if x.ncols() != beta.nrows() {
        return Err(LinRegError::shape("predict", &[x.ncols()], &[beta.nrows()]));
    }
    Ok(x.dot(beta))
}

/// Normalizes raw features with the given statistics, prepends the intercept
/// column and predicts. Training-time cost evaluation and test-time scoring
/// both go through this normalize, augment, multiply pipeline.
pub fn predict_raw(
    features: &Matrix,
    beta: &Matrix,
    means: Option<&Vector>,
    stds: Option<&Vector>,
) -> Result<Matrix> {
    let (normalized, _) = normalize_z(features, means, stds)?;
    predict(&prepare_feature(&normalized), beta)
}

/// `J = (1 / 2m) * sum(e^2)` with `e = X beta - y`. For a single target this
/// is `e^T e / 2m`.
pub fn compute_cost(x: &Matrix, y: &Matrix, beta: &Matrix) -> Result<f64> {
    check_shapes(x, y, beta)?;
    let error = x.dot(beta) - y;
    Ok(half_mean_squared(&error))
}

fn half_mean_squared(error: &Matrix) -> f64 {
    let m = error.nrows() as f64;
    error.mapv(|e| e * e).sum() / (2.0 * m)
}

fn check_shapes(x: &Matrix, y: &Matrix, beta: &Matrix) -> Result<()> {
    if x.ncols() != beta.nrows() {
        return Err(LinRegError::shape("predict", &[x.ncols()], &[beta.nrows()]));
    }
    if y.nrows() != x.nrows() || y.ncols() != beta.ncols() {
        return Err(LinRegError::shape(
            "targets",
            &[x.nrows(), beta.ncols()],
            y.shape(),
        ));
    }
    Ok(())
}

/// Fixed-iteration batch gradient descent settings.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientDescent {
    num_iterations: usize,
    learning_rate: f64,
}

impl GradientDescent {
    pub fn new() -> Self {
        Self {
            num_iterations: 10_000,
            learning_rate: 0.01,
        }
    }

    pub fn num_iterations(mut self, num_iterations: usize) -> Self {
        self.num_iterations = num_iterations;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn get_num_iterations(&self) -> usize {
        self.num_iterations
    }

    pub fn get_learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn run(&self, x: &Matrix, y: &Matrix, beta: Matrix) -> Result<(Matrix, Vector)> {
        gradient_descent(x, y, beta, self.learning_rate, self.num_iterations)
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs exactly `num_iterations` full-batch updates
/// `beta <- beta - (learning_rate / m) * X^T (X beta - y)`.
///
/// Entry `i` of the returned history is the cost of the coefficients going
/// into iteration `i`. There is no convergence check and no divergence guard:
/// a learning rate that is too large shows up as a growing or NaN history.
/// A zero-row `x` is rejected with [`LinRegError::EmptyData`].
pub fn gradient_descent(
    x: &Matrix,
    y: &Matrix,
    beta: Matrix,
    learning_rate: f64,
    num_iterations: usize,
) -> Result<(Matrix, Vector)> {
    check_shapes(x, y, &beta)?;
    if x.nrows() == 0 {
        return Err(LinRegError::EmptyData(
            "gradient descent needs at least one sample".to_string(),
        ));
    }

    let m = x.nrows() as f64;
    let step = learning_rate / m;
    let mut beta = beta;
    let mut history = Vec::with_capacity(num_iterations);

    debug!(
        n_samples = x.nrows(),
        n_params = x.ncols(),
        learning_rate,
        num_iterations,
        "starting gradient descent"
    );

    for _ in 0..num_iterations {
        let error = x.dot(&beta) - y;
        history.push(half_mean_squared(&error));
        let gradient = x.t().dot(&error);
        beta = &beta - &(gradient * step);
    }

    debug!(
        initial_cost = ?history.first(),
        final_cost = ?history.last(),
        "finished gradient descent"
    );

    Ok((beta, Vector::from(history)))
}
