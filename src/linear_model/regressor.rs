use super::gradient_descent::{GradientDescent, predict_raw};
use crate::dataset::{Split, features_targets, train_test_split, validate_test_fraction};
use crate::metrics::{mean_absolute_percentage_error, mean_squared_error, r2_score};
use crate::preprocessing::{ZScoreParams, prepare_feature};
use crate::{Dataset, Matrix, Result, Vector};
use tracing::{info, warn};

/// Construction-time options for [`Regressor`].
#[derive(Clone, Debug, PartialEq)]
pub struct RegressorConfig {
    test_fraction: f64,
    random_seed: Option<u64>,
}

impl RegressorConfig {
    pub fn new() -> Self {
        Self {
            test_fraction: 0.5,
            random_seed: Some(69),
        }
    }

    /// Fraction of rows held out for scoring, in `[0, 1)`.
    pub fn test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    pub fn random_seed(mut self, random_seed: u64) -> Self {
        self.random_seed = Some(random_seed);
        self
    }

    /// Seeds the split from OS entropy, so repeated constructions differ.
    pub fn unseeded(mut self) -> Self {
        self.random_seed = None;
        self
    }

    pub fn get_test_fraction(&self) -> f64 {
        self.test_fraction
    }

    pub fn get_random_seed(&self) -> Option<u64> {
        self.random_seed
    }
}

impl Default for RegressorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything fixed at construction: the split, the normalization
/// parameters and the normalized training features.
#[derive(Clone, Debug)]
struct TrainingSetup {
    config: RegressorConfig,
    split: Split,
    params: ZScoreParams,
    train_features: Matrix,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FitState {
    Constructed { beta: Matrix },
    Fitted { beta: Matrix, cost_history: Vector },
}

impl FitState {
    pub fn beta(&self) -> &Matrix {
        match self {
            FitState::Constructed { beta } | FitState::Fitted { beta, .. } => beta,
        }
    }

    pub fn cost_history(&self) -> Option<&Vector> {
        match self {
            FitState::Constructed { .. } => None,
            FitState::Fitted { cost_history, .. } => Some(cost_history),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Score {
    pub r2: f64,
    pub mse: f64,
    pub mape: f64,
}

impl Score {
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.r2, self.mse, self.mape)
    }
}

/// Linear regression over named dataset columns.
///
/// Construction splits the data and freezes the z-score parameters of the
/// training features. Every [`fit`](Regressor::fit) restarts from a zero
/// coefficient matrix; a previous fit is never used as a warm start.
#[derive(Clone, Debug)]
pub struct Regressor {
    setup: TrainingSetup,
    state: FitState,
}

impl Regressor {
    pub fn new<S: AsRef<str>, T: AsRef<str>>(
        dataset: &Dataset,
        feature_names: &[S],
        target_names: &[T],
        config: RegressorConfig,
    ) -> Result<Self> {
        validate_test_fraction(config.test_fraction)?;

        let (features, targets) = features_targets(dataset, feature_names, target_names)?;
        let split = train_test_split(&features, &targets, config.random_seed, config.test_fraction)?;

        let params = ZScoreParams::fit(split.train_features.data())?;
        let train_features = params.transform(split.train_features.data())?;
        let beta = Matrix::zeros((train_features.ncols() + 1, targets.n_columns()));

        info!(
            n_samples = dataset.n_samples(),
            n_train = split.train_indices.len(),
            n_test = split.test_indices.len(),
            n_features = features.n_columns(),
            n_targets = targets.n_columns(),
            random_seed = ?config.random_seed,
            "constructed regressor"
        );

        Ok(Self {
            setup: TrainingSetup {
                config,
                split,
                params,
                train_features,
            },
            state: FitState::Constructed { beta },
        })
    }

    /// Runs gradient descent on the normalized training data starting from
    /// zeros, stores the result and returns `(beta, cost_history)`.
    ///
    /// A non-finite final cost is logged at warn level, but beta and the
    /// history are stored and returned unchanged.
    pub fn fit(&mut self, descent: &GradientDescent) -> Result<(Matrix, Vector)> {
        let x = prepare_feature(&self.setup.train_features);
        let y = self.setup.split.train_targets.data();
        let beta = Matrix::zeros((x.ncols(), y.ncols()));

        let (beta, cost_history) = descent.run(&x, y, beta)?;

        if let Some(&cost) = cost_history.iter().next_back().filter(|c| !c.is_finite()) {
            warn!(
                final_cost = cost,
                learning_rate = descent.get_learning_rate(),
                num_iterations = descent.get_num_iterations(),
                "gradient descent diverged"
            );
        }

        self.state = FitState::Fitted {
            beta: beta.clone(),
            cost_history: cost_history.clone(),
        };
        Ok((beta, cost_history))
    }

    /// Predicts raw (unnormalized) feature rows with the frozen training
    /// statistics. Columns must follow the order of the feature names.
    pub fn predict(&self, features: &Matrix) -> Result<Matrix> {
        predict_raw(
            features,
            self.state.beta(),
            Some(&self.setup.params.means),
            Some(&self.setup.params.stds),
        )
    }

    /// Scores the current coefficients on the held-out rows.
    pub fn score(&self) -> Result<Score> {
        let predicted = self.predict(self.setup.split.test_features.data())?;
        let actual = self.setup.split.test_targets.data();

        Ok(Score {
            r2: r2_score(actual, &predicted)?,
            mse: mean_squared_error(actual, &predicted)?,
            mape: mean_absolute_percentage_error(actual, &predicted)?,
        })
    }

    pub fn config(&self) -> &RegressorConfig {
        &self.setup.config
    }

    pub fn split(&self) -> &Split {
        &self.setup.split
    }

    pub fn params(&self) -> &ZScoreParams {
        &self.setup.params
    }

    /// Normalized training features.
    pub fn train_features(&self) -> &Matrix {
        &self.setup.train_features
    }

    pub fn state(&self) -> &FitState {
        &self.state
    }

    pub fn beta(&self) -> &Matrix {
        self.state.beta()
    }

    pub fn cost_history(&self) -> Option<&Vector> {
        self.state.cost_history()
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, FitState::Fitted { .. })
    }
}
