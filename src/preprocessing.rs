use crate::{LinRegError, Matrix, Result, Vector};
use ndarray::{Axis, s};

/// Per-column mean and population standard deviation used for z-scoring.
///
/// Parameters fitted on training data must be reused unchanged for every
/// later transform, otherwise test statistics leak into the model.
#[derive(Clone, Debug, PartialEq)]
pub struct ZScoreParams {
    pub means: Vector,
    pub stds: Vector,
}

impl ZScoreParams {
    pub fn fit(data: &Matrix) -> Result<Self> {
        Ok(Self {
            means: column_means(data)?,
            stds: column_stds(data)?,
        })
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    /// Applies `(x - mean) / std` to every row. A zero std yields NaN or
    /// infinite entries for that column.
    pub fn transform(&self, data: &Matrix) -> Result<Matrix> {
        self.check_columns(data)?;

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(Axis(0)) {
            row -= &self.means;
            row /= &self.stds;
        }
        Ok(result)
    }

    pub fn inverse_transform(&self, data: &Matrix) -> Result<Matrix> {
        self.check_columns(data)?;

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(Axis(0)) {
            row *= &self.stds;
            row += &self.means;
        }
        Ok(result)
    }

    fn check_columns(&self, data: &Matrix) -> Result<()> {
        if self.means.len() != self.stds.len() {
            return Err(LinRegError::shape(
                "z-score parameters",
                &[self.means.len()],
                &[self.stds.len()],
            ));
        }
        if data.ncols() != self.means.len() {
            return Err(LinRegError::shape(
                "z-score transform",
                &[self.means.len()],
                &[data.ncols()],
            ));
        }
        Ok(())
    }
}

fn column_means(data: &Matrix) -> Result<Vector> {
    data.mean_axis(Axis(0))
        .ok_or_else(|| LinRegError::EmptyData("cannot compute column means of zero rows".to_string()))
}

fn column_stds(data: &Matrix) -> Result<Vector> {
    if data.nrows() == 0 {
        return Err(LinRegError::EmptyData(
            "cannot compute column standard deviations of zero rows".to_string(),
        ));
    }
    Ok(data.std_axis(Axis(0), 0.0))
}

/// Z-score normalizes `array`, computing whichever of `means`/`stds` is not
/// supplied from `array` itself. Returns the statistics actually used so the
/// same transform can be replayed on other data.
pub fn normalize_z(
    array: &Matrix,
    means: Option<&Vector>,
    stds: Option<&Vector>,
) -> Result<(Matrix, ZScoreParams)> {
    let means = match means {
        Some(m) => m.clone(),
        None => column_means(array)?,
    };
    let stds = match stds {
        Some(s) => s.clone(),
        None => column_stds(array)?,
    };

    let params = ZScoreParams { means, stds };
    let normalized = params.transform(array)?;
    Ok((normalized, params))
}

/// Prepends the intercept column of ones.
pub fn prepare_feature(features: &Matrix) -> Matrix {
    let mut augmented = Matrix::ones((features.nrows(), features.ncols() + 1));
    augmented.slice_mut(s![.., 1..]).assign(features);
    augmented
}
