//! Regression scores over arrays of any dimension. Multi-target arrays are
//! pooled: every element counts as one observation.
//!
//! Degenerate inputs are not guarded. A constant `actual` makes `r2_score`
//! divide by zero, and a zero entry in `actual` makes the percentage error
//! infinite or NaN.

use crate::{LinRegError, Result};
use ndarray::{ArrayBase, Data, Dimension};

fn check_shapes<S1, S2, D>(actual: &ArrayBase<S1, D>, predicted: &ArrayBase<S2, D>) -> Result<()>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    if actual.shape() != predicted.shape() {
        return Err(LinRegError::shape("metrics", actual.shape(), predicted.shape()));
    }
    Ok(())
}

fn squared_residuals<S1, S2, D>(actual: &ArrayBase<S1, D>, predicted: &ArrayBase<S2, D>) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p) * (a - p))
        .sum()
}

pub fn r2_score<S1, S2, D>(actual: &ArrayBase<S1, D>, predicted: &ArrayBase<S2, D>) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    check_shapes(actual, predicted)?;

    let mean = actual.sum() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean) * (a - mean)).sum();
    let ss_res = squared_residuals(actual, predicted);

    Ok(1.0 - ss_res / ss_tot)
}

pub fn mean_squared_error<S1, S2, D>(
    actual: &ArrayBase<S1, D>,
    predicted: &ArrayBase<S2, D>,
) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    check_shapes(actual, predicted)?;
    Ok(squared_residuals(actual, predicted) / actual.len() as f64)
}

/// Mean of `|actual - predicted| / |actual|`, as a fraction rather than a percentage.
pub fn mean_absolute_percentage_error<S1, S2, D>(
    actual: &ArrayBase<S1, D>,
    predicted: &ArrayBase<S2, D>,
) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    check_shapes(actual, predicted)?;

    let total: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs() / a.abs())
        .sum();
    Ok(total / actual.len() as f64)
}
