use crate::{LinRegError, Matrix, Result, Vector};
use ndarray::{ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use tracing::debug;

/// An in-memory table of rows with named numeric columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    data: Matrix,
}

impl Dataset {
    pub fn new<S: Into<String>>(columns: Vec<S>, data: Matrix) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.len() != data.ncols() {
            return Err(LinRegError::Data(format!(
                "{} column names given for {} data columns",
                columns.len(),
                data.ncols()
            )));
        }

        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(LinRegError::Data(format!("duplicate column name '{}'", name)));
            }
        }

        Ok(Self { columns, data })
    }

    /// Builds a table from `(name, values)` pairs; every column must have the same length.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        let n_rows = columns.first().map(|(_, values)| values.len()).unwrap_or(0);
        let mut data = Matrix::zeros((n_rows, columns.len()));
        let mut names = Vec::with_capacity(columns.len());

        for (j, (name, values)) in columns.into_iter().enumerate() {
            let name = name.into();
            if values.len() != n_rows {
                return Err(LinRegError::Data(format!(
                    "column '{}' has {} rows, expected {}",
                    name,
                    values.len(),
                    n_rows
                )));
            }
            data.column_mut(j).assign(&Vector::from(values));
            names.push(name);
        }

        Self::new(names, data)
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn data(&self) -> &Matrix {
        &self.data
    }

    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_columns(&self) -> usize {
        self.data.ncols()
    }

    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        let idx = self.column_index(name)?;
        Ok(self.data.column(idx))
    }

    /// Returns a new table holding only `names`, in the order given. A name
    /// may be requested more than once.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let indices = names
            .iter()
            .map(|name| self.column_index(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let data = self.data.select(Axis(1), &indices);
        let columns = names.iter().map(|name| name.as_ref().to_string()).collect();
        Ok(Self { columns, data })
    }

    /// Gathers rows by position. The result is indexed `0..indices.len()`.
    pub fn take_rows(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            data: self.data.select(Axis(0), indices),
        }
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| LinRegError::ColumnNotFound(name.to_string()))
    }
}

/// Extracts the feature and target tables from `dataset` by column name.
pub fn features_targets<S: AsRef<str>, T: AsRef<str>>(
    dataset: &Dataset,
    feature_names: &[S],
    target_names: &[T],
) -> Result<(Dataset, Dataset)> {
    let features = dataset.select(feature_names)?;
    let targets = dataset.select(target_names)?;
    Ok((features, targets))
}

/// Row-aligned train/test partition of a feature table and its target table.
#[derive(Clone, Debug)]
pub struct Split {
    pub train_features: Dataset,
    pub test_features: Dataset,
    pub train_targets: Dataset,
    pub test_targets: Dataset,
    /// Original row positions of the training rows, ascending.
    pub train_indices: Vec<usize>,
    /// Original row positions of the test rows, in sampling order.
    pub test_indices: Vec<usize>,
}

pub(crate) fn validate_test_fraction(test_fraction: f64) -> Result<()> {
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(LinRegError::InvalidParameter {
            name: "test_fraction",
            value: test_fraction.to_string(),
            reason: "must be in [0, 1)".to_string(),
        });
    }
    Ok(())
}

/// Holds out `floor(n_samples * test_fraction)` rows chosen uniformly without
/// replacement. The generator is local to this call: the same seed always
/// yields the same split. `None` seeds from OS entropy.
pub fn train_test_split(
    features: &Dataset,
    targets: &Dataset,
    random_seed: Option<u64>,
    test_fraction: f64,
) -> Result<Split> {
    validate_test_fraction(test_fraction)?;

    if features.n_samples() != targets.n_samples() {
        return Err(LinRegError::shape(
            "train_test_split",
            &[features.n_samples()],
            &[targets.n_samples()],
        ));
    }

    let n_samples = features.n_samples();
    let n_test = (n_samples as f64 * test_fraction).floor() as usize;

    let mut rng = match random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let test_indices = index::sample(&mut rng, n_samples, n_test).into_vec();

    let mut held_out = vec![false; n_samples];
    for &i in &test_indices {
        held_out[i] = true;
    }
    let train_indices: Vec<usize> = (0..n_samples).filter(|&i| !held_out[i]).collect();

    debug!(
        n_samples,
        n_train = train_indices.len(),
        n_test,
        ?random_seed,
        "split dataset"
    );

    Ok(Split {
        train_features: features.take_rows(&train_indices),
        test_features: features.take_rows(&test_indices),
        train_targets: targets.take_rows(&train_indices),
        test_targets: targets.take_rows(&test_indices),
        train_indices,
        test_indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn linear_table(n: usize) -> Dataset {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 10.0 * v + 1.0).collect();
        Dataset::from_columns(vec![("x", x), ("y", y)]).unwrap()
    }

    #[test]
    fn test_dataset_creation() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let dataset = Dataset::new(vec!["a", "b"], data).unwrap();
        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_columns(), 2);
        assert_eq!(dataset.column("b").unwrap(), array![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_dataset_rejects_bad_columns() {
        let data = array![[1.0, 2.0]];
        assert!(Dataset::new(vec!["a"], data.clone()).is_err());
        assert!(Dataset::new(vec!["a", "a"], data).is_err());
        assert!(Dataset::from_columns(vec![("a", vec![1.0, 2.0]), ("b", vec![1.0])]).is_err());
    }

    #[test]
    fn test_select_follows_requested_order() {
        let dataset =
            Dataset::from_columns(vec![("a", vec![1.0, 2.0]), ("b", vec![3.0, 4.0])]).unwrap();
        let selected = dataset.select(&["b", "a"]).unwrap();
        assert_eq!(selected.column_names(), &["b".to_string(), "a".to_string()]);
        assert_eq!(selected.data(), &array![[3.0, 1.0], [4.0, 2.0]]);
    }

    #[test]
    fn test_select_allows_repeated_names() {
        let dataset =
            Dataset::from_columns(vec![("x", vec![1.0, 2.0]), ("y", vec![3.0, 4.0])]).unwrap();
        let selected = dataset.select(&["x", "x"]).unwrap();
        assert_eq!(selected.n_columns(), 2);
        assert_eq!(selected.data(), &array![[1.0, 1.0], [2.0, 2.0]]);

        let (features, targets) = features_targets(&dataset, &["x", "x"], &["y"]).unwrap();
        assert_eq!(features.column_names(), &["x".to_string(), "x".to_string()]);
        assert_eq!(targets.n_columns(), 1);
    }

    #[test]
    fn test_features_targets_missing_column() {
        let dataset = linear_table(4);
        let err = features_targets(&dataset, &["x"], &["z"]).unwrap_err();
        assert_eq!(err, LinRegError::ColumnNotFound("z".to_string()));
    }

    #[test]
    fn test_train_test_split_sizes() {
        let (features, targets) = features_targets(&linear_table(100), &["x"], &["y"]).unwrap();
        let split = train_test_split(&features, &targets, Some(7), 0.2).unwrap();
        assert_eq!(split.train_features.n_samples(), 80);
        assert_eq!(split.test_features.n_samples(), 20);
        assert_eq!(split.train_targets.n_samples(), 80);
        assert_eq!(split.test_targets.n_samples(), 20);
    }

    #[test]
    fn test_split_partitions_indices() {
        let (features, targets) = features_targets(&linear_table(37), &["x"], &["y"]).unwrap();
        for &fraction in &[0.0, 0.1, 0.29, 0.5, 0.99] {
            let split = train_test_split(&features, &targets, Some(1), fraction).unwrap();
            assert_eq!(split.test_indices.len(), (37.0 * fraction).floor() as usize);

            let mut all: Vec<usize> = split
                .train_indices
                .iter()
                .chain(split.test_indices.iter())
                .copied()
                .collect();
            all.sort_unstable();
            assert_eq!(all, (0..37).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_split_preserves_row_alignment() {
        let (features, targets) = features_targets(&linear_table(50), &["x"], &["y"]).unwrap();
        let split = train_test_split(&features, &targets, Some(69), 0.5).unwrap();

        for (f, t) in [
            (&split.train_features, &split.train_targets),
            (&split.test_features, &split.test_targets),
        ] {
            for (x, y) in f.data().column(0).iter().zip(t.data().column(0).iter()) {
                assert_eq!(*y, 10.0 * x + 1.0);
            }
        }
        for (row, &original) in split.test_indices.iter().enumerate() {
            assert_eq!(split.test_features.data()[(row, 0)], original as f64);
        }
    }

    #[test]
    fn test_split_is_reproducible() {
        let (features, targets) = features_targets(&linear_table(100), &["x"], &["y"]).unwrap();
        let a = train_test_split(&features, &targets, Some(42), 0.5).unwrap();
        let b = train_test_split(&features, &targets, Some(42), 0.5).unwrap();
        let c = train_test_split(&features, &targets, Some(43), 0.5).unwrap();
        assert_eq!(a.test_indices, b.test_indices);
        assert_eq!(a.test_features, b.test_features);
        assert_ne!(a.test_indices, c.test_indices);
    }

    #[test]
    fn test_unseeded_split_still_partitions() {
        let (features, targets) = features_targets(&linear_table(10), &["x"], &["y"]).unwrap();
        let split = train_test_split(&features, &targets, None, 0.3).unwrap();
        assert_eq!(split.test_indices.len(), 3);
        assert_eq!(split.train_indices.len(), 7);
    }

    #[test]
    fn test_split_invalid_fraction() {
        let (features, targets) = features_targets(&linear_table(10), &["x"], &["y"]).unwrap();
        assert!(train_test_split(&features, &targets, Some(1), 1.0).is_err());
        assert!(train_test_split(&features, &targets, Some(1), -0.1).is_err());
        assert!(train_test_split(&features, &targets, Some(1), f64::NAN).is_err());
    }

    #[test]
    fn test_split_row_count_mismatch() {
        let features = linear_table(10).select(&["x"]).unwrap();
        let targets = linear_table(9).select(&["y"]).unwrap();
        assert!(train_test_split(&features, &targets, Some(1), 0.5).is_err());
    }
}
