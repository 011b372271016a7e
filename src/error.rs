//! Error type shared by every fallible operation in the crate.
//!
//! Numeric anomalies (NaN or infinite values from zero variance, zero targets,
//! or a diverging learning rate) are not errors and are returned as values.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinRegError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinRegError {
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: String,
        actual: String,
    },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("data error: {0}")]
    Data(String),
}

impl LinRegError {
    pub(crate) fn shape(context: &'static str, expected: &[usize], actual: &[usize]) -> Self {
        LinRegError::ShapeMismatch {
            context,
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_message() {
        let err = LinRegError::shape("predict", &[3, 1], &[2, 1]);
        assert_eq!(
            err.to_string(),
            "shape mismatch in predict: expected [3, 1], got [2, 1]"
        );
    }
}
