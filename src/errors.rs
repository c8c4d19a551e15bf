use polars::prelude::PolarsError;
use thiserror::Error;

use crate::algorithms::Algorithm;

/// Errors returned by clustering workflows in this crate.
#[derive(Debug, Error)]
pub enum ClusterLabError {
    /// The algorithm is declared but has no estimator wired up yet.
    #[error("no estimator is wired for `{0}`")]
    NoEstimator(Algorithm),

    /// A derived value was requested before `fit` produced it.
    #[error("`{0}` is not available before fit")]
    NotFitted(&'static str),

    /// The feature table contains a null where a numeric value is required.
    #[error("column `{column}` contains a missing value")]
    MissingValue {
        /// Name of the offending column.
        column: String,
    },

    /// Failure raised by a wrapped estimator, passed through verbatim.
    #[error("estimator failure: {0}")]
    Estimator(String),

    /// A cluster-quality metric could not be computed.
    #[error("could not compute {metric}: {message}")]
    Metric {
        /// Metric name.
        metric: &'static str,
        /// Underlying explanation.
        message: String,
    },

    /// The feature table could not be reshaped into an observation matrix.
    #[error("shape mismatch: {0}")]
    Shape(String),

    #[error(transparent)]
    DataFrame(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, ClusterLabError>;

/// Wraps any estimator error into [`ClusterLabError::Estimator`].
pub fn to_estimator_error<T, E: std::error::Error>(
    input: std::result::Result<T, E>,
) -> Result<T> {
    input.map_err(|err| ClusterLabError::Estimator(err.to_string()))
}
