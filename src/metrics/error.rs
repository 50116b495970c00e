use ndarray_stats::errors::MultiInputError;
use thiserror::Error;

/// Simplified `Result` using [`MetricsError`] as error type
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Error variants raised when a metric is undefined on its inputs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("cannot score an empty sequence")]
    EmptyInput,
    #[error("{predictions} predictions for {labels} labels")]
    ShapeMismatch { predictions: usize, labels: usize },
    #[error("the coefficient of determination needs at least 2 samples, got {0}")]
    TooFewSamples(usize),
    #[error("labels have zero variance")]
    ZeroVariance,
}

impl From<MultiInputError> for MetricsError {
    fn from(err: MultiInputError) -> Self {
        match err {
            MultiInputError::EmptyInput => MetricsError::EmptyInput,
            MultiInputError::ShapeMismatch(shapes) => MetricsError::ShapeMismatch {
                predictions: shapes.first_shape.iter().product(),
                labels: shapes.second_shape.iter().product(),
            },
        }
    }
}
