use thiserror::Error;

/// Simplified `Result` using [`RegressionError`] as error type
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Error variants from hyperparameter construction or model estimation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    /// The design matrix has no rows
    #[error("cannot fit a model on an empty dataset")]
    EmptyInput,
    #[error("design matrix has {design} samples but targets have {targets}")]
    SampleMismatch { design: usize, targets: usize },
    #[error("model was fitted on {expected} features, got {found}")]
    FeatureMismatch { expected: usize, found: usize },
    #[error("invalid tolerance {0}")]
    InvalidTolerance(f32),
    #[error("singular system: {0}")]
    SingularSystem(&'static str),
}
