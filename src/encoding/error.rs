use crate::table::TableError;
use thiserror::Error;

/// Simplified `Result` using [`EncoderError`] as error type
pub type Result<T> = std::result::Result<T, EncoderError>;

/// Error variants from fitting or applying a categorical encoder
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncoderError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("encoder was fitted on {expected:?}, got {found:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("unknown level {level:?} for feature {feature:?}")]
    UnknownLevel { feature: String, level: String },
    #[error("no feature to encode")]
    EmptyFeatures,
    #[error("encoder produced {columns} columns but {names} names")]
    OutputMismatch { columns: usize, names: usize },
}
