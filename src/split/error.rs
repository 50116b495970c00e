use super::Group;
use crate::linear::RegressionError;
use crate::metrics::MetricsError;
use crate::table::TableError;
use thiserror::Error;

/// Simplified `Result` using [`SplitError`] as error type
pub type Result<T> = std::result::Result<T, SplitError>;

/// Error variants from the split regression workflow
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error("group {group}: {source}")]
    Regression {
        group: Group,
        #[source]
        source: RegressionError,
    },
    #[error("predict() called before fit()")]
    NotFitted,
    #[error("evaluate() called before predict()")]
    NotPredicted,
    #[error("indicator column {column:?} holds {value}, expected 0 or 1")]
    InvalidIndicator { column: String, value: f64 },
    #[error("training columns {train:?} differ from testing columns {test:?}")]
    SchemaMismatch { train: Vec<String>, test: Vec<String> },
    #[error("empty {0} column name")]
    EmptyColumnName(&'static str),
    #[error("column {0:?} cannot be both the indicator and the label")]
    IndicatorIsLabel(String),
}
