use thiserror::Error;

/// Simplified `Result` using [`TableError`] as error type
pub type Result<T> = std::result::Result<T, TableError>;

/// Error variants from table construction and column lookups
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("column {0:?} not found")]
    MissingColumn(String),
    #[error("duplicate column {0:?}")]
    DuplicateColumn(String),
    #[error("column {name:?} has {found} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("column {0:?} is not numeric")]
    NotNumeric(String),
    #[error("row indexes differ")]
    IndexMismatch,
}
