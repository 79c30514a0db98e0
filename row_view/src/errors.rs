//! Error types for the row-view crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowError {
    #[error("column '{name}' not found in row (available: {available})")]
    ColumnNotFound { name: String, available: String },

    #[error("duplicate column name '{0}' in row")]
    DuplicateColumn(String),

    #[error("column '{name}' is NULL but a non-nullable value was requested")]
    UnexpectedNull { name: String },

    #[error("cannot narrow {actual} value '{raw}' to {expected}")]
    Narrow {
        expected: &'static str,
        actual: &'static str,
        raw: String,
    },

    #[error("NULL element at index {index} in array of non-nullable elements")]
    NullElement { index: usize },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
