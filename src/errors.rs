//! Error types for the rowcast mapping engine
//!
//! Mapping failures are never silently recovered: a failed field decode
//! aborts the whole row's mapping and propagates with full context.
//! Duplicate handler registration during the discovery scan is the sole
//! logged-and-continue condition, and it is a warning, not an error.

use literal_codec::LiteralError;
use row_view::RowError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    /// Constructor-style mapping requires every parameter column
    #[error(
        "cannot map row to {target}: missing column(s) [{missing}]; \
         required columns [{expected}]; row was {{{row}}}"
    )]
    MissingColumns {
        target: String,
        missing: String,
        expected: String,
        row: String,
    },

    #[error("NULL cannot be assigned to non-nullable '{field}' of type {target_type}")]
    NullIntoNonNullable { field: String, target_type: String },

    /// A decoded value's runtime type disagrees with the declared type
    #[error("type mismatch for '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// The raw column value cannot be narrowed to the requested type
    #[error("cannot decode {raw_type} value {raw} into {target_type}")]
    Decode {
        target_type: String,
        raw: String,
        raw_type: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("NULL element at index {index} in array decoded as {target_type}")]
    NullElement { index: usize, target_type: String },

    #[error("no default constructor available for {0}")]
    NoDefaultConstructor(String),

    #[error("no handler registered for type {0}")]
    UnregisteredType(String),

    /// A parameter decode failed while building a constructor call
    #[error("constructor call for {target} failed at parameter '{param}': {source}")]
    ConstructorCall {
        target: String,
        param: String,
        #[source]
        source: Box<MapError>,
    },

    #[error(transparent)]
    Literal(#[from] LiteralError),

    #[error(transparent)]
    Row(#[from] RowError),
}

impl MapError {
    pub fn null_into_non_nullable(field: &str, target_type: &str) -> Self {
        MapError::NullIntoNonNullable {
            field: field.to_string(),
            target_type: target_type.to_string(),
        }
    }
}
