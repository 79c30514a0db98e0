//! The decoder seam: one column value into one typed value

use crate::errors::MapError;
use row_view::{SqlRow, SqlValue};
use std::sync::Arc;

/// Converts one column's value into a `T`, `None` meaning SQL NULL
///
/// Decoders are stateless and may be invoked concurrently across rows.
pub trait Decoder<T>: Send + Sync {
    fn decode(&self, row: &SqlRow, field: &str) -> Result<Option<T>, MapError>;
}

impl<T> std::fmt::Debug for dyn Decoder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Decoder")
    }
}

/// Shared handle under which decoders live in the registry
pub type SharedDecoder<T> = Arc<dyn Decoder<T>>;

/// Plain functions and closures are decoders
impl<T, F> Decoder<T> for F
where
    F: Fn(&SqlRow, &str) -> Result<Option<T>, MapError> + Send + Sync,
{
    fn decode(&self, row: &SqlRow, field: &str) -> Result<Option<T>, MapError> {
        self(row, field)
    }
}

/// Fetch a field's raw value, mapping an absent column to its row error
pub fn raw_value<'a>(row: &'a SqlRow, field: &str) -> Result<&'a SqlValue, MapError> {
    row.raw_required(field).map_err(MapError::from)
}

/// Build the standard decode failure for a raw value that would not narrow
pub fn decode_failure<T>(
    value: &SqlValue,
    cause: impl std::error::Error + Send + Sync + 'static,
) -> MapError {
    MapError::Decode {
        target_type: std::any::type_name::<T>().to_string(),
        raw: value.display_brief(),
        raw_type: value.type_name().to_string(),
        source: Some(Box::new(cause)),
    }
}
