//! Built-in decoders over the row's value space
//!
//! [`ValueDecoder`] adapts any [`FromSql`] narrowing into a decoder; it is
//! both the handler registered for every built-in scalar during discovery
//! and the default the registry synthesizes on a decoder-cache miss.

use crate::decode::decoder::{decode_failure, raw_value, Decoder};
use crate::errors::MapError;
use row_view::{FromSql, RowError, SqlRow};
use std::marker::PhantomData;

/// Decoder backed by the type's `FromSql` narrowing
pub struct ValueDecoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> ValueDecoder<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for ValueDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Decoder<T> for ValueDecoder<T>
where
    T: FromSql + Send + Sync + 'static,
{
    fn decode(&self, row: &SqlRow, field: &str) -> Result<Option<T>, MapError> {
        let value = raw_value(row, field)?;
        if value.is_null() {
            return Ok(None);
        }
        match T::from_sql(value) {
            Ok(decoded) => Ok(Some(decoded)),
            // Null array elements keep their index; everything else is the
            // standard decode failure with the narrowing error as cause.
            Err(RowError::NullElement { index }) => Err(MapError::NullElement {
                index,
                target_type: std::any::type_name::<T>().to_string(),
            }),
            Err(cause) => Err(decode_failure::<T>(value, cause)),
        }
    }
}
