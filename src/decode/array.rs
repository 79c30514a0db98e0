//! Array decoding over both structured and literal-text columns
//!
//! Executors that understand arrays deliver [`SqlValue::Array`]; others hand
//! over the raw `{...}` literal as text. [`ArrayDecoder`] accepts both.

use crate::decode::decoder::{decode_failure, raw_value, Decoder};
use crate::errors::MapError;
use literal_codec::{parse_array, FromLiteral};
use row_view::{FromSql, SqlRow, SqlValue};
use std::marker::PhantomData;

/// Decoder for array columns of element type `T`
///
/// Implements [`Decoder`] for both `Vec<T>` (a NULL element fails, naming
/// its index) and `Vec<Option<T>>`.
pub struct ArrayDecoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> ArrayDecoder<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for ArrayDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn elements<T>(value: &SqlValue) -> Result<Vec<Option<T>>, MapError>
where
    T: FromSql + FromLiteral + Send + Sync + 'static,
{
    match value {
        SqlValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                if item.is_null() {
                    out.push(None);
                } else {
                    let decoded = T::from_sql(item)
                        .map_err(|cause| decode_failure::<T>(item, cause))?;
                    out.push(Some(decoded));
                }
            }
            Ok(out)
        }
        SqlValue::Text(text) | SqlValue::Composite(text) => {
            parse_array::<T>(text).map_err(MapError::from)
        }
        other => Err(MapError::Decode {
            target_type: std::any::type_name::<Vec<T>>().to_string(),
            raw: other.display_brief(),
            raw_type: other.type_name().to_string(),
            source: Some("array value or array literal text expected".into()),
        }),
    }
}

impl<T> Decoder<Vec<Option<T>>> for ArrayDecoder<T>
where
    T: FromSql + FromLiteral + Send + Sync + 'static,
{
    fn decode(&self, row: &SqlRow, field: &str) -> Result<Option<Vec<Option<T>>>, MapError> {
        let value = raw_value(row, field)?;
        if value.is_null() {
            return Ok(None);
        }
        elements::<T>(value).map(Some)
    }
}

impl<T> Decoder<Vec<T>> for ArrayDecoder<T>
where
    T: FromSql + FromLiteral + Send + Sync + 'static,
{
    fn decode(&self, row: &SqlRow, field: &str) -> Result<Option<Vec<T>>, MapError> {
        let value = raw_value(row, field)?;
        if value.is_null() {
            return Ok(None);
        }
        let parsed = elements::<T>(value)?;
        let mut out = Vec::with_capacity(parsed.len());
        for (index, element) in parsed.into_iter().enumerate() {
            match element {
                Some(v) => out.push(v),
                None => {
                    return Err(MapError::NullElement {
                        index,
                        target_type: std::any::type_name::<Vec<T>>().to_string(),
                    })
                }
            }
        }
        Ok(Some(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(value: SqlValue) -> SqlRow {
        SqlRow::new(vec![("tags".to_string(), value)]).expect("unique columns")
    }

    #[test]
    fn test_structured_array() {
        let decoder = ArrayDecoder::<i32>::new();
        let row = row(SqlValue::Array(vec![
            SqlValue::Integer(1),
            SqlValue::Integer(2),
        ]));
        let decoded: Option<Vec<i32>> = decoder.decode(&row, "tags").unwrap();
        assert_eq!(decoded, Some(vec![1, 2]));
    }

    #[test]
    fn test_literal_text_array() {
        let decoder = ArrayDecoder::<i32>::new();
        let row = row(SqlValue::Text("{1,2,NULL,4}".to_string()));
        let decoded: Option<Vec<Option<i32>>> = decoder.decode(&row, "tags").unwrap();
        assert_eq!(decoded, Some(vec![Some(1), Some(2), None, Some(4)]));
    }

    #[test]
    fn test_null_element_into_non_nullable_names_index() {
        let decoder = ArrayDecoder::<i32>::new();
        let row = row(SqlValue::Text("{1,2,NULL,4}".to_string()));
        let err: MapError = Decoder::<Vec<i32>>::decode(&decoder, &row, "tags").unwrap_err();
        assert!(matches!(err, MapError::NullElement { index: 2, .. }));
    }

    #[test]
    fn test_null_column_is_none() {
        let decoder = ArrayDecoder::<i32>::new();
        let decoded: Option<Vec<i32>> = decoder.decode(&row(SqlValue::Null), "tags").unwrap();
        assert_eq!(decoded, None);
    }
}
