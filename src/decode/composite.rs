//! Decoders for composite-typed columns, backed by the literal codec

use crate::decode::decoder::{raw_value, Decoder};
use crate::errors::MapError;
use literal_codec::{build_composite_array, parse_composite, parse_composite_array, CompositeType, CompositeWriter};
use row_view::{SqlRow, SqlValue};
use std::marker::PhantomData;

/// Decoder parsing a composite column's literal text into `T`
pub struct CompositeDecoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> CompositeDecoder<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for CompositeDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw literal text of a composite-valued column
fn literal_text<'a>(value: &'a SqlValue) -> Option<&'a str> {
    match value {
        SqlValue::Composite(text) => Some(text),
        // Executors without composite awareness deliver plain text
        SqlValue::Text(text) => Some(text),
        _ => None,
    }
}

fn not_composite<T>(value: &SqlValue) -> MapError {
    MapError::Decode {
        target_type: std::any::type_name::<T>().to_string(),
        raw: value.display_brief(),
        raw_type: value.type_name().to_string(),
        source: Some("composite literal text expected".into()),
    }
}

impl<T> Decoder<T> for CompositeDecoder<T>
where
    T: CompositeType + Send + Sync + 'static,
{
    fn decode(&self, row: &SqlRow, field: &str) -> Result<Option<T>, MapError> {
        let value = raw_value(row, field)?;
        if value.is_null() {
            return Ok(None);
        }
        let text = literal_text(value).ok_or_else(|| not_composite::<T>(value))?;
        parse_composite(text).map(Some).map_err(MapError::from)
    }
}

/// Serialize a composite value back to literal text
pub fn encode_composite<T: CompositeType>(value: &T) -> String {
    let mut writer = CompositeWriter::new();
    value.write_fields(&mut writer);
    writer.finish()
}

/// Decoder for array columns whose elements are composite values
///
/// Decodes either into `Vec<T>` (failing on a NULL element, naming its
/// index) or `Vec<Option<T>>`.
pub struct CompositeArrayDecoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> CompositeArrayDecoder<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for CompositeArrayDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Decoder<Vec<Option<T>>> for CompositeArrayDecoder<T>
where
    T: CompositeType + Send + Sync + 'static,
{
    fn decode(&self, row: &SqlRow, field: &str) -> Result<Option<Vec<Option<T>>>, MapError> {
        let value = raw_value(row, field)?;
        if value.is_null() {
            return Ok(None);
        }
        let text = literal_text(value).ok_or_else(|| not_composite::<Vec<Option<T>>>(value))?;
        parse_composite_array(text).map(Some).map_err(MapError::from)
    }
}

impl<T> Decoder<Vec<T>> for CompositeArrayDecoder<T>
where
    T: CompositeType + Send + Sync + 'static,
{
    fn decode(&self, row: &SqlRow, field: &str) -> Result<Option<Vec<T>>, MapError> {
        let value = raw_value(row, field)?;
        if value.is_null() {
            return Ok(None);
        }
        let text = literal_text(value).ok_or_else(|| not_composite::<Vec<T>>(value))?;
        let elements = parse_composite_array::<T>(text)?;
        let mut out = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
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

/// Serialize composite values as an array literal
pub fn encode_composite_array<T: CompositeType>(items: &[Option<T>]) -> String {
    build_composite_array(items)
}
