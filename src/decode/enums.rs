//! Enum decoding by case-insensitive token match

use crate::decode::decoder::{raw_value, Decoder};
use crate::errors::MapError;
use row_view::{SqlRow, SqlValue};
use std::marker::PhantomData;

/// An enum whose variants map to literal tokens
pub trait EnumToken: Sized + Copy + Send + Sync + 'static {
    const VARIANTS: &'static [(&'static str, Self)];
}

/// Look up a variant by token, case-insensitively
pub fn enum_from_token<T: EnumToken>(token: &str) -> Option<T> {
    T::VARIANTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|(_, variant)| *variant)
}

/// Decoder matching a text column against an enum's variant tokens
pub struct EnumDecoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> EnumDecoder<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for EnumDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EnumToken> Decoder<T> for EnumDecoder<T> {
    fn decode(&self, row: &SqlRow, field: &str) -> Result<Option<T>, MapError> {
        let value = raw_value(row, field)?;
        let token = match value {
            SqlValue::Null => return Ok(None),
            SqlValue::Text(s) => s,
            other => {
                return Err(no_variant_error::<T>(other.display_brief()));
            }
        };
        enum_from_token::<T>(token)
            .map(Some)
            .ok_or_else(|| no_variant_error::<T>(format!("'{}'", token)))
    }
}

fn no_variant_error<T: EnumToken>(raw: String) -> MapError {
    let variants: Vec<&str> = T::VARIANTS.iter().map(|(name, _)| *name).collect();
    MapError::Decode {
        target_type: std::any::type_name::<T>().to_string(),
        raw,
        raw_type: "text".to_string(),
        source: Some(format!("no variant matches (expected one of: {})", variants.join(", ")).into()),
    }
}
