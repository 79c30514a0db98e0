//! Array literal parsing and building
//!
//! Array literals reuse the composite field machinery; they differ only in
//! the `{ }` outer pair and in representing NULL elements with the bare
//! token. Element nullability is reported back as `Option`; rejecting
//! nulls for non-nullable collections is the decode layer's job.

use crate::errors::LiteralError;
use crate::reader::CompositeReader;
use crate::scalar::{CompositeType, FromLiteral, ToLiteral};
use crate::writer::ArrayWriter;

fn array_body(text: &str) -> Result<&str, LiteralError> {
    text.strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| {
            LiteralError::malformed(format!(
                "array literal must be wrapped in braces, got '{}'",
                text
            ))
        })
}

/// Parse an array literal into nullable elements
pub fn parse_array<T: FromLiteral>(text: &str) -> Result<Vec<Option<T>>, LiteralError> {
    let body = array_body(text)?;
    if body.is_empty() {
        return Ok(Vec::new());
    }
    let mut reader = CompositeReader::new(body);
    let mut out = Vec::new();
    while reader.has_pending() {
        out.push(reader.read_field()?);
    }
    Ok(out)
}

/// Parse an array literal whose elements are quoted composite literals
pub fn parse_composite_array<T: CompositeType>(
    text: &str,
) -> Result<Vec<Option<T>>, LiteralError> {
    let body = array_body(text)?;
    if body.is_empty() {
        return Ok(Vec::new());
    }
    let mut reader = CompositeReader::new(body);
    let mut out = Vec::new();
    while reader.has_pending() {
        out.push(reader.read_composite()?);
    }
    Ok(out)
}

/// Build an array literal from nullable elements
pub fn build_array<T: ToLiteral>(items: &[Option<T>]) -> String {
    let mut writer = ArrayWriter::new();
    for item in items {
        writer.append(item.as_ref());
    }
    writer.finish()
}

/// Build an array literal of quoted composite elements
pub fn build_composite_array<T: CompositeType>(items: &[Option<T>]) -> String {
    let mut writer = ArrayWriter::new();
    for item in items {
        writer.append_composite(item.as_ref());
    }
    writer.finish()
}
