//! Builders for composite and array literal text
//!
//! The writers are the exact inverse of the reader: whatever they emit
//! re-parses to the values that were appended. Quoting applies when a
//! field's text is empty, contains the delimiter, a quote character or a
//! backslash, or spells the NULL token; textual scalar kinds are quoted
//! unconditionally inside composites, matching the database serializer.

use crate::scalar::{CompositeType, ToLiteral};

const DELIMITER: char = ',';

/// Append-only builder for one composite literal
pub struct CompositeWriter {
    buf: String,
    fields: usize,
}

impl CompositeWriter {
    pub fn new() -> Self {
        Self {
            buf: String::from("("),
            fields: 0,
        }
    }

    /// Append a scalar field; `None` writes nothing between the delimiters
    pub fn append<T: ToLiteral>(&mut self, value: Option<&T>) -> &mut Self {
        self.delimit();
        if let Some(v) = value {
            let text = v.to_literal();
            if T::PREFER_QUOTED || needs_quoting(&text) {
                quote_into(&mut self.buf, &text);
            } else {
                self.buf.push_str(&text);
            }
        }
        self
    }

    /// Append an explicit NULL field
    pub fn append_null(&mut self) -> &mut Self {
        self.delimit();
        self
    }

    /// Append a nested composite, quoted as a single outer field
    pub fn append_composite<T: CompositeType>(&mut self, value: Option<&T>) -> &mut Self {
        self.delimit();
        if let Some(v) = value {
            let mut inner = CompositeWriter::new();
            v.write_fields(&mut inner);
            quote_into(&mut self.buf, &inner.finish());
        }
        self
    }

    /// Append an array-valued field, quoted as a single outer field
    pub fn append_array<T: ToLiteral>(&mut self, items: Option<&[Option<T>]>) -> &mut Self {
        self.delimit();
        if let Some(items) = items {
            let mut inner = ArrayWriter::new();
            for item in items {
                inner.append(item.as_ref());
            }
            quote_into(&mut self.buf, &inner.finish());
        }
        self
    }

    /// Append an array of nested composites, quoted as a single outer field
    pub fn append_composite_array<T: CompositeType>(
        &mut self,
        items: Option<&[Option<T>]>,
    ) -> &mut Self {
        self.delimit();
        if let Some(items) = items {
            let mut inner = ArrayWriter::new();
            for item in items {
                inner.append_composite(item.as_ref());
            }
            quote_into(&mut self.buf, &inner.finish());
        }
        self
    }

    /// Close the literal and return its text
    pub fn finish(mut self) -> String {
        self.buf.push(')');
        self.buf
    }

    fn delimit(&mut self) {
        if self.fields > 0 {
            self.buf.push(DELIMITER);
        }
        self.fields += 1;
    }
}

impl Default for CompositeWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Append-only builder for one array literal
///
/// Elements are bare unless quoting is required; NULL elements are the bare
/// token `NULL`; composite elements are individually quoted.
pub struct ArrayWriter {
    buf: String,
    items: usize,
}

impl ArrayWriter {
    pub fn new() -> Self {
        Self {
            buf: String::from("{"),
            items: 0,
        }
    }

    /// Append a scalar element; `None` writes the NULL token
    pub fn append<T: ToLiteral>(&mut self, value: Option<&T>) -> &mut Self {
        self.delimit();
        match value {
            None => self.buf.push_str("NULL"),
            Some(v) => {
                let text = v.to_literal();
                if needs_quoting(&text) {
                    quote_into(&mut self.buf, &text);
                } else {
                    self.buf.push_str(&text);
                }
            }
        }
        self
    }

    /// Append a composite element, always quoted
    pub fn append_composite<T: CompositeType>(&mut self, value: Option<&T>) -> &mut Self {
        self.delimit();
        match value {
            None => self.buf.push_str("NULL"),
            Some(v) => {
                let mut inner = CompositeWriter::new();
                v.write_fields(&mut inner);
                quote_into(&mut self.buf, &inner.finish());
            }
        }
        self
    }

    /// Close the literal and return its text
    pub fn finish(mut self) -> String {
        self.buf.push('}');
        self.buf
    }

    fn delimit(&mut self) {
        if self.items > 0 {
            self.buf.push(DELIMITER);
        }
        self.items += 1;
    }
}

impl Default for ArrayWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a field's text cannot be emitted bare
///
/// The NULL-token check keeps the string "NULL" from re-parsing as SQL NULL.
fn needs_quoting(text: &str) -> bool {
    text.is_empty()
        || text.eq_ignore_ascii_case("null")
        || text
            .chars()
            .any(|c| c == DELIMITER || c == '"' || c == '\\' || c == '(' || c == ')' || c == '{' || c == '}')
}

/// Write `text` quoted, escaping `"` as `""` and `\` as `\\`
fn quote_into(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\"\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out.push('"');
}
