//! Recursive-descent reader for composite literal text
//!
//! The reader walks the literal body one character at a time, tracking
//! quote and escape state per field. Each `read_*` call consumes exactly
//! one field; asking for a field after the body is exhausted is a contract
//! violation and fails with [`LiteralError::ExhaustedBuffer`].

use crate::array;
use crate::errors::LiteralError;
use crate::scalar::{CompositeType, FromLiteral};
use std::iter::Peekable;
use std::str::Chars;

const QUOTE: char = '"';
const ESCAPE: char = '\\';
const DELIMITER: char = ',';

/// Field-by-field cursor over a composite literal body
///
/// The body is the literal text with the outer parentheses already
/// stripped; [`parse_composite`] handles the stripping for whole literals.
pub struct CompositeReader<'a> {
    chars: Peekable<Chars<'a>>,
    /// Whether another field is available: true initially and after every
    /// delimiter-terminated field, false once a field ran to end-of-input.
    pending: bool,
    fields_read: usize,
}

/// Parse a whole composite literal (outer parentheses included) into `T`
pub fn parse_composite<T: CompositeType>(text: &str) -> Result<T, LiteralError> {
    let mut reader = CompositeReader::from_literal(text)?;
    T::from_fields(&mut reader)
}

impl<'a> CompositeReader<'a> {
    /// Cursor over an already-stripped literal body
    pub fn new(body: &'a str) -> Self {
        Self {
            chars: body.chars().peekable(),
            pending: true,
            fields_read: 0,
        }
    }

    /// Strip the outer `( )` pair and position the cursor on the body
    pub fn from_literal(text: &'a str) -> Result<Self, LiteralError> {
        let body = text
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| {
                LiteralError::malformed(format!(
                    "composite literal must be wrapped in parentheses, got '{}'",
                    text
                ))
            })?;
        Ok(Self::new(body))
    }

    /// Whether another field may be read
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Number of fields consumed so far
    pub fn fields_read(&self) -> usize {
        self.fields_read
    }

    /// Read the next field's raw text, `None` meaning SQL NULL
    ///
    /// NULL is an unquoted empty field or the bare case-insensitive token
    /// `NULL`; an explicitly quoted empty string `""` is the empty string.
    pub fn read_raw(&mut self) -> Result<Option<String>, LiteralError> {
        if !self.pending {
            return Err(LiteralError::ExhaustedBuffer {
                fields_read: self.fields_read,
            });
        }

        let mut buf = String::new();
        let mut was_quoted = false;
        let mut in_quotes = false;
        let mut in_escape = false;
        let mut ended_by_delimiter = false;

        while let Some(c) = self.chars.next() {
            if in_escape {
                buf.push(c);
                in_escape = false;
            } else if c == QUOTE {
                was_quoted = true;
                if in_quotes && self.chars.peek() == Some(&QUOTE) {
                    // Doubled quote inside quotes is a literal quote
                    self.chars.next();
                    buf.push(QUOTE);
                } else {
                    in_quotes = !in_quotes;
                }
            } else if c == ESCAPE {
                in_escape = true;
            } else if c == DELIMITER && !in_quotes {
                ended_by_delimiter = true;
                break;
            } else {
                buf.push(c);
            }
        }

        if in_quotes {
            return Err(LiteralError::malformed("unterminated quote in literal"));
        }
        if in_escape {
            return Err(LiteralError::malformed("dangling escape at end of literal"));
        }

        self.pending = ended_by_delimiter;
        self.fields_read += 1;

        if !was_quoted && (buf.is_empty() || buf.eq_ignore_ascii_case("null")) {
            Ok(None)
        } else {
            Ok(Some(buf))
        }
    }

    /// Read and convert the next field, `None` meaning SQL NULL
    pub fn read_field<T: FromLiteral>(&mut self) -> Result<Option<T>, LiteralError> {
        match self.read_raw()? {
            None => Ok(None),
            Some(text) => T::from_literal(&text).map(Some),
        }
    }

    /// Read the next field, failing on SQL NULL
    pub fn require_field<T: FromLiteral>(&mut self) -> Result<T, LiteralError> {
        let position = self.fields_read;
        self.read_field()?
            .ok_or(LiteralError::UnexpectedNull { position })
    }

    /// Read a nested composite field
    pub fn read_composite<T: CompositeType>(&mut self) -> Result<Option<T>, LiteralError> {
        match self.read_raw()? {
            None => Ok(None),
            Some(text) => parse_composite(&text).map(Some),
        }
    }

    /// Read a nested composite field, failing on SQL NULL
    pub fn require_composite<T: CompositeType>(&mut self) -> Result<T, LiteralError> {
        let position = self.fields_read;
        self.read_composite()?
            .ok_or(LiteralError::UnexpectedNull { position })
    }

    /// Read an array-valued field as nullable elements
    pub fn read_array<T: FromLiteral>(
        &mut self,
    ) -> Result<Option<Vec<Option<T>>>, LiteralError> {
        match self.read_raw()? {
            None => Ok(None),
            Some(text) => array::parse_array(&text).map(Some),
        }
    }
}
