//! Runtime value space shared by rows, decoders and encoders
//!
//! [`SqlValue`] is the generic column value a row hands to the mapping
//! engine. The `From` impls cover the outbound direction: turning Rust
//! values into column values for parameter encoding.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single column value as fetched from (or bound to) the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Null,
    Boolean(bool),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    Real(f32),
    Double(f64),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    /// Stored as string to preserve precision
    Decimal(String),
    Json(serde_json::Value),
    /// Raw literal text of a composite-typed column, outer parentheses included
    Composite(String),
    Array(Vec<SqlValue>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Database-flavored name of the value's kind, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Boolean(_) => "boolean",
            SqlValue::SmallInt(_) => "smallint",
            SqlValue::Integer(_) => "integer",
            SqlValue::BigInt(_) => "bigint",
            SqlValue::Real(_) => "real",
            SqlValue::Double(_) => "double precision",
            SqlValue::Text(_) => "text",
            SqlValue::Bytes(_) => "bytea",
            SqlValue::Uuid(_) => "uuid",
            SqlValue::Date(_) => "date",
            SqlValue::Time(_) => "time",
            SqlValue::Timestamp(_) => "timestamp",
            SqlValue::TimestampTz(_) => "timestamptz",
            SqlValue::Decimal(_) => "numeric",
            SqlValue::Json(_) => "jsonb",
            SqlValue::Composite(_) => "composite",
            SqlValue::Array(_) => "array",
        }
    }

    /// Compact rendering for row dumps and error messages
    pub fn display_brief(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            // Truncate by characters, never by bytes; a byte cut could land
            // inside a multibyte sequence and panic in an error path.
            SqlValue::Text(s) if s.chars().count() > 32 => {
                format!("'{}…'", s.chars().take(32).collect::<String>())
            }
            SqlValue::Text(s) => format!("'{}'", s),
            SqlValue::Bytes(b) => format!("<{} bytes>", b.len()),
            SqlValue::Array(items) => format!("<array of {}>", items.len()),
            other => format!("{:?}", other),
        }
    }

    /// Encode this value for the text protocol, `None` meaning SQL NULL
    pub fn to_sql_text(&self) -> Option<String> {
        match self {
            SqlValue::Null => None,
            SqlValue::Boolean(b) => Some(if *b { "t" } else { "f" }.to_string()),
            SqlValue::SmallInt(v) => Some(v.to_string()),
            SqlValue::Integer(v) => Some(v.to_string()),
            SqlValue::BigInt(v) => Some(v.to_string()),
            SqlValue::Real(v) => Some(v.to_string()),
            SqlValue::Double(v) => Some(v.to_string()),
            SqlValue::Text(s) => Some(s.clone()),
            SqlValue::Bytes(b) => {
                let mut out = String::with_capacity(2 + b.len() * 2);
                out.push_str("\\x");
                for byte in b {
                    out.push_str(&format!("{:02x}", byte));
                }
                Some(out)
            }
            SqlValue::Uuid(u) => Some(u.to_string()),
            SqlValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            SqlValue::Time(t) => Some(t.format("%H:%M:%S%.f").to_string()),
            SqlValue::Timestamp(ts) => Some(ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
            SqlValue::TimestampTz(ts) => {
                Some(ts.format("%Y-%m-%d %H:%M:%S%.f+00").to_string())
            }
            SqlValue::Decimal(s) => Some(s.clone()),
            SqlValue::Json(v) => Some(v.to_string()),
            SqlValue::Composite(s) => Some(s.clone()),
            SqlValue::Array(items) => {
                let mut out = String::from("{");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    match item.to_sql_text() {
                        None => out.push_str("NULL"),
                        Some(text) if array_element_needs_quoting(&text) => {
                            quote_array_element(&mut out, &text)
                        }
                        Some(text) => out.push_str(&text),
                    }
                }
                out.push('}');
                Some(out)
            }
        }
    }
}

/// Whether an array element's text cannot be emitted bare
///
/// The NULL-token check keeps the string "NULL" from re-parsing as SQL NULL.
fn array_element_needs_quoting(text: &str) -> bool {
    text.is_empty()
        || text.eq_ignore_ascii_case("null")
        || text
            .chars()
            .any(|c| c == ',' || c == '"' || c == '\\' || c == '(' || c == ')' || c == '{' || c == '}')
}

/// Write `text` quoted, escaping `"` as `""` and `\` as `\\`
fn quote_array_element(out: &mut String, text: &str) {
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

impl From<String> for SqlValue {
    fn from(val: String) -> Self {
        SqlValue::Text(val)
    }
}

impl From<&str> for SqlValue {
    fn from(val: &str) -> Self {
        SqlValue::Text(val.to_string())
    }
}

impl From<i16> for SqlValue {
    fn from(val: i16) -> Self {
        SqlValue::SmallInt(val)
    }
}

impl From<i32> for SqlValue {
    fn from(val: i32) -> Self {
        SqlValue::Integer(val)
    }
}

impl From<i64> for SqlValue {
    fn from(val: i64) -> Self {
        SqlValue::BigInt(val)
    }
}

impl From<f32> for SqlValue {
    fn from(val: f32) -> Self {
        SqlValue::Real(val)
    }
}

impl From<f64> for SqlValue {
    fn from(val: f64) -> Self {
        SqlValue::Double(val)
    }
}

impl From<bool> for SqlValue {
    fn from(val: bool) -> Self {
        SqlValue::Boolean(val)
    }
}

impl From<Uuid> for SqlValue {
    fn from(val: Uuid) -> Self {
        SqlValue::Uuid(val)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(val: Vec<u8>) -> Self {
        SqlValue::Bytes(val)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(val: NaiveDate) -> Self {
        SqlValue::Date(val)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(val: NaiveTime) -> Self {
        SqlValue::Time(val)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(val: NaiveDateTime) -> Self {
        SqlValue::Timestamp(val)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(val: DateTime<Utc>) -> Self {
        SqlValue::TimestampTz(val)
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(val: serde_json::Value) -> Self {
        SqlValue::Json(val)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_encodes_as_none() {
        assert_eq!(SqlValue::Null.to_sql_text(), None);
        assert_eq!(SqlValue::from(None::<i32>), SqlValue::Null);
    }

    #[test]
    fn test_boolean_single_char_encoding() {
        assert_eq!(SqlValue::Boolean(true).to_sql_text().as_deref(), Some("t"));
        assert_eq!(SqlValue::Boolean(false).to_sql_text().as_deref(), Some("f"));
    }

    #[test]
    fn test_bytes_hex_encoding() {
        let v = SqlValue::Bytes(vec![0xde, 0xad, 0x00]);
        assert_eq!(v.to_sql_text().as_deref(), Some("\\xdead00"));
    }

    #[test]
    fn test_array_text_encoding() {
        let v = SqlValue::Array(vec![
            SqlValue::Integer(1),
            SqlValue::Null,
            SqlValue::Integer(3),
        ]);
        assert_eq!(v.to_sql_text().as_deref(), Some("{1,NULL,3}"));
    }

    #[test]
    fn test_array_text_element_quoting() {
        let v = SqlValue::Array(vec![
            SqlValue::Text("a,b".to_string()),
            SqlValue::Text(String::new()),
            SqlValue::Text("NULL".to_string()),
            SqlValue::Text("say \"hi\"".to_string()),
            SqlValue::Null,
        ]);
        // One element per value: the comma-bearing, empty, NULL-spelled and
        // quote-bearing strings must all survive as single quoted elements.
        assert_eq!(
            v.to_sql_text().as_deref(),
            Some("{\"a,b\",\"\",\"NULL\",\"say \"\"hi\"\"\",NULL}")
        );
    }

    #[test]
    fn test_display_brief_truncates_on_char_boundaries() {
        // 12 euro signs are 36 bytes but only 12 characters: no truncation
        let short = SqlValue::Text("€".repeat(12));
        assert_eq!(short.display_brief(), format!("'{}'", "€".repeat(12)));

        let long = SqlValue::Text("é".repeat(40));
        assert_eq!(long.display_brief(), format!("'{}…'", "é".repeat(32)));
    }

    #[test]
    fn test_date_pattern() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        assert_eq!(SqlValue::from(d).to_sql_text().as_deref(), Some("2024-01-01"));
    }
}
