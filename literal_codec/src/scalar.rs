//! Per-scalar text conversions used by the reader and the writer
//!
//! [`FromLiteral`] and [`ToLiteral`] must be exact inverses for every
//! implementing type; the temporal patterns are fixed and mirror what the
//! database's own serializer emits.

use crate::errors::LiteralError;
use crate::reader::CompositeReader;
use crate::writer::CompositeWriter;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Parse one field's raw text into `Self`
pub trait FromLiteral: Sized {
    fn from_literal(text: &str) -> Result<Self, LiteralError>;
}

/// Format `Self` as one field's raw text
pub trait ToLiteral {
    /// Whether a composite field of this type is quoted even when its text
    /// would not require it. Textual kinds (strings, booleans, temporal
    /// values, uuids) are; numeric kinds are not.
    const PREFER_QUOTED: bool;

    fn to_literal(&self) -> String;
}

/// A Rust type that maps to a database composite type, field by field
///
/// `from_fields` reads fields in declaration order from a reader positioned
/// inside the outer parentheses; `write_fields` appends the same fields in
/// the same order. The two must be exact inverses.
pub trait CompositeType: Sized {
    fn from_fields(reader: &mut CompositeReader<'_>) -> Result<Self, LiteralError>;
    fn write_fields(&self, writer: &mut CompositeWriter);
}

#[derive(Debug, Error)]
#[error("expected one of t, f, true, false")]
struct BoolTokenError;

impl FromLiteral for bool {
    fn from_literal(text: &str) -> Result<Self, LiteralError> {
        if text.eq_ignore_ascii_case("t") || text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("f") || text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(LiteralError::parse("bool", text, BoolTokenError))
        }
    }
}

impl ToLiteral for bool {
    const PREFER_QUOTED: bool = true;

    fn to_literal(&self) -> String {
        if *self { "t" } else { "f" }.to_string()
    }
}

macro_rules! impl_numeric_literal {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FromLiteral for $ty {
                fn from_literal(text: &str) -> Result<Self, LiteralError> {
                    text.parse()
                        .map_err(|e| LiteralError::parse($name, text, e))
                }
            }

            impl ToLiteral for $ty {
                const PREFER_QUOTED: bool = false;

                fn to_literal(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_numeric_literal!(
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    f32 => "f32",
    f64 => "f64",
);

impl FromLiteral for String {
    fn from_literal(text: &str) -> Result<Self, LiteralError> {
        Ok(text.to_string())
    }
}

impl ToLiteral for String {
    const PREFER_QUOTED: bool = true;

    fn to_literal(&self) -> String {
        self.clone()
    }
}

impl ToLiteral for &str {
    const PREFER_QUOTED: bool = true;

    fn to_literal(&self) -> String {
        (*self).to_string()
    }
}

impl FromLiteral for Uuid {
    fn from_literal(text: &str) -> Result<Self, LiteralError> {
        Uuid::parse_str(text).map_err(|e| LiteralError::parse("uuid", text, e))
    }
}

impl ToLiteral for Uuid {
    const PREFER_QUOTED: bool = true;

    fn to_literal(&self) -> String {
        self.to_string()
    }
}

const DATE_PATTERN: &str = "%Y-%m-%d";
const TIME_PATTERN: &str = "%H:%M:%S%.f";
const TIMESTAMP_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.f";
const TIMESTAMPTZ_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.f%#z";

impl FromLiteral for NaiveDate {
    fn from_literal(text: &str) -> Result<Self, LiteralError> {
        NaiveDate::parse_from_str(text, DATE_PATTERN)
            .map_err(|e| LiteralError::parse("date", text, e))
    }
}

impl ToLiteral for NaiveDate {
    const PREFER_QUOTED: bool = true;

    fn to_literal(&self) -> String {
        self.format(DATE_PATTERN).to_string()
    }
}

impl FromLiteral for NaiveTime {
    fn from_literal(text: &str) -> Result<Self, LiteralError> {
        NaiveTime::parse_from_str(text, TIME_PATTERN)
            .map_err(|e| LiteralError::parse("time", text, e))
    }
}

impl ToLiteral for NaiveTime {
    const PREFER_QUOTED: bool = true;

    fn to_literal(&self) -> String {
        self.format(TIME_PATTERN).to_string()
    }
}

impl FromLiteral for NaiveDateTime {
    fn from_literal(text: &str) -> Result<Self, LiteralError> {
        NaiveDateTime::parse_from_str(text, TIMESTAMP_PATTERN)
            .map_err(|e| LiteralError::parse("timestamp", text, e))
    }
}

impl ToLiteral for NaiveDateTime {
    const PREFER_QUOTED: bool = true;

    fn to_literal(&self) -> String {
        self.format(TIMESTAMP_PATTERN).to_string()
    }
}

impl FromLiteral for DateTime<Utc> {
    fn from_literal(text: &str) -> Result<Self, LiteralError> {
        DateTime::parse_from_str(text, TIMESTAMPTZ_PATTERN)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| LiteralError::parse("timestamptz", text, e))
    }
}

impl ToLiteral for DateTime<Utc> {
    const PREFER_QUOTED: bool = true;

    fn to_literal(&self) -> String {
        format!("{}+00", self.format(TIMESTAMP_PATTERN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_tokens() {
        assert!(bool::from_literal("t").unwrap());
        assert!(bool::from_literal("TRUE").unwrap());
        assert!(!bool::from_literal("f").unwrap());
        assert!(bool::from_literal("yes").is_err());
        assert_eq!(true.to_literal(), "t");
    }

    #[test]
    fn test_numeric_round_trip() {
        for v in [0i64, 42, -7, i64::MAX, i64::MIN] {
            assert_eq!(i64::from_literal(&v.to_literal()).unwrap(), v);
        }
        for v in [0.0f64, 1.5, -2.25, 1e-12, f64::MAX] {
            assert_eq!(f64::from_literal(&v.to_literal()).unwrap(), v);
        }
    }

    #[test]
    fn test_parse_failure_keeps_cause() {
        let err = i32::from_literal("abc").unwrap_err();
        match err {
            LiteralError::Parse { expected, raw, cause } => {
                assert_eq!(expected, "i32");
                assert_eq!(raw, "abc");
                assert!(!cause.to_string().is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_temporal_patterns() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        assert_eq!(d.to_literal(), "2024-01-01");
        assert_eq!(NaiveDate::from_literal("2024-01-01").unwrap(), d);

        let ts = d.and_hms_opt(10, 30, 0).expect("valid time");
        assert_eq!(ts.to_literal(), "2024-01-01 10:30:00");
        assert_eq!(NaiveDateTime::from_literal("2024-01-01 10:30:00").unwrap(), ts);

        let tz: DateTime<Utc> = ts.and_utc();
        assert_eq!(tz.to_literal(), "2024-01-01 10:30:00+00");
        assert_eq!(DateTime::<Utc>::from_literal("2024-01-01 10:30:00+00").unwrap(), tz);
    }

    #[test]
    fn test_subsecond_precision_survives() {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_micro_opt(1, 2, 3, 456_789))
            .expect("valid timestamp");
        let text = ts.to_literal();
        assert_eq!(NaiveDateTime::from_literal(&text).unwrap(), ts);
    }
}
