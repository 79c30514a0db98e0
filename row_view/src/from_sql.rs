//! Fallible narrowing from [`SqlValue`] to concrete Rust types
//!
//! Every conversion returns an explicit `Result` so a bad narrowing never
//! surfaces as an opaque cast failure: the error names the requested type,
//! the value's actual kind and a rendering of the raw value.

use crate::errors::RowError;
use crate::value::SqlValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

/// Conversion from a raw column value into `Self`
pub trait FromSql: Sized {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError>;
}

/// Build the standard narrowing error for a failed conversion
pub fn narrow_error<T>(value: &SqlValue) -> RowError {
    RowError::Narrow {
        expected: std::any::type_name::<T>(),
        actual: value.type_name(),
        raw: value.display_brief(),
    }
}

impl FromSql for bool {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::Boolean(b) => Ok(*b),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for i16 {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::SmallInt(v) => Ok(*v),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for i32 {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::SmallInt(v) => Ok(*v as i32),
            SqlValue::Integer(v) => Ok(*v),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for i64 {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::SmallInt(v) => Ok(*v as i64),
            SqlValue::Integer(v) => Ok(*v as i64),
            SqlValue::BigInt(v) => Ok(*v),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for f32 {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::Real(v) => Ok(*v),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for f64 {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::Real(v) => Ok(*v as f64),
            SqlValue::Double(v) => Ok(*v),
            SqlValue::Decimal(s) => s.parse().map_err(|_| narrow_error::<Self>(value)),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for String {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::Text(s) => Ok(s.clone()),
            SqlValue::Decimal(s) => Ok(s.clone()),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for Vec<u8> {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::Bytes(b) => Ok(b.clone()),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for Uuid {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::Uuid(u) => Ok(*u),
            SqlValue::Text(s) => Uuid::parse_str(s).map_err(|_| narrow_error::<Self>(value)),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for NaiveDate {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::Date(d) => Ok(*d),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for NaiveTime {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::Time(t) => Ok(*t),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for NaiveDateTime {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::Timestamp(ts) => Ok(*ts),
            SqlValue::TimestampTz(ts) => Ok(ts.naive_utc()),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for DateTime<Utc> {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::TimestampTz(ts) => Ok(*ts),
            SqlValue::Timestamp(ts) => Ok(ts.and_utc()),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl FromSql for serde_json::Value {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::Json(v) => Ok(v.clone()),
            other => Err(narrow_error::<Self>(other)),
        }
    }
}

impl<T: FromSql> FromSql for Option<T> {
    fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
        match value {
            SqlValue::Null => Ok(None),
            other => T::from_sql(other).map(Some),
        }
    }
}

/// View an [`SqlValue::Array`]'s elements, rejecting every other kind
pub fn array_elements(value: &SqlValue) -> Result<&[SqlValue], RowError> {
    match value {
        SqlValue::Array(items) => Ok(items),
        other => Err(narrow_error::<Vec<SqlValue>>(other)),
    }
}

// Arrays are implemented per supported element type rather than through a
// blanket impl, which would collide with the Vec<u8> bytea conversion.
macro_rules! impl_array_from_sql {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromSql for Vec<$ty> {
                fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
                    let items = array_elements(value)?;
                    let mut out = Vec::with_capacity(items.len());
                    for (index, item) in items.iter().enumerate() {
                        if item.is_null() {
                            return Err(RowError::NullElement { index });
                        }
                        out.push(<$ty>::from_sql(item)?);
                    }
                    Ok(out)
                }
            }

            impl FromSql for Vec<Option<$ty>> {
                fn from_sql(value: &SqlValue) -> Result<Self, RowError> {
                    let items = array_elements(value)?;
                    items.iter().map(Option::<$ty>::from_sql).collect()
                }
            }
        )*
    };
}

impl_array_from_sql!(
    bool,
    i16,
    i32,
    i64,
    f32,
    f64,
    String,
    Uuid,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    DateTime<Utc>,
);
