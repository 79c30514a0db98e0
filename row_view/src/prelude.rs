//! Convenience re-exports for common row-view usage

pub use crate::errors::RowError;
pub use crate::from_sql::{array_elements, narrow_error, FromSql};
pub use crate::row::SqlRow;
pub use crate::value::SqlValue;

// Common external dependencies that are frequently used alongside rows
pub use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
pub use uuid::Uuid;
