//! Materialize a [`SqlRow`] from a fetched `sqlx` Postgres row
//!
//! The mapping engine itself never talks to the database; this adapter is
//! the boundary where an sqlx-based executor hands rows in. Columns are
//! converted by their Postgres type name; composite-typed columns arrive as
//! raw literal text and are decoded later by the literal codec.

use crate::errors::RowError;
use crate::row::SqlRow;
use crate::value::SqlValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo};
use uuid::Uuid;

impl SqlRow {
    /// Convert one fetched Postgres row into the engine's row abstraction
    pub fn from_pg_row(row: &PgRow) -> Result<Self, RowError> {
        let mut columns = Vec::with_capacity(row.len());
        for column in row.columns() {
            let index = column.ordinal();
            let value = pg_column_value(row, index, column.type_info().name())?;
            columns.push((column.name().to_string(), value));
        }
        SqlRow::new(columns)
    }
}

fn pg_column_value(row: &PgRow, index: usize, type_name: &str) -> Result<SqlValue, RowError> {
    let value = match type_name {
        "BOOL" => wrap(row.try_get::<Option<bool>, _>(index)?, SqlValue::Boolean),
        "INT2" => wrap(row.try_get::<Option<i16>, _>(index)?, SqlValue::SmallInt),
        "INT4" => wrap(row.try_get::<Option<i32>, _>(index)?, SqlValue::Integer),
        "INT8" => wrap(row.try_get::<Option<i64>, _>(index)?, SqlValue::BigInt),
        "FLOAT4" => wrap(row.try_get::<Option<f32>, _>(index)?, SqlValue::Real),
        "FLOAT8" => wrap(row.try_get::<Option<f64>, _>(index)?, SqlValue::Double),
        "NUMERIC" => wrap(
            row.try_get::<Option<rust_decimal::Decimal>, _>(index)?,
            |d| SqlValue::Decimal(d.to_string()),
        ),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CHAR" => {
            wrap(row.try_get::<Option<String>, _>(index)?, SqlValue::Text)
        }
        "BYTEA" => wrap(row.try_get::<Option<Vec<u8>>, _>(index)?, SqlValue::Bytes),
        "UUID" => wrap(row.try_get::<Option<Uuid>, _>(index)?, SqlValue::Uuid),
        "DATE" => wrap(row.try_get::<Option<NaiveDate>, _>(index)?, SqlValue::Date),
        "TIME" => wrap(row.try_get::<Option<NaiveTime>, _>(index)?, SqlValue::Time),
        "TIMESTAMP" => wrap(
            row.try_get::<Option<NaiveDateTime>, _>(index)?,
            SqlValue::Timestamp,
        ),
        "TIMESTAMPTZ" => wrap(
            row.try_get::<Option<DateTime<Utc>>, _>(index)?,
            SqlValue::TimestampTz,
        ),
        "JSON" | "JSONB" => wrap(
            row.try_get::<Option<serde_json::Value>, _>(index)?,
            SqlValue::Json,
        ),
        "BOOL[]" => array(row.try_get::<Option<Vec<Option<bool>>>, _>(index)?, SqlValue::Boolean),
        "INT2[]" => array(row.try_get::<Option<Vec<Option<i16>>>, _>(index)?, SqlValue::SmallInt),
        "INT4[]" => array(row.try_get::<Option<Vec<Option<i32>>>, _>(index)?, SqlValue::Integer),
        "INT8[]" => array(row.try_get::<Option<Vec<Option<i64>>>, _>(index)?, SqlValue::BigInt),
        "FLOAT4[]" => array(row.try_get::<Option<Vec<Option<f32>>>, _>(index)?, SqlValue::Real),
        "FLOAT8[]" => array(row.try_get::<Option<Vec<Option<f64>>>, _>(index)?, SqlValue::Double),
        "TEXT[]" | "VARCHAR[]" => {
            array(row.try_get::<Option<Vec<Option<String>>>, _>(index)?, SqlValue::Text)
        }
        "UUID[]" => array(row.try_get::<Option<Vec<Option<Uuid>>>, _>(index)?, SqlValue::Uuid),
        // Composite and otherwise-unknown types: take the raw text form and
        // let the literal codec deal with it downstream.
        _ => match row.try_get_unchecked::<Option<String>, _>(index)? {
            None => SqlValue::Null,
            Some(text) if text.starts_with('(') || text.starts_with('{') => {
                SqlValue::Composite(text)
            }
            Some(text) => SqlValue::Text(text),
        },
    };
    Ok(value)
}

fn wrap<T>(value: Option<T>, variant: impl Fn(T) -> SqlValue) -> SqlValue {
    match value {
        Some(v) => variant(v),
        None => SqlValue::Null,
    }
}

fn array<T>(value: Option<Vec<Option<T>>>, variant: impl Fn(T) -> SqlValue) -> SqlValue {
    match value {
        Some(items) => SqlValue::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Some(v) => variant(v),
                    None => SqlValue::Null,
                })
                .collect(),
        ),
        None => SqlValue::Null,
    }
}
