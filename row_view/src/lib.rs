//! Row View - Generic result-row abstraction for rowcast
//!
//! This crate provides the read-only, column-indexed view over one database
//! result row that the mapping engine consumes: the [`SqlValue`] runtime
//! value space, the fallible [`FromSql`] narrowing trait, and the [`SqlRow`]
//! container with typed getters and nullability semantics.

pub mod errors;
pub mod from_sql;
pub mod pg;
pub mod prelude;
pub mod row;
pub mod value;

pub use errors::RowError;
pub use from_sql::FromSql;
pub use row::SqlRow;
pub use value::SqlValue;
