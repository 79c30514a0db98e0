//! # Rowcast
//!
//! A typed row-mapping engine for PostgreSQL result rows: a type-keyed
//! handler registry with lazy single-flight resolution, constructor- and
//! field-style struct mapping derived from shape tables, and a round-trip
//! faithful codec for composite and array literal text.
//!
//! ## Quick Start
//!
//! ```rust
//! use rowcast::prelude::*;
//!
//! #[derive(Debug, RowMapped)]
//! pub struct User {
//!     pub id: i32,
//!     pub name: String,
//!     pub score: Option<f64>,
//! }
//!
//! fn main() -> Result<(), rowcast::MapError> {
//!     let engine = Rowcast::new();
//!
//!     let row = engine.row(vec![
//!         ("id".to_string(), SqlValue::Integer(5)),
//!         ("name".to_string(), SqlValue::Text("Ada".to_string())),
//!         ("score".to_string(), SqlValue::Null),
//!     ])?;
//!
//!     let user: User = engine.parse_row(&row)?;
//!     assert_eq!(user.name, "Ada");
//!     assert_eq!(user.score, None);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod decode;
pub mod errors;
pub mod mapper;
pub mod prelude;
pub mod registry;

// Re-export the main public types for convenience
pub use crate::core::{BoundRowParser, Rowcast};
pub use errors::MapError;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, MappingConfig};

// Re-export internal crates used by the derive and public API
// These MUST be public for the generated macro code to work correctly
pub use literal_codec;
pub use mapper_derive;
pub use row_view;

// The derive lives next to the trait it implements
pub use mapper_derive::RowMapped;

// Re-export external dependencies used in public API
pub use sqlx;
