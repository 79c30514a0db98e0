//! Convenience re-exports for common rowcast usage
//!
//! # Example
//!
//! ```rust
//! use rowcast::prelude::*;
//!
//! // Now you have access to the engine, the derive and the row types
//! ```

// Core engine components
pub use crate::core::{BoundRowParser, Rowcast};
pub use crate::errors::MapError;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, MappingConfig};

// Decoder and parser seams
pub use crate::decode::{Decoder, EnumDecoder, EnumToken, SharedDecoder};
pub use crate::mapper::{MapperShape, RowMapped, RowParser, SharedRowParser};
pub use crate::registry::{HandlerPack, Keyed, PackRegistrar, TypeKey, TypeRegistry};

// The derive for shape tables
pub use mapper_derive::RowMapped;

// Row and literal-text building blocks
pub use literal_codec::prelude::*;
pub use row_view::prelude::*;

// Common external dependencies
pub use sqlx;
