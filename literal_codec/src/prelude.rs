//! Convenience re-exports for common literal-codec usage

pub use crate::array::{build_array, build_composite_array, parse_array, parse_composite_array};
pub use crate::errors::LiteralError;
pub use crate::reader::{parse_composite, CompositeReader};
pub use crate::scalar::{CompositeType, FromLiteral, ToLiteral};
pub use crate::writer::{ArrayWriter, CompositeWriter};
