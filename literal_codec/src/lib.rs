//! Literal Codec - Postgres composite/array literal text format
//!
//! This crate parses and builds the bracketed, comma-separated, quoted and
//! escaped text representation shared by composite-typed columns and SQL
//! array columns. Parsing and building are exact inverses: for every
//! supported value `v`, building `v` and re-parsing the output yields `v`
//! again, byte-for-byte compatible with the database's own serializer.
//!
//! - Composite literals wrap their fields in `( )`.
//! - Array literals wrap their elements in `{ }`.
//! - A field is quoted when its text is empty or contains the delimiter, a
//!   quote character or a backslash; inside quotes `"` is written `""` and
//!   `\` is written `\\`.
//! - An unquoted empty field and the bare token `NULL` (case-insensitive)
//!   both denote SQL NULL; an explicitly quoted empty string `""` is the
//!   empty string.

pub mod array;
pub mod errors;
pub mod prelude;
pub mod reader;
pub mod scalar;
pub mod writer;

pub use array::{build_array, build_composite_array, parse_array, parse_composite_array};
pub use errors::LiteralError;
pub use reader::{parse_composite, CompositeReader};
pub use scalar::{CompositeType, FromLiteral, ToLiteral};
pub use writer::{ArrayWriter, CompositeWriter};
