//! Procedural macro for deriving row-mapping shape tables
//!
//! This crate provides the `RowMapped` derive, which generates the shape
//! table the rowcast registry consumes when it synthesizes a default row
//! parser for a type. The derive replaces what a reflective mapper would
//! discover at runtime: parameter order, column names, nullability and
//! nesting.
//!
//! Usage:
//! ```rust,ignore
//! use mapper_derive::RowMapped;
//!
//! // Constructor-style (immutable record shape) is the default
//! #[derive(RowMapped)]
//! pub struct User {
//!     pub id: i32,
//!     #[row(rename = "user_name")]
//!     pub name: String,
//!     pub score: Option<i32>,
//! }
//!
//! // Field-style (mutable object shape) maps whatever columns are present
//! #[derive(RowMapped, Default)]
//! #[row(fields)]
//! pub struct Settings {
//!     pub theme: String,
//!     pub page_size: Option<i32>,
//! }
//!
//! // Flatten parses the same row into a nested sub-object
//! #[derive(RowMapped)]
//! pub struct OrderLine {
//!     pub qty: i32,
//!     #[row(flatten)]
//!     pub product: Product,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod expand;
mod parsing;

/// Derive macro generating `Keyed` and `RowMapped` implementations
#[proc_macro_derive(RowMapped, attributes(row))]
pub fn derive_row_mapped(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand::expand_row_mapped(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
