//! The row-parser seam: one row into one typed value

use crate::errors::MapError;
use crate::registry::TypeRegistry;
use row_view::SqlRow;
use std::sync::Arc;

/// Parses a whole row into a `T`
///
/// Parsers are stateless; nested lookups (flattened members, per-column
/// decoders) go through the registry handed in at parse time.
pub trait RowParser<T>: Send + Sync {
    fn parse(&self, registry: &TypeRegistry, row: &SqlRow) -> Result<T, MapError>;
}

/// Shared handle under which parsers live in the registry
pub type SharedRowParser<T> = Arc<dyn RowParser<T>>;

impl<T, F> RowParser<T> for F
where
    F: Fn(&TypeRegistry, &SqlRow) -> Result<T, MapError> + Send + Sync,
{
    fn parse(&self, registry: &TypeRegistry, row: &SqlRow) -> Result<T, MapError> {
        self(registry, row)
    }
}
