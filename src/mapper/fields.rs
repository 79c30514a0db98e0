//! Field-style row parsing

use crate::errors::MapError;
use crate::mapper::parser::RowParser;
use crate::mapper::shape::FieldShape;
use crate::registry::TypeRegistry;
use row_view::SqlRow;

/// Parser starting from a default instance and assigning present columns
///
/// Columns absent from the row leave the default value in place; flattened
/// members always run, since their columns belong to the nested type.
pub struct FieldParser<T> {
    shape: FieldShape<T>,
    factory: fn() -> T,
}

impl<T> std::fmt::Debug for FieldParser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldParser")
            .field("type_name", &self.shape.type_name)
            .finish_non_exhaustive()
    }
}

impl<T> FieldParser<T> {
    pub fn new(shape: FieldShape<T>) -> Result<Self, MapError> {
        let factory = shape
            .default_factory
            .ok_or_else(|| MapError::NoDefaultConstructor(shape.type_name.to_string()))?;
        Ok(Self { shape, factory })
    }
}

impl<T: Send + Sync> RowParser<T> for FieldParser<T> {
    fn parse(&self, registry: &TypeRegistry, row: &SqlRow) -> Result<T, MapError> {
        let mut target = (self.factory)();
        for setter in &self.shape.setters {
            if setter.flatten || row.contains(setter.column) {
                (setter.assign)(&mut target, registry, row, setter.column)?;
            }
        }
        Ok(target)
    }
}
