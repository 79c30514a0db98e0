//! Shape tables describing how a struct maps from a row
//!
//! A shape is the static, data-only description the `RowMapped` derive
//! emits: which columns a type consumes, how each one decodes, and how the
//! decoded values assemble into an instance. The registry turns a shape
//! into a row parser exactly once per type.

use crate::errors::MapError;
use crate::registry::{Keyed, TypeRegistry};
use row_view::SqlRow;
use std::any::Any;

/// Decode one column (or, for flattened members, the whole row) into a
/// type-erased value
pub type DecodeFn = fn(&TypeRegistry, &SqlRow, &str) -> Result<Box<dyn Any>, MapError>;

/// One constructor parameter of a record-style mapping
pub struct ParamSpec {
    pub name: &'static str,
    pub column: &'static str,
    pub nullable: bool,
    pub flatten: bool,
    pub decode: DecodeFn,
}

/// Constructor-style mapping: every parameter's column must be present
pub struct RecordShape<T> {
    pub type_name: &'static str,
    pub params: Vec<ParamSpec>,
    pub construct: fn(Vec<Box<dyn Any>>) -> Result<T, MapError>,
}

/// One settable field of a field-style mapping
pub struct SetterSpec<T> {
    pub name: &'static str,
    pub column: &'static str,
    pub nullable: bool,
    pub flatten: bool,
    pub assign: fn(&mut T, &TypeRegistry, &SqlRow, &str) -> Result<(), MapError>,
}

/// Field-style mapping: default instance, then assign whatever is present
pub struct FieldShape<T> {
    pub type_name: &'static str,
    pub default_factory: Option<fn() -> T>,
    pub setters: Vec<SetterSpec<T>>,
}

/// The two mapping strategies a type can declare
pub enum MapperShape<T> {
    Record(RecordShape<T>),
    Fields(FieldShape<T>),
}

/// A type that knows its own row mapping
///
/// Usually implemented via `#[derive(RowMapped)]`; hand-written impls are
/// the escape hatch for mappings the derive cannot express.
pub trait RowMapped: Keyed + Sized + Send + Sync + 'static {
    fn shape() -> MapperShape<Self>;
}

/// Pull the next constructor argument out of the decoded-value sequence
///
/// Used by generated `construct` functions; a wrong or missing value means
/// the shape table and the constructor disagree.
pub fn take_value<T: 'static>(
    values: &mut impl Iterator<Item = Box<dyn Any>>,
    field: &str,
) -> Result<T, MapError> {
    let boxed = values.next().ok_or_else(|| MapError::TypeMismatch {
        field: field.to_string(),
        expected: std::any::type_name::<T>().to_string(),
        actual: "no decoded value left for this parameter".to_string(),
    })?;
    boxed
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| MapError::TypeMismatch {
            field: field.to_string(),
            expected: std::any::type_name::<T>().to_string(),
            actual: "decoded value of a different type".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_value_downcasts() {
        let boxed: Vec<Box<dyn Any>> = vec![Box::new(5_i32), Box::new("Ada".to_string())];
        let mut values = boxed.into_iter();
        assert_eq!(take_value::<i32>(&mut values, "id").unwrap(), 5);
        assert_eq!(take_value::<String>(&mut values, "name").unwrap(), "Ada");
    }

    #[test]
    fn test_take_value_mismatch() {
        let boxed: Vec<Box<dyn Any>> = vec![Box::new(5_i32)];
        let mut values = boxed.into_iter();
        let err = take_value::<String>(&mut values, "name").unwrap_err();
        assert!(matches!(err, MapError::TypeMismatch { .. }));
    }

    #[test]
    fn test_take_value_exhausted() {
        let mut values = Vec::<Box<dyn Any>>::new().into_iter();
        let err = take_value::<i32>(&mut values, "id").unwrap_err();
        assert!(matches!(err, MapError::TypeMismatch { .. }));
    }
}
