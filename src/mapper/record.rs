//! Constructor-style row parsing

use crate::errors::MapError;
use crate::mapper::parser::RowParser;
use crate::mapper::shape::RecordShape;
use crate::registry::TypeRegistry;
use row_view::SqlRow;

/// Parser assembling a value through its constructor parameter list
///
/// All non-flattened parameter columns must be present before any decoding
/// starts; a partial row fails up front with the full missing set.
pub struct ConstructorParser<T> {
    shape: RecordShape<T>,
}

impl<T> ConstructorParser<T> {
    pub fn new(shape: RecordShape<T>) -> Self {
        Self { shape }
    }
}

impl<T: Send + Sync> RowParser<T> for ConstructorParser<T> {
    fn parse(&self, registry: &TypeRegistry, row: &SqlRow) -> Result<T, MapError> {
        let missing: Vec<&str> = self
            .shape
            .params
            .iter()
            .filter(|p| !p.flatten && !row.contains(p.column))
            .map(|p| p.column)
            .collect();
        if !missing.is_empty() {
            let expected: Vec<&str> = self
                .shape
                .params
                .iter()
                .filter(|p| !p.flatten)
                .map(|p| p.column)
                .collect();
            return Err(MapError::MissingColumns {
                target: self.shape.type_name.to_string(),
                missing: missing.join(", "),
                expected: expected.join(", "),
                row: row.column_dump(),
            });
        }

        let mut values = Vec::with_capacity(self.shape.params.len());
        for param in &self.shape.params {
            let value = (param.decode)(registry, row, param.column).map_err(|err| match err {
                // A narrowing failure gains the constructor context; null
                // and structural errors already name what went wrong.
                source @ MapError::Decode { .. } => MapError::ConstructorCall {
                    target: self.shape.type_name.to_string(),
                    param: param.name.to_string(),
                    source: Box::new(source),
                },
                other => other,
            })?;
            values.push(value);
        }
        (self.shape.construct)(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::shape::{take_value, ParamSpec};
    use row_view::SqlValue;
    use std::any::Any;

    #[derive(Debug, PartialEq)]
    struct User {
        id: i32,
        name: String,
    }

    fn user_shape() -> RecordShape<User> {
        RecordShape {
            type_name: "User",
            params: vec![
                ParamSpec {
                    name: "id",
                    column: "id",
                    nullable: false,
                    flatten: false,
                    decode: |registry, row, column| {
                        let value = registry.resolve_decoder::<i32>()?.decode(row, column)?;
                        let value = value.ok_or_else(|| {
                            MapError::null_into_non_nullable("id", "i32")
                        })?;
                        Ok(Box::new(value) as Box<dyn Any>)
                    },
                },
                ParamSpec {
                    name: "name",
                    column: "name",
                    nullable: false,
                    flatten: false,
                    decode: |registry, row, column| {
                        let value = registry.resolve_decoder::<String>()?.decode(row, column)?;
                        let value = value.ok_or_else(|| {
                            MapError::null_into_non_nullable("name", "String")
                        })?;
                        Ok(Box::new(value) as Box<dyn Any>)
                    },
                },
            ],
            construct: |values| {
                let mut values = values.into_iter();
                Ok(User {
                    id: take_value::<i32>(&mut values, "id")?,
                    name: take_value::<String>(&mut values, "name")?,
                })
            },
        }
    }

    #[test]
    fn test_parses_full_row() {
        let registry = TypeRegistry::default();
        let parser = ConstructorParser::new(user_shape());
        let row = SqlRow::new(vec![
            ("id".to_string(), SqlValue::Integer(5)),
            ("name".to_string(), SqlValue::Text("Ada".to_string())),
        ])
        .unwrap();
        assert_eq!(
            parser.parse(&registry, &row).unwrap(),
            User {
                id: 5,
                name: "Ada".to_string()
            }
        );
    }

    #[test]
    fn test_missing_column_reported_before_decoding() {
        let registry = TypeRegistry::default();
        let parser = ConstructorParser::new(user_shape());
        let row = SqlRow::new(vec![("id".to_string(), SqlValue::Integer(5))]).unwrap();
        match parser.parse(&registry, &row).unwrap_err() {
            MapError::MissingColumns {
                target, missing, ..
            } => {
                assert_eq!(target, "User");
                assert_eq!(missing, "name");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_into_non_nullable_is_not_wrapped() {
        let registry = TypeRegistry::default();
        let parser = ConstructorParser::new(user_shape());
        let row = SqlRow::new(vec![
            ("id".to_string(), SqlValue::Integer(5)),
            ("name".to_string(), SqlValue::Null),
        ])
        .unwrap();
        assert!(matches!(
            parser.parse(&registry, &row).unwrap_err(),
            MapError::NullIntoNonNullable { .. }
        ));
    }

    #[test]
    fn test_decode_failure_names_constructor_param() {
        let registry = TypeRegistry::default();
        let parser = ConstructorParser::new(user_shape());
        let row = SqlRow::new(vec![
            ("id".to_string(), SqlValue::Text("five".to_string())),
            ("name".to_string(), SqlValue::Text("Ada".to_string())),
        ])
        .unwrap();
        match parser.parse(&registry, &row).unwrap_err() {
            MapError::ConstructorCall { target, param, .. } => {
                assert_eq!(target, "User");
                assert_eq!(param, "id");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
