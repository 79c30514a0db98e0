//! The `Rowcast` facade tying configuration, registry and rows together

use crate::errors::MapError;
use crate::mapper::{RowMapped, SharedRowParser};
use crate::registry::{HandlerPack, Keyed, TypeRegistry};
use config::{AppConfig, ConfigError, MappingConfig};
use row_view::{FromSql, RowError, SqlRow, SqlValue};
use std::sync::Arc;

/// Entry point for row mapping
///
/// Owns the handler registry and applies the configured row-matching
/// behavior to every row it builds. Cloning is cheap and all clones share
/// one registry.
#[derive(Clone)]
pub struct Rowcast {
    registry: Arc<TypeRegistry>,
}

impl Rowcast {
    /// Engine with the default configuration (built-in handlers only)
    pub fn new() -> Self {
        Self::with_config(MappingConfig::default())
    }

    pub fn with_config(config: MappingConfig) -> Self {
        Self {
            registry: Arc::new(TypeRegistry::new(config)),
        }
    }

    /// Engine configured from `ROWCAST_CONFIG` / `./rowcast.toml`
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = AppConfig::load()?;
        Ok(Self::with_config(config.mapping))
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Make a handler pack available to the discovery pass
    pub fn add_pack(&self, pack: HandlerPack) {
        self.registry.add_pack(pack);
    }

    /// Force the discovery pass now instead of on first resolution
    pub fn load(&self) {
        self.registry.load();
    }

    /// Build a row from `(name, value)` pairs under the configured matching
    pub fn row(&self, columns: Vec<(String, SqlValue)>) -> Result<SqlRow, RowError> {
        let lenient = self.registry.config().lenient_column_names;
        Ok(SqlRow::new(columns)?.with_lenient_names(lenient))
    }

    /// Build a row from a fetched Postgres row
    pub fn row_from_pg(&self, row: &sqlx::postgres::PgRow) -> Result<SqlRow, RowError> {
        let lenient = self.registry.config().lenient_column_names;
        Ok(SqlRow::from_pg_row(row)?.with_lenient_names(lenient))
    }

    /// Map a whole row into `T` via its shape-derived parser
    pub fn parse_row<T: RowMapped>(&self, row: &SqlRow) -> Result<T, MapError> {
        self.registry
            .resolve_row_parser::<T>()?
            .parse(&self.registry, row)
    }

    /// Map a row into `T` using only explicitly registered parsers
    pub fn parse_row_strict<T: Keyed>(&self, row: &SqlRow) -> Result<T, MapError> {
        self.registry
            .resolve_row_parser_strict::<T>()?
            .parse(&self.registry, row)
    }

    /// Decode a single column of the row into `T`
    pub fn decode<T>(&self, row: &SqlRow, column: &str) -> Result<Option<T>, MapError>
    where
        T: FromSql + Keyed + Send + Sync,
    {
        self.registry.resolve_decoder::<T>()?.decode(row, column)
    }

    /// Resolve `T`'s parser once, for mapping many rows
    pub fn row_parser<T: RowMapped>(&self) -> Result<BoundRowParser<T>, MapError> {
        Ok(BoundRowParser {
            registry: Arc::clone(&self.registry),
            parser: self.registry.resolve_row_parser::<T>()?,
        })
    }
}

impl Default for Rowcast {
    fn default() -> Self {
        Self::new()
    }
}

/// A resolved parser bound to its registry
///
/// Amortizes the registry lookup across a result set.
pub struct BoundRowParser<T> {
    registry: Arc<TypeRegistry>,
    parser: SharedRowParser<T>,
}

impl<T> BoundRowParser<T> {
    pub fn parse(&self, row: &SqlRow) -> Result<T, MapError> {
        self.parser.parse(&self.registry, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::shape::{take_value, MapperShape, ParamSpec, RecordShape};
    use crate::registry::TypeKey;
    use std::any::Any;

    #[derive(Debug, PartialEq)]
    struct User {
        id: i32,
        name: String,
    }

    impl Keyed for User {
        fn type_key() -> TypeKey {
            TypeKey::named(module_path!(), "User")
        }
    }

    impl RowMapped for User {
        fn shape() -> MapperShape<Self> {
            MapperShape::Record(RecordShape {
                type_name: "User",
                params: vec![
                    ParamSpec {
                        name: "id",
                        column: "id",
                        nullable: false,
                        flatten: false,
                        decode: |registry, row, column| {
                            let value = registry
                                .resolve_decoder::<i32>()?
                                .decode(row, column)?
                                .ok_or_else(|| MapError::null_into_non_nullable("id", "i32"))?;
                            Ok(Box::new(value) as Box<dyn Any>)
                        },
                    },
                    ParamSpec {
                        name: "name",
                        column: "name",
                        nullable: false,
                        flatten: false,
                        decode: |registry, row, column| {
                            let value = registry
                                .resolve_decoder::<String>()?
                                .decode(row, column)?
                                .ok_or_else(|| {
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
            })
        }
    }

    fn columns() -> Vec<(String, SqlValue)> {
        vec![
            ("id".to_string(), SqlValue::Integer(5)),
            ("name".to_string(), SqlValue::Text("Ada".to_string())),
        ]
    }

    #[test]
    fn test_parse_row_through_facade() {
        let engine = Rowcast::new();
        let row = engine.row(columns()).unwrap();
        let user: User = engine.parse_row(&row).unwrap();
        assert_eq!(
            user,
            User {
                id: 5,
                name: "Ada".to_string()
            }
        );
    }

    #[test]
    fn test_bound_parser_reuses_resolution() {
        let engine = Rowcast::new();
        let parser = engine.row_parser::<User>().unwrap();
        for i in 0..3 {
            let row = engine
                .row(vec![
                    ("id".to_string(), SqlValue::Integer(i)),
                    ("name".to_string(), SqlValue::Text("Ada".to_string())),
                ])
                .unwrap();
            assert_eq!(parser.parse(&row).unwrap().id, i);
        }
    }

    #[test]
    fn test_strict_parse_requires_registration() {
        let engine = Rowcast::new();
        let row = engine.row(columns()).unwrap();
        assert!(matches!(
            engine.parse_row_strict::<User>(&row).unwrap_err(),
            MapError::UnregisteredType(_)
        ));

        engine
            .registry()
            .register_parser::<User>(engine.registry().resolve_row_parser::<User>().unwrap());
        assert!(engine.parse_row_strict::<User>(&row).is_ok());
    }

    #[test]
    fn test_decode_single_column() {
        let engine = Rowcast::new();
        let row = engine.row(columns()).unwrap();
        assert_eq!(engine.decode::<i32>(&row, "id").unwrap(), Some(5));
    }

    #[test]
    fn test_lenient_names_follow_config() {
        let engine = Rowcast::with_config(MappingConfig::new(vec!["builtin".to_string()], true));
        let row = engine
            .row(vec![(
                "user_name".to_string(),
                SqlValue::Text("Ada".to_string()),
            )])
            .unwrap();
        assert_eq!(
            engine.decode::<String>(&row, "userName").unwrap(),
            Some("Ada".to_string())
        );
    }
}
