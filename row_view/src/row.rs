//! Read-only, column-indexed view over one result row
//!
//! A [`SqlRow`] is created per fetched row by the executor, consumed by the
//! mapping engine and discarded; it is never mutated and never retained.

use crate::errors::RowError;
use crate::from_sql::FromSql;
use crate::value::SqlValue;

#[derive(Debug, Clone)]
struct Column {
    name: String,
    value: SqlValue,
}

/// One result row: an ordered set of uniquely named column values
#[derive(Debug, Clone)]
pub struct SqlRow {
    columns: Vec<Column>,
    lenient_names: bool,
}

impl SqlRow {
    /// Build a row from `(name, value)` pairs
    ///
    /// Column names must be unique within the row (case-sensitive).
    pub fn new(columns: Vec<(String, SqlValue)>) -> Result<Self, RowError> {
        for (i, (name, _)) in columns.iter().enumerate() {
            if columns[..i].iter().any(|(other, _)| other == name) {
                return Err(RowError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self {
            columns: columns
                .into_iter()
                .map(|(name, value)| Column { name, value })
                .collect(),
            lenient_names: false,
        })
    }

    /// Enable the case/underscore-insensitive fallback for name lookups
    ///
    /// The exact, case-sensitive match is always tried first.
    pub fn with_lenient_names(mut self, lenient: bool) -> Self {
        self.lenient_names = lenient;
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether a column of this name exists (honoring the lenient fallback)
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Raw value of a column, if present
    pub fn raw(&self, name: &str) -> Option<&SqlValue> {
        self.find(name).map(|column| &column.value)
    }

    /// Raw value of a column, failing with the available-columns listing
    pub fn raw_required(&self, name: &str) -> Result<&SqlValue, RowError> {
        self.require(name).map(|column| &column.value)
    }

    /// Typed getter for a non-nullable column
    ///
    /// Fails if the column is absent, NULL, or cannot be narrowed to `T`.
    pub fn get<T: FromSql>(&self, name: &str) -> Result<T, RowError> {
        let column = self.require(name)?;
        if column.value.is_null() {
            return Err(RowError::UnexpectedNull {
                name: name.to_string(),
            });
        }
        T::from_sql(&column.value)
    }

    /// Typed getter for a nullable column, NULL mapping to `None`
    pub fn get_opt<T: FromSql>(&self, name: &str) -> Result<Option<T>, RowError> {
        let column = self.require(name)?;
        if column.value.is_null() {
            return Ok(None);
        }
        T::from_sql(&column.value).map(Some)
    }

    /// Column names in row order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Render every column as `name: type = value` for diagnostics
    pub fn column_dump(&self) -> String {
        self.columns
            .iter()
            .map(|c| {
                format!(
                    "{}: {} = {}",
                    c.name,
                    c.value.type_name(),
                    c.value.display_brief()
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn require(&self, name: &str) -> Result<&Column, RowError> {
        self.find(name).ok_or_else(|| RowError::ColumnNotFound {
            name: name.to_string(),
            available: self.column_names().join(", "),
        })
    }

    fn find(&self, name: &str) -> Option<&Column> {
        if let Some(column) = self.columns.iter().find(|c| c.name == name) {
            return Some(column);
        }
        if self.lenient_names {
            let wanted = normalize_name(name);
            return self
                .columns
                .iter()
                .find(|c| normalize_name(&c.name) == wanted);
        }
        None
    }
}

/// Lowercase and strip underscores, so `userId` matches `user_id`
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> SqlRow {
        SqlRow::new(vec![
            ("id".to_string(), SqlValue::Integer(5)),
            ("user_name".to_string(), SqlValue::Text("Ada".to_string())),
            ("score".to_string(), SqlValue::Null),
        ])
        .expect("unique columns")
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = SqlRow::new(vec![
            ("id".to_string(), SqlValue::Integer(1)),
            ("id".to_string(), SqlValue::Integer(2)),
        ]);
        assert!(matches!(result, Err(RowError::DuplicateColumn(_))));
    }

    #[test]
    fn test_typed_getters() {
        let row = sample_row();
        assert_eq!(row.get::<i32>("id").unwrap(), 5);
        assert_eq!(row.get::<String>("user_name").unwrap(), "Ada");
        assert_eq!(row.get_opt::<i32>("score").unwrap(), None);
    }

    #[test]
    fn test_null_into_non_nullable_getter() {
        let row = sample_row();
        let err = row.get::<i32>("score").unwrap_err();
        assert!(matches!(err, RowError::UnexpectedNull { .. }));
    }

    #[test]
    fn test_missing_column_lists_available() {
        let row = sample_row();
        let err = row.get::<i32>("missing").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing"));
        assert!(message.contains("user_name"));
    }

    #[test]
    fn test_lenient_matching_is_opt_in() {
        let row = sample_row();
        assert!(!row.contains("userName"));

        let row = row.with_lenient_names(true);
        assert!(row.contains("userName"));
        assert_eq!(row.get::<String>("USER_NAME").unwrap(), "Ada");
        // Exact match still wins
        assert_eq!(row.get::<String>("user_name").unwrap(), "Ada");
    }
}
