//! Integration tests for shape-derived row mapping
//!
//! Covers the constructor and field strategies, column renaming, flatten,
//! nullability rules and the strict resolution path.

use rowcast::prelude::*;
use std::sync::Arc;

#[derive(Debug, PartialEq, RowMapped)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub score: Option<f64>,
}

#[derive(Debug, PartialEq, RowMapped)]
pub struct Renamed {
    pub id: i32,
    #[row(rename = "user_name")]
    pub name: String,
}

#[derive(Debug, PartialEq, RowMapped)]
pub struct Audit {
    pub created_by: String,
}

#[derive(Debug, PartialEq, RowMapped)]
pub struct Post {
    pub id: i32,
    pub title: String,
    #[row(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Default, PartialEq, RowMapped)]
#[row(fields)]
pub struct Settings {
    pub retries: i32,
    pub label: String,
}

fn seeded_profile() -> Profile {
    Profile {
        nickname: "anonymous".to_string(),
        age: -1,
    }
}

#[derive(Debug, PartialEq, RowMapped)]
#[row(fields, default = "seeded_profile")]
pub struct Profile {
    pub nickname: String,
    pub age: i32,
}

fn user_row(engine: &Rowcast, score: SqlValue) -> SqlRow {
    engine
        .row(vec![
            ("id".to_string(), SqlValue::Integer(5)),
            ("name".to_string(), SqlValue::Text("Ada".to_string())),
            ("score".to_string(), score),
        ])
        .expect("valid row")
}

#[test]
fn test_constructor_mapping_with_value() {
    let engine = Rowcast::new();
    let row = user_row(&engine, SqlValue::Double(9.5));
    let user: User = engine.parse_row(&row).unwrap();
    assert_eq!(
        user,
        User {
            id: 5,
            name: "Ada".to_string(),
            score: Some(9.5),
        }
    );
}

#[test]
fn test_nullable_column_maps_to_none() {
    let engine = Rowcast::new();
    let row = user_row(&engine, SqlValue::Null);
    let user: User = engine.parse_row(&row).unwrap();
    assert_eq!(user.score, None);
}

#[test]
fn test_null_into_non_nullable_field_fails() {
    let engine = Rowcast::new();
    let row = engine
        .row(vec![
            ("id".to_string(), SqlValue::Integer(5)),
            ("name".to_string(), SqlValue::Null),
            ("score".to_string(), SqlValue::Null),
        ])
        .unwrap();
    match engine.parse_row::<User>(&row).unwrap_err() {
        MapError::NullIntoNonNullable { field, .. } => assert_eq!(field, "name"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_columns_reported_up_front() {
    let engine = Rowcast::new();
    let row = engine
        .row(vec![("id".to_string(), SqlValue::Integer(5))])
        .unwrap();
    match engine.parse_row::<User>(&row).unwrap_err() {
        MapError::MissingColumns {
            target,
            missing,
            row,
            ..
        } => {
            assert_eq!(target, "User");
            assert!(missing.contains("name"));
            assert!(missing.contains("score"));
            // The diagnostic carries the row that failed to map
            assert!(row.contains("id"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_decode_failure_names_the_parameter() {
    let engine = Rowcast::new();
    let row = engine
        .row(vec![
            ("id".to_string(), SqlValue::Text("five".to_string())),
            ("name".to_string(), SqlValue::Text("Ada".to_string())),
            ("score".to_string(), SqlValue::Null),
        ])
        .unwrap();
    match engine.parse_row::<User>(&row).unwrap_err() {
        MapError::ConstructorCall { target, param, .. } => {
            assert_eq!(target, "User");
            assert_eq!(param, "id");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_renamed_column() {
    let engine = Rowcast::new();
    let row = engine
        .row(vec![
            ("id".to_string(), SqlValue::Integer(1)),
            ("user_name".to_string(), SqlValue::Text("Ada".to_string())),
        ])
        .unwrap();
    let renamed: Renamed = engine.parse_row(&row).unwrap();
    assert_eq!(renamed.name, "Ada");
}

#[test]
fn test_flattened_member_shares_the_row() {
    let engine = Rowcast::new();
    let row = engine
        .row(vec![
            ("id".to_string(), SqlValue::Integer(10)),
            ("title".to_string(), SqlValue::Text("Hello".to_string())),
            ("created_by".to_string(), SqlValue::Text("ada".to_string())),
        ])
        .unwrap();
    let post: Post = engine.parse_row(&row).unwrap();
    assert_eq!(
        post,
        Post {
            id: 10,
            title: "Hello".to_string(),
            audit: Audit {
                created_by: "ada".to_string()
            },
        }
    );
}

#[test]
fn test_flattened_member_missing_columns_name_the_member_type() {
    let engine = Rowcast::new();
    let row = engine
        .row(vec![
            ("id".to_string(), SqlValue::Integer(10)),
            ("title".to_string(), SqlValue::Text("Hello".to_string())),
        ])
        .unwrap();
    match engine.parse_row::<Post>(&row).unwrap_err() {
        MapError::MissingColumns { target, missing, .. } => {
            assert_eq!(target, "Audit");
            assert!(missing.contains("created_by"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_field_style_keeps_defaults_for_absent_columns() {
    let engine = Rowcast::new();
    let row = engine
        .row(vec![("retries".to_string(), SqlValue::Integer(3))])
        .unwrap();
    let settings: Settings = engine.parse_row(&row).unwrap();
    assert_eq!(
        settings,
        Settings {
            retries: 3,
            label: String::new(),
        }
    );
}

#[test]
fn test_field_style_with_explicit_factory() {
    let engine = Rowcast::new();
    let row = engine
        .row(vec![("age".to_string(), SqlValue::Integer(36))])
        .unwrap();
    let profile: Profile = engine.parse_row(&row).unwrap();
    assert_eq!(profile.nickname, "anonymous");
    assert_eq!(profile.age, 36);
}

#[test]
fn test_strict_parse_requires_prior_registration() {
    let engine = Rowcast::new();
    let row = user_row(&engine, SqlValue::Null);
    match engine.parse_row_strict::<User>(&row).unwrap_err() {
        MapError::UnregisteredType(key) => assert!(key.contains("User")),
        other => panic!("unexpected error: {other:?}"),
    }

    let parser = engine.registry().resolve_row_parser::<User>().unwrap();
    engine.registry().register_parser::<User>(parser);
    assert!(engine.parse_row_strict::<User>(&row).is_ok());
}

#[test]
fn test_lenient_column_names_from_config() {
    let config = MappingConfig::new(vec!["builtin".to_string()], true);
    let engine = Rowcast::with_config(config);
    let row = engine
        .row(vec![
            ("id".to_string(), SqlValue::Integer(1)),
            ("user_name".to_string(), SqlValue::Text("Ada".to_string())),
        ])
        .unwrap();
    // Exact matching finds nothing for "userName"; the fallback does
    assert_eq!(
        engine.decode::<String>(&row, "userName").unwrap(),
        Some("Ada".to_string())
    );
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Active,
    Suspended,
}

impl EnumToken for Status {
    const VARIANTS: &'static [(&'static str, Self)] =
        &[("active", Status::Active), ("suspended", Status::Suspended)];
}

impl Keyed for Status {
    fn type_key() -> TypeKey {
        TypeKey::named(module_path!(), "Status")
    }
}

#[test]
fn test_enum_decoder_installed_through_a_pack() {
    let config = MappingConfig::new(vec!["builtin".to_string(), "app".to_string()], false);
    let engine = Rowcast::with_config(config);
    engine.add_pack(HandlerPack::new("app", |registrar: &PackRegistrar<'_>| {
        registrar.decoder::<Status>(Arc::new(EnumDecoder::<Status>::new()));
    }));

    let row = engine
        .row(vec![(
            "status".to_string(),
            SqlValue::Text("SUSPENDED".to_string()),
        )])
        .unwrap();
    let decoder = engine.registry().resolve_decoder_strict::<Status>().unwrap();
    assert_eq!(decoder.decode(&row, "status").unwrap(), Some(Status::Suspended));
}
