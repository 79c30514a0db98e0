//! Structural type descriptors used as cache keys
//!
//! A [`TypeKey`] is a recursive descriptor: a base identifier plus ordered
//! argument descriptors. Two keys are equal iff the base and every argument
//! match, which makes generic containers (`Vec<T>`, `Option<T>`) first-class
//! cache keys without any runtime type introspection.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeKey {
    base: String,
    args: Vec<TypeKey>,
}

impl TypeKey {
    /// Key for a non-generic type
    pub fn simple(base: &str) -> Self {
        Self {
            base: base.to_string(),
            args: Vec::new(),
        }
    }

    /// Key for a user type, qualified by its defining module
    pub fn named(module: &str, name: &str) -> Self {
        Self {
            base: format!("{}::{}", module, name),
            args: Vec::new(),
        }
    }

    /// Key for a generic type with ordered arguments
    pub fn generic(base: &str, args: Vec<TypeKey>) -> Self {
        Self {
            base: base.to_string(),
            args,
        }
    }

    /// Key for a list/array of the given element type
    pub fn list_of(element: TypeKey) -> Self {
        Self::generic("Vec", vec![element])
    }

    /// Key for a nullable wrapper of the given type
    pub fn optional(inner: TypeKey) -> Self {
        Self::generic("Option", vec![inner])
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn args(&self) -> &[TypeKey] {
        &self.args
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// Types that can describe themselves as a registry cache key
pub trait Keyed: 'static {
    fn type_key() -> TypeKey;
}

macro_rules! impl_keyed {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Keyed for $ty {
                fn type_key() -> TypeKey {
                    TypeKey::simple($name)
                }
            }
        )*
    };
}

impl_keyed!(
    bool => "bool",
    u8 => "u8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    f32 => "f32",
    f64 => "f64",
    String => "String",
    uuid::Uuid => "Uuid",
    chrono::NaiveDate => "NaiveDate",
    chrono::NaiveTime => "NaiveTime",
    chrono::NaiveDateTime => "NaiveDateTime",
    serde_json::Value => "Json",
);

impl Keyed for chrono::DateTime<chrono::Utc> {
    fn type_key() -> TypeKey {
        TypeKey::generic("DateTime", vec![TypeKey::simple("Utc")])
    }
}

impl<T: Keyed> Keyed for Option<T> {
    fn type_key() -> TypeKey {
        TypeKey::optional(T::type_key())
    }
}

impl<T: Keyed> Keyed for Vec<T> {
    fn type_key() -> TypeKey {
        TypeKey::list_of(T::type_key())
    }
}
