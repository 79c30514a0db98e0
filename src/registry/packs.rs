//! Handler packs: namespaced bundles of decoders and parsers
//!
//! A pack is installed at most once, during the registry's discovery pass,
//! and only when its namespace appears in `handler_namespaces`.

use crate::decode::{ArrayDecoder, SharedDecoder, ValueDecoder};
use crate::mapper::SharedRowParser;
use crate::registry::registry::TypeRegistry;
use crate::registry::Keyed;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use literal_codec::FromLiteral;
use row_view::FromSql;
use std::sync::Arc;
use uuid::Uuid;

/// Namespace of the built-in handler pack
pub const BUILTIN_NAMESPACE: &str = "builtin";

type InstallFn = Box<dyn Fn(&PackRegistrar<'_>) + Send + Sync>;

/// A named bundle of handlers awaiting installation
pub struct HandlerPack {
    namespace: String,
    install: InstallFn,
}

impl HandlerPack {
    pub fn new(
        namespace: impl Into<String>,
        install: impl Fn(&PackRegistrar<'_>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            install: Box::new(install),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub(crate) fn install(&self, registrar: &PackRegistrar<'_>) {
        (self.install)(registrar);
    }
}

/// Registration surface handed to a pack while it installs
pub struct PackRegistrar<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> PackRegistrar<'a> {
    pub(crate) fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Register a decoder for `T`; a later registration for the same key wins
    pub fn decoder<T: Keyed>(&self, decoder: SharedDecoder<T>) {
        self.registry.register_decoder::<T>(decoder);
    }

    /// Register a row parser for `T`; a later registration for the same key wins
    pub fn parser<T: Keyed>(&self, parser: SharedRowParser<T>) {
        self.registry.register_parser::<T>(parser);
    }
}

fn register_scalar<T>(registrar: &PackRegistrar<'_>)
where
    T: FromSql + Keyed + Send + Sync + 'static,
{
    registrar.decoder::<T>(Arc::new(ValueDecoder::<T>::new()));
}

fn register_array<T>(registrar: &PackRegistrar<'_>)
where
    T: FromSql + FromLiteral + Keyed + Send + Sync + 'static,
    Vec<T>: Keyed,
    Vec<Option<T>>: Keyed,
{
    registrar.decoder::<Vec<T>>(Arc::new(ArrayDecoder::<T>::new()));
    registrar.decoder::<Vec<Option<T>>>(Arc::new(ArrayDecoder::<T>::new()));
}

/// The pack covering every built-in scalar and array decoder
pub fn builtin_pack() -> HandlerPack {
    HandlerPack::new(BUILTIN_NAMESPACE, |registrar| {
        register_scalar::<bool>(registrar);
        register_scalar::<i16>(registrar);
        register_scalar::<i32>(registrar);
        register_scalar::<i64>(registrar);
        register_scalar::<f32>(registrar);
        register_scalar::<f64>(registrar);
        register_scalar::<String>(registrar);
        register_scalar::<Uuid>(registrar);
        register_scalar::<NaiveDate>(registrar);
        register_scalar::<NaiveTime>(registrar);
        register_scalar::<NaiveDateTime>(registrar);
        register_scalar::<DateTime<Utc>>(registrar);
        register_scalar::<Vec<u8>>(registrar);

        register_array::<bool>(registrar);
        register_array::<i16>(registrar);
        register_array::<i32>(registrar);
        register_array::<i64>(registrar);
        register_array::<f32>(registrar);
        register_array::<f64>(registrar);
        register_array::<String>(registrar);
        register_array::<Uuid>(registrar);
        register_array::<NaiveDate>(registrar);
        register_array::<NaiveTime>(registrar);
        register_array::<NaiveDateTime>(registrar);
        register_array::<DateTime<Utc>>(registrar);
    })
}
