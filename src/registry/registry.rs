//! The type-keyed handler registry
//!
//! One registry instance serves the whole engine. Handler lookup is a read
//! under the cache's `RwLock`; a miss synthesizes the handler under a
//! single-flight mutex, so concurrent first resolutions of the same type
//! build the handler exactly once.

use crate::decode::{Decoder, SharedDecoder, ValueDecoder};
use crate::errors::MapError;
use crate::mapper::{ConstructorParser, FieldParser, MapperShape, RowMapped, SharedRowParser};
use crate::registry::key::{Keyed, TypeKey};
use crate::registry::packs::{builtin_pack, HandlerPack, PackRegistrar};
use crate::{debug_log, trace_log};
use config::MappingConfig;
use row_view::FromSql;
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Once, RwLock};

type HandlerMap = RwLock<HashMap<TypeKey, Box<dyn Any + Send + Sync>>>;

pub struct TypeRegistry {
    decoders: HandlerMap,
    parsers: HandlerMap,
    // Serializes synthesis after a cache miss; never held while a handler
    // runs, so parse-time lookups cannot deadlock against it.
    synthesis: Mutex<()>,
    scan: Once,
    packs: Mutex<Vec<HandlerPack>>,
    config: MappingConfig,
}

impl TypeRegistry {
    pub fn new(config: MappingConfig) -> Self {
        Self {
            decoders: RwLock::new(HashMap::new()),
            parsers: RwLock::new(HashMap::new()),
            synthesis: Mutex::new(()),
            scan: Once::new(),
            packs: Mutex::new(vec![builtin_pack()]),
            config,
        }
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Make a pack available to the discovery pass
    ///
    /// Packs added after the pass has run are ignored; add them before the
    /// first resolution.
    pub fn add_pack(&self, pack: HandlerPack) {
        lock(&self.packs).push(pack);
    }

    /// Run the one-time discovery pass over the configured namespaces
    ///
    /// Installs packs in `handler_namespaces` order. Unknown namespaces are
    /// logged and skipped. Idempotent and safe to call from any thread.
    pub fn load(&self) {
        self.scan.call_once(|| {
            let packs = lock(&self.packs);
            let registrar = PackRegistrar::new(self);
            for namespace in &self.config.handler_namespaces {
                let mut found = false;
                for pack in packs.iter().filter(|p| p.namespace() == namespace) {
                    debug_log!("installing handler pack '{}'", namespace);
                    pack.install(&registrar);
                    found = true;
                }
                if !found {
                    tracing::warn!(
                        namespace = %namespace,
                        "configured handler namespace matches no pack"
                    );
                }
            }
        });
    }

    /// Register a decoder for `T` directly; last registration wins
    pub fn register_decoder<T: Keyed>(&self, decoder: SharedDecoder<T>) {
        let key = T::type_key();
        let mut decoders = write(&self.decoders);
        if decoders.insert(key.clone(), Box::new(decoder)).is_some() {
            tracing::warn!(key = %key, "duplicate decoder registration, keeping the newest");
        }
    }

    /// Register a row parser for `T` directly; last registration wins
    pub fn register_parser<T: Keyed>(&self, parser: SharedRowParser<T>) {
        let key = T::type_key();
        let mut parsers = write(&self.parsers);
        if parsers.insert(key.clone(), Box::new(parser)).is_some() {
            tracing::warn!(key = %key, "duplicate parser registration, keeping the newest");
        }
    }

    /// Decoder for `T`, synthesizing the value-based default on a miss
    pub fn resolve_decoder<T>(&self) -> Result<SharedDecoder<T>, MapError>
    where
        T: FromSql + Keyed + Send + Sync,
    {
        self.load();
        let key = T::type_key();
        if let Some(found) = self.lookup_decoder::<T>(&key)? {
            return Ok(found);
        }

        let _flight = lock(&self.synthesis);
        // Another thread may have synthesized while we waited
        if let Some(found) = self.lookup_decoder::<T>(&key)? {
            return Ok(found);
        }
        trace_log!("synthesizing value decoder for {}", key);
        let decoder: SharedDecoder<T> = Arc::new(ValueDecoder::<T>::new());
        write(&self.decoders).insert(key, Box::new(decoder.clone()));
        Ok(decoder)
    }

    /// Decoder for `T` without synthesis; a miss is an error
    pub fn resolve_decoder_strict<T: Keyed>(&self) -> Result<SharedDecoder<T>, MapError> {
        self.load();
        let key = T::type_key();
        self.lookup_decoder::<T>(&key)?
            .ok_or_else(|| MapError::UnregisteredType(key.to_string()))
    }

    /// Row parser for `T`, synthesized from its shape on a miss
    pub fn resolve_row_parser<T: RowMapped>(&self) -> Result<SharedRowParser<T>, MapError> {
        self.load();
        let key = T::type_key();
        if let Some(found) = self.lookup_parser::<T>(&key)? {
            return Ok(found);
        }

        let _flight = lock(&self.synthesis);
        if let Some(found) = self.lookup_parser::<T>(&key)? {
            return Ok(found);
        }
        trace_log!("synthesizing row parser for {}", key);
        let parser: SharedRowParser<T> = match T::shape() {
            MapperShape::Record(shape) => Arc::new(ConstructorParser::new(shape)),
            MapperShape::Fields(shape) => Arc::new(FieldParser::new(shape)?),
        };
        write(&self.parsers).insert(key, Box::new(parser.clone()));
        Ok(parser)
    }

    /// Row parser for `T` without synthesis; a miss is an error
    pub fn resolve_row_parser_strict<T: Keyed>(&self) -> Result<SharedRowParser<T>, MapError> {
        self.load();
        let key = T::type_key();
        self.lookup_parser::<T>(&key)?
            .ok_or_else(|| MapError::UnregisteredType(key.to_string()))
    }

    fn lookup_decoder<T: 'static>(
        &self,
        key: &TypeKey,
    ) -> Result<Option<SharedDecoder<T>>, MapError> {
        match read(&self.decoders).get(key) {
            Some(entry) => entry
                .downcast_ref::<SharedDecoder<T>>()
                .cloned()
                .map(Some)
                .ok_or_else(|| handler_mismatch::<dyn Decoder<T>>(key)),
            None => Ok(None),
        }
    }

    fn lookup_parser<T: 'static>(
        &self,
        key: &TypeKey,
    ) -> Result<Option<SharedRowParser<T>>, MapError> {
        match read(&self.parsers).get(key) {
            Some(entry) => entry
                .downcast_ref::<SharedRowParser<T>>()
                .cloned()
                .map(Some)
                .ok_or_else(|| handler_mismatch::<T>(key)),
            None => Ok(None),
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(MappingConfig::default())
    }
}

/// The stored handler's erased type disagrees with the requested one
fn handler_mismatch<T: ?Sized>(key: &TypeKey) -> MapError {
    MapError::TypeMismatch {
        field: key.to_string(),
        expected: std::any::type_name::<T>().to_string(),
        actual: "registered handler of a different type".to_string(),
    }
}

// A poisoning panic in another thread does not invalidate the cache, so
// recover the guard instead of propagating.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn read<'a>(
    map: &'a HandlerMap,
) -> std::sync::RwLockReadGuard<'a, HashMap<TypeKey, Box<dyn Any + Send + Sync>>> {
    map.read().unwrap_or_else(|e| e.into_inner())
}

fn write<'a>(
    map: &'a HandlerMap,
) -> std::sync::RwLockWriteGuard<'a, HashMap<TypeKey, Box<dyn Any + Send + Sync>>> {
    map.write().unwrap_or_else(|e| e.into_inner())
}
