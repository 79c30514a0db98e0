//! Type-keyed handler registry and its cache keys

pub mod key;
pub mod packs;
#[allow(clippy::module_inception)]
pub mod registry;

pub use key::{Keyed, TypeKey};
pub use packs::{builtin_pack, HandlerPack, PackRegistrar, BUILTIN_NAMESPACE};
pub use registry::TypeRegistry;
