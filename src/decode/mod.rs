//! Column decoders and the built-in decoder set

pub mod array;
pub mod builtin;
pub mod composite;
pub mod decoder;
pub mod enums;

pub use array::ArrayDecoder;
pub use builtin::ValueDecoder;
pub use composite::{encode_composite, encode_composite_array, CompositeArrayDecoder, CompositeDecoder};
pub use decoder::{decode_failure, raw_value, Decoder, SharedDecoder};
pub use enums::{enum_from_token, EnumDecoder, EnumToken};
