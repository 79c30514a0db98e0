//! Row-to-struct mapping: shape tables and the parsers built from them

pub mod fields;
pub mod parser;
pub mod record;
pub mod shape;

pub use fields::FieldParser;
pub use parser::{RowParser, SharedRowParser};
pub use record::ConstructorParser;
pub use shape::{
    take_value, DecodeFn, FieldShape, MapperShape, ParamSpec, RecordShape, RowMapped, SetterSpec,
};
