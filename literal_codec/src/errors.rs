//! Error types for the literal codec

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiteralError {
    /// The caller asked for more fields than the literal contains
    #[error("composite buffer exhausted after {fields_read} field(s)")]
    ExhaustedBuffer { fields_read: usize },

    #[error("malformed literal: {reason}")]
    Malformed { reason: String },

    /// Type-specific conversion of a field's raw text failed; the original
    /// conversion error is attached as the cause, never swallowed.
    #[error("cannot parse '{raw}' as {expected}")]
    Parse {
        expected: &'static str,
        raw: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A NULL field where the target shape requires a value
    #[error("unexpected NULL field at position {position}")]
    UnexpectedNull { position: usize },
}

impl LiteralError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        LiteralError::Malformed {
            reason: reason.into(),
        }
    }

    pub fn parse<E>(expected: &'static str, raw: &str, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        LiteralError::Parse {
            expected,
            raw: raw.to_string(),
            cause: Box::new(cause),
        }
    }
}
