use nom::error::ErrorKind;
use thiserror::Error;

use crate::message::{ExtensionType, InvalidLength};

/// Errors produced while decoding or encoding TLS messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A length field disagrees with the bytes it claims to measure.
    #[error("{field} length mismatch: declared {declared}, actual {actual}")]
    LengthMismatch {
        field: &'static str,
        declared: usize,
        actual: usize,
    },

    /// A payload accessor was used on a message carrying another payload.
    #[error("Expected {expected} payload but got: {found}")]
    WrongPayload {
        expected: &'static str,
        found: String,
    },

    #[error("Duplicate {0} entry")]
    DuplicateEntry(&'static str),

    #[error("Host name is not ASCII")]
    InvalidHostName,

    #[error("Too big record length (> {max}) {len}")]
    RecordOverflow { len: usize, max: usize },

    /// An extension codec does not match the type it is registered or used for.
    #[error("Extension codec for {expected} produced {found}")]
    ExtensionTypeMismatch {
        expected: ExtensionType,
        found: ExtensionType,
    },

    /// A value does not fit its length prefix on serialize.
    #[error("Too long {field}: {len} > {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Input ended early or could not be read.
    #[error("Malformed input at offset {offset}: {kind:?}")]
    Malformed { kind: ErrorKind, offset: usize },

    #[error("{0}")]
    InvalidLength(#[from] InvalidLength),

    #[error("Config error: {0}")]
    ConfigError(String),
}
