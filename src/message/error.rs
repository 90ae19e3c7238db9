use std::fmt;

use nom::error::{ErrorKind, ParseError as NomParseError};
use nom::IResult;

use crate::Error;

use super::ExtensionType;

/// What went wrong in a nom parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A plain nom failure, such as running out of input.
    Nom(ErrorKind),
    LengthMismatch {
        field: &'static str,
        declared: usize,
        actual: usize,
    },
    DuplicateEntry(&'static str),
    InvalidHostName,
    RecordOverflow {
        len: usize,
        max: usize,
    },
    /// A codec produced an extension of another type than its TLV.
    ExtensionTypeMismatch {
        expected: ExtensionType,
        found: ExtensionType,
    },
}

/// Error type threaded through every parser in the crate.
///
/// Remembers how much input was left where the error happened, so the
/// top-level decoder can turn it into an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    remaining: usize,
}

pub type ParseResult<'a, O> = IResult<&'a [u8], O, ParseError>;

impl ParseError {
    pub fn new(kind: ParseErrorKind, input: &[u8]) -> Self {
        ParseError {
            kind,
            remaining: input.len(),
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Convert into the public error, given the length of the whole input.
    pub fn into_error(self, total: usize) -> Error {
        match self.kind {
            ParseErrorKind::Nom(kind) => Error::Malformed {
                kind,
                offset: total.saturating_sub(self.remaining),
            },
            ParseErrorKind::LengthMismatch {
                field,
                declared,
                actual,
            } => Error::LengthMismatch {
                field,
                declared,
                actual,
            },
            ParseErrorKind::DuplicateEntry(field) => Error::DuplicateEntry(field),
            ParseErrorKind::InvalidHostName => Error::InvalidHostName,
            ParseErrorKind::RecordOverflow { len, max } => Error::RecordOverflow { len, max },
            ParseErrorKind::ExtensionTypeMismatch { expected, found } => {
                Error::ExtensionTypeMismatch { expected, found }
            }
        }
    }
}

impl<'a> NomParseError<&'a [u8]> for ParseError {
    fn from_error_kind(input: &'a [u8], kind: ErrorKind) -> Self {
        ParseError::new(ParseErrorKind::Nom(kind), input)
    }

    fn append(_input: &'a [u8], _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error with {} bytes remaining: {:?}",
            self.remaining, self.kind
        )
    }
}

impl std::error::Error for ParseError {}

/// Abort the current parse with a structural error.
pub fn fail<O>(kind: ParseErrorKind, input: &[u8]) -> ParseResult<'_, O> {
    Err(nom::Err::Failure(ParseError::new(kind, input)))
}

/// Run a parser over a complete buffer and map its error to [`Error`].
pub fn finish<'a, O>(
    input: &'a [u8],
    mut parser: impl FnMut(&'a [u8]) -> ParseResult<'a, O>,
) -> Result<(&'a [u8], O), Error> {
    let total = input.len();
    match parser(input) {
        Ok(v) => Ok(v),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e.into_error(total)),
        // complete parsers never report Incomplete
        Err(nom::Err::Incomplete(_)) => Err(Error::Malformed {
            kind: ErrorKind::Eof,
            offset: total,
        }),
    }
}
