use nom::number::complete as num;

use crate::message::{fail, ParseErrorKind, ParseResult};
use crate::Error;

// Concrete-error versions of the nom number parsers. Using these instead of
// the generic ones keeps `?` from needing type annotations.

#[inline(always)]
pub fn be_u8(input: &[u8]) -> ParseResult<'_, u8> {
    num::be_u8(input)
}

#[inline(always)]
pub fn be_u16(input: &[u8]) -> ParseResult<'_, u16> {
    num::be_u16(input)
}

#[inline(always)]
pub fn be_u24(input: &[u8]) -> ParseResult<'_, u32> {
    num::be_u24(input)
}

/// Split off exactly `len` bytes, failing if fewer are available.
pub fn take_len<'a>(field: &'static str, len: usize, input: &'a [u8]) -> ParseResult<'a, &'a [u8]> {
    if input.len() < len {
        return fail(
            ParseErrorKind::LengthMismatch {
                field,
                declared: len,
                actual: input.len(),
            },
            input,
        );
    }
    let (data, rest) = input.split_at(len);
    Ok((rest, data))
}

/// u8 length followed by that many bytes.
pub fn length_u8<'a>(field: &'static str, input: &'a [u8]) -> ParseResult<'a, &'a [u8]> {
    let (input, len) = be_u8(input)?;
    take_len(field, len as usize, input)
}

/// u16 length followed by that many bytes.
pub fn length_u16<'a>(field: &'static str, input: &'a [u8]) -> ParseResult<'a, &'a [u8]> {
    let (input, len) = be_u16(input)?;
    take_len(field, len as usize, input)
}

/// u24 length followed by that many bytes.
pub fn length_u24<'a>(field: &'static str, input: &'a [u8]) -> ParseResult<'a, &'a [u8]> {
    let (input, len) = be_u24(input)?;
    take_len(field, len as usize, input)
}

/// Run `f` over `data` and require that every byte is consumed.
///
/// Running out of `data` is reported as a length mismatch for `field`.
pub fn exhaust<'a, O, F>(field: &'static str, data: &'a [u8], mut f: F) -> ParseResult<'a, O>
where
    F: FnMut(&'a [u8]) -> ParseResult<'a, O>,
{
    let (rest, o) = match f(data) {
        Ok(v) => v,
        Err(nom::Err::Error(e)) => {
            return fail(
                ParseErrorKind::LengthMismatch {
                    field,
                    declared: data.len(),
                    actual: data.len().saturating_sub(e.remaining()),
                },
                data,
            );
        }
        Err(e) => return Err(e),
    };
    if !rest.is_empty() {
        return fail(
            ParseErrorKind::LengthMismatch {
                field,
                declared: data.len(),
                actual: data.len() - rest.len(),
            },
            rest,
        );
    }
    Ok((rest, o))
}

/// Parse items with `f` until `data` is used up.
///
/// A trailing partial item is reported as a length mismatch for `field`.
pub fn many_exact<'a, O, C, F>(field: &'static str, data: &'a [u8], mut f: F) -> ParseResult<'a, C>
where
    C: Default + Extend<O>,
    F: FnMut(&'a [u8]) -> ParseResult<'a, O>,
{
    let mut acc = C::default();
    let mut input = data;

    while !input.is_empty() {
        match f(input) {
            Ok((rest, o)) => {
                // infinite loop check: the parser must always consume
                if rest.len() == input.len() {
                    return fail(ParseErrorKind::Nom(nom::error::ErrorKind::Many0), input);
                }
                acc.extend(Some(o));
                input = rest;
            }
            Err(nom::Err::Error(_)) => {
                return fail(
                    ParseErrorKind::LengthMismatch {
                        field,
                        declared: data.len(),
                        actual: data.len() - input.len(),
                    },
                    input,
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok((input, acc))
}

fn write_prefixed<F>(
    field: &'static str,
    width: usize,
    output: &mut Vec<u8>,
    f: F,
) -> Result<(), Error>
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), Error>,
{
    let start = output.len();
    output.extend_from_slice(&[0; 4][..width]);

    if let Err(e) = f(output) {
        output.truncate(start);
        return Err(e);
    }

    let len = output.len() - start - width;
    let max = (1_usize << (8 * width)) - 1;
    if len > max {
        output.truncate(start);
        return Err(Error::TooLong { field, len, max });
    }

    let bytes = (len as u32).to_be_bytes();
    output[start..start + width].copy_from_slice(&bytes[4 - width..]);
    Ok(())
}

/// Write whatever `f` produces behind a u8 length computed from it.
pub fn write_u8_prefixed<F>(field: &'static str, output: &mut Vec<u8>, f: F) -> Result<(), Error>
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), Error>,
{
    write_prefixed(field, 1, output, f)
}

/// Write whatever `f` produces behind a u16 length computed from it.
pub fn write_u16_prefixed<F>(field: &'static str, output: &mut Vec<u8>, f: F) -> Result<(), Error>
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), Error>,
{
    write_prefixed(field, 2, output, f)
}

/// Write whatever `f` produces behind a u24 length computed from it.
pub fn write_u24_prefixed<F>(field: &'static str, output: &mut Vec<u8>, f: F) -> Result<(), Error>
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), Error>,
{
    write_prefixed(field, 3, output, f)
}
