//! ServerName extension (RFC 6066 Section 3)

use std::fmt;

use crate::message::{fail, Extension, ExtensionData, ExtensionType, ParseErrorKind, ParseResult};
use crate::util::{be_u8, length_u16, write_u16_prefixed};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameType {
    HostName,
    Unknown(u8),
}

impl NameType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => NameType::HostName,
            _ => NameType::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            NameType::HostName => 0,
            NameType::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, NameType> {
        let (input, value) = be_u8(input)?;
        Ok((input, NameType::from_u8(value)))
    }
}

/// ServerName extension. Only the host_name entry is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerNameExtension {
    pub host_name: Option<String>,
}

impl ServerNameExtension {
    pub fn new(host_name: impl Into<String>) -> Self {
        ServerNameExtension {
            host_name: Some(host_name.into()),
        }
    }

    pub fn host_name(&self) -> Option<&str> {
        self.host_name.as_deref()
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, ServerNameExtension> {
        let (input, data) = length_u16(Self::NAME, input)?;

        let mut host_name = None;
        let mut rest = data;

        while !rest.is_empty() {
            let entry = rest;
            let (r, name_type) = NameType::parse(rest)?;
            let (r, name) = match length_u16("host_name", r) {
                Ok(v) => v,
                Err(nom::Err::Error(_)) => {
                    return fail(
                        ParseErrorKind::LengthMismatch {
                            field: Self::NAME,
                            declared: data.len(),
                            actual: data.len() - entry.len(),
                        },
                        entry,
                    );
                }
                Err(e) => return Err(e),
            };
            rest = r;

            match name_type {
                NameType::HostName => {
                    if host_name.is_some() {
                        return fail(ParseErrorKind::DuplicateEntry("host_name"), entry);
                    }
                    if !name.is_ascii() {
                        return fail(ParseErrorKind::InvalidHostName, entry);
                    }
                    host_name = Some(name.iter().map(|&b| b as char).collect());
                }
                NameType::Unknown(t) => {
                    debug!("Skip server name entry of type {} ({} bytes)", t, name.len());
                }
            }
        }

        Ok((input, ServerNameExtension { host_name }))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        write_u16_prefixed(Self::NAME, output, |out| {
            if let Some(name) = &self.host_name {
                if !name.is_ascii() {
                    return Err(Error::InvalidHostName);
                }
                out.push(NameType::HostName.as_u8());
                write_u16_prefixed("host_name", out, |o| {
                    o.extend_from_slice(name.as_bytes());
                    Ok(())
                })?;
            }
            Ok(())
        })
    }
}

impl ExtensionData for ServerNameExtension {
    const TYPE: ExtensionType = ExtensionType::ServerName;
    const NAME: &'static str = "server_name";

    fn decode_body(input: &[u8]) -> ParseResult<'_, Self> {
        Self::parse(input)
    }

    fn encode_body(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        self.serialize(output)
    }

    fn into_extension(self) -> Extension {
        Extension::ServerName(self)
    }

    fn from_extension(ext: &Extension) -> Option<&Self> {
        match ext {
            Extension::ServerName(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ServerNameExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host_name {
            Some(name) => write!(f, "ServerName {{ host_name: {} }}", name),
            None => write!(f, "ServerName {{}}"),
        }
    }
}
