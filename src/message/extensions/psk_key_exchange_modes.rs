//! PskKeyExchangeModes extension (RFC 8446 Section 4.2.9)

use std::fmt;

use tinyvec::TinyVec;

use crate::message::{Extension, ExtensionData, ExtensionType, ParseResult};
use crate::util::{be_u8, length_u8, many_exact, write_u8_prefixed};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PskKeyExchangeMode {
    /// PSK-only key establishment.
    PskKe,
    /// PSK with (EC)DHE key establishment.
    PskDheKe,
    Unknown(u8),
}

impl Default for PskKeyExchangeMode {
    fn default() -> Self {
        Self::Unknown(0xFF)
    }
}

impl PskKeyExchangeMode {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => PskKeyExchangeMode::PskKe,
            1 => PskKeyExchangeMode::PskDheKe,
            _ => PskKeyExchangeMode::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            PskKeyExchangeMode::PskKe => 0,
            PskKeyExchangeMode::PskDheKe => 1,
            PskKeyExchangeMode::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, PskKeyExchangeMode> {
        let (input, value) = be_u8(input)?;
        Ok((input, PskKeyExchangeMode::from_u8(value)))
    }
}

impl fmt::Display for PskKeyExchangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PskKeyExchangeMode::PskKe => write!(f, "psk_ke"),
            PskKeyExchangeMode::PskDheKe => write!(f, "psk_dhe_ke"),
            PskKeyExchangeMode::Unknown(v) => write!(f, "unknown({})", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PskKeyExchangeModesExtension {
    pub modes: TinyVec<[PskKeyExchangeMode; 2]>,
}

impl PskKeyExchangeModesExtension {
    pub fn new(modes: TinyVec<[PskKeyExchangeMode; 2]>) -> Self {
        PskKeyExchangeModesExtension { modes }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, PskKeyExchangeModesExtension> {
        let (input, data) = length_u8(Self::NAME, input)?;
        let (_, modes) = many_exact(Self::NAME, data, PskKeyExchangeMode::parse)?;
        Ok((input, PskKeyExchangeModesExtension { modes }))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        write_u8_prefixed(Self::NAME, output, |out| {
            out.extend(self.modes.iter().map(|m| m.as_u8()));
            Ok(())
        })
    }
}

impl ExtensionData for PskKeyExchangeModesExtension {
    const TYPE: ExtensionType = ExtensionType::PskKeyExchangeModes;
    const NAME: &'static str = "psk_key_exchange_modes";

    fn decode_body(input: &[u8]) -> ParseResult<'_, Self> {
        Self::parse(input)
    }

    fn encode_body(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        self.serialize(output)
    }

    fn into_extension(self) -> Extension {
        Extension::PskKeyExchangeModes(self)
    }

    fn from_extension(ext: &Extension) -> Option<&Self> {
        match ext {
            Extension::PskKeyExchangeModes(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for PskKeyExchangeModesExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.modes.iter().map(|m| m.to_string()).collect();
        write!(f, "PskKeyExchangeModes [{}]", names.join(", "))
    }
}
