//! SupportedVersions extension (RFC 8446 Section 4.2.1)
//!
//! In TLS 1.3, version negotiation happens via this extension rather than
//! the legacy version field. The client sends a list of supported versions
//! in preference order.

use std::fmt;

use tinyvec::TinyVec;

use crate::message::{Extension, ExtensionData, ExtensionType, ParseResult, ProtocolVersion};
use crate::util::{length_u8, many_exact, write_u8_prefixed};
use crate::Error;

/// SupportedVersions extension for ClientHello.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupportedVersionsExtension {
    pub versions: TinyVec<[ProtocolVersion; 8]>,
}

impl SupportedVersionsExtension {
    pub fn new(versions: TinyVec<[ProtocolVersion; 8]>) -> Self {
        SupportedVersionsExtension { versions }
    }

    /// Offer TLS 1.3, and optionally TLS 1.2 for backwards compatibility.
    pub fn tls13(include_tls12: bool) -> Self {
        let mut versions = TinyVec::new();
        versions.push(ProtocolVersion::TLS1_3);
        if include_tls12 {
            versions.push(ProtocolVersion::TLS1_2);
        }
        Self { versions }
    }

    pub fn contains(&self, version: ProtocolVersion) -> bool {
        self.versions.contains(&version)
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, Self> {
        let (input, data) = length_u8(Self::NAME, input)?;
        // Unknown versions are kept, they must survive a round trip.
        let (_, versions) = many_exact(Self::NAME, data, ProtocolVersion::parse)?;
        Ok((input, Self { versions }))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        write_u8_prefixed(Self::NAME, output, |out| {
            for version in &self.versions {
                version.serialize(out);
            }
            Ok(())
        })
    }
}

impl ExtensionData for SupportedVersionsExtension {
    const TYPE: ExtensionType = ExtensionType::SupportedVersions;
    const NAME: &'static str = "supported_versions";

    fn decode_body(input: &[u8]) -> ParseResult<'_, Self> {
        Self::parse(input)
    }

    fn encode_body(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        self.serialize(output)
    }

    fn into_extension(self) -> Extension {
        Extension::SupportedVersions(self)
    }

    fn from_extension(ext: &Extension) -> Option<&Self> {
        match ext {
            Extension::SupportedVersions(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for SupportedVersionsExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SupportedVersions [")?;
        for (i, v) in self.versions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}
