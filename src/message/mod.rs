mod alert;
mod client_hello;
mod error;
mod extension;
mod extensions;
mod handshake;
mod id;
mod named_group;
mod random;
mod record;
mod registry;
mod version;

pub use alert::{Alert, AlertDescription, AlertLevel};
pub use client_hello::{ClientHello, ClientHelloBuilder};
pub use error::{fail, finish, ParseError, ParseErrorKind, ParseResult};
pub use extension::{Extension, ExtensionData, ExtensionType, Extensions, OpaqueExtension};
pub use extensions::key_share::{KeyShareEntry, KeyShareExtension};
pub use extensions::psk_key_exchange_modes::{PskKeyExchangeMode, PskKeyExchangeModesExtension};
pub use extensions::server_name::{NameType, ServerNameExtension};
pub use extensions::signature_algorithms::{SignatureAlgorithmsExtension, SignatureScheme};
pub use extensions::supported_groups::SupportedGroupsExtension;
pub use extensions::supported_versions::SupportedVersionsExtension;
pub use handshake::{Body, Handshake, HandshakeType};
pub use id::{InvalidLength, SessionId};
pub use named_group::NamedGroup;
pub use random::Random;
pub use record::{ContentType, Fragment, Plaintext, MAX_FRAGMENT_LEN};
pub use registry::{standard_registry, ExtensionCodec, ExtensionRegistry};
pub use version::{version_name, ProtocolVersion};

use std::fmt;

use crate::util::{be_u16, be_u8};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum CipherSuite {
    TLS_AES_128_GCM_SHA256,
    TLS_AES_256_GCM_SHA384,
    TLS_CHACHA20_POLY1305_SHA256,
    TLS_AES_128_CCM_SHA256,
    TLS_AES_128_CCM_8_SHA256,
    Unknown(u16),
}

impl Default for CipherSuite {
    fn default() -> Self {
        Self::Unknown(0)
    }
}

impl CipherSuite {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x1301 => CipherSuite::TLS_AES_128_GCM_SHA256,
            0x1302 => CipherSuite::TLS_AES_256_GCM_SHA384,
            0x1303 => CipherSuite::TLS_CHACHA20_POLY1305_SHA256,
            0x1304 => CipherSuite::TLS_AES_128_CCM_SHA256,
            0x1305 => CipherSuite::TLS_AES_128_CCM_8_SHA256,
            _ => CipherSuite::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CipherSuite::TLS_AES_128_GCM_SHA256 => 0x1301,
            CipherSuite::TLS_AES_256_GCM_SHA384 => 0x1302,
            CipherSuite::TLS_CHACHA20_POLY1305_SHA256 => 0x1303,
            CipherSuite::TLS_AES_128_CCM_SHA256 => 0x1304,
            CipherSuite::TLS_AES_128_CCM_8_SHA256 => 0x1305,
            CipherSuite::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, CipherSuite> {
        let (input, value) = be_u16(input)?;
        Ok((input, CipherSuite::from_u16(value)))
    }

    /// The TLS 1.3 suites, in default preference order.
    pub fn all() -> &'static [CipherSuite] {
        &[
            CipherSuite::TLS_AES_128_GCM_SHA256,
            CipherSuite::TLS_AES_256_GCM_SHA384,
            CipherSuite::TLS_CHACHA20_POLY1305_SHA256,
        ]
    }
}

impl From<u16> for CipherSuite {
    fn from(value: u16) -> Self {
        CipherSuite::from_u16(value)
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherSuite::Unknown(v) => write!(f, "Unknown(0x{:04x})", v),
            _ => write!(f, "{:?}", self),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
    Null,
    Deflate,
    Unknown(u8),
}

impl Default for CompressionMethod {
    fn default() -> Self {
        Self::Null
    }
}

impl CompressionMethod {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x00 => CompressionMethod::Null,
            0x01 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            CompressionMethod::Null => 0x00,
            CompressionMethod::Deflate => 0x01,
            CompressionMethod::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, CompressionMethod> {
        let (input, value) = be_u8(input)?;
        Ok((input, CompressionMethod::from_u8(value)))
    }
}

impl From<u8> for CompressionMethod {
    fn from(value: u8) -> Self {
        CompressionMethod::from_u8(value)
    }
}
