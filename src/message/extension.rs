use std::fmt;

use crate::util::{be_u16, length_u16, write_u16_prefixed};
use crate::Error;

use super::{
    ExtensionRegistry, KeyShareExtension, ParseResult, PskKeyExchangeModesExtension,
    ServerNameExtension, SignatureAlgorithmsExtension, SupportedGroupsExtension,
    SupportedVersionsExtension,
};

/// A typed extension body with a fixed extension type.
///
/// Implementors decode from and encode to the bytes inside the outer
/// type/length wrapper.
pub trait ExtensionData: Sized {
    const TYPE: ExtensionType;

    /// Diagnostic name, also used as the field name in length errors.
    const NAME: &'static str;

    fn decode_body(input: &[u8]) -> ParseResult<'_, Self>;

    fn encode_body(&self, output: &mut Vec<u8>) -> Result<(), Error>;

    fn into_extension(self) -> Extension;

    fn from_extension(ext: &Extension) -> Option<&Self>;
}

/// One ClientHello extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    ServerName(ServerNameExtension),
    SupportedVersions(SupportedVersionsExtension),
    SupportedGroups(SupportedGroupsExtension),
    SignatureAlgorithms(SignatureAlgorithmsExtension),
    PskKeyExchangeModes(PskKeyExchangeModesExtension),
    KeyShare(KeyShareExtension),
    /// Any extension without a registered codec. The body is kept as is.
    Opaque(OpaqueExtension),
}

impl Extension {
    pub fn extension_type(&self) -> ExtensionType {
        match self {
            Extension::ServerName(_) => ServerNameExtension::TYPE,
            Extension::SupportedVersions(_) => SupportedVersionsExtension::TYPE,
            Extension::SupportedGroups(_) => SupportedGroupsExtension::TYPE,
            Extension::SignatureAlgorithms(_) => SignatureAlgorithmsExtension::TYPE,
            Extension::PskKeyExchangeModes(_) => PskKeyExchangeModesExtension::TYPE,
            Extension::KeyShare(_) => KeyShareExtension::TYPE,
            Extension::Opaque(o) => o.extension_type,
        }
    }

    /// Parse one type/length/body extension, decoding the body with `registry`.
    pub fn parse<'a>(input: &'a [u8], registry: &ExtensionRegistry) -> ParseResult<'a, Extension> {
        let (input, extension_type) = ExtensionType::parse(input)?;
        let (input, body) = length_u16("extension_data", input)?;
        let (_, extension) = registry.decode(extension_type, body)?;
        Ok((input, extension))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        output.extend_from_slice(&self.extension_type().as_u16().to_be_bytes());
        write_u16_prefixed("extension_data", output, |out| self.serialize_body(out))
    }

    /// Write only the body, without the type/length wrapper.
    pub fn serialize_body(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        match self {
            Extension::ServerName(e) => e.encode_body(output),
            Extension::SupportedVersions(e) => e.encode_body(output),
            Extension::SupportedGroups(e) => e.encode_body(output),
            Extension::SignatureAlgorithms(e) => e.encode_body(output),
            Extension::PskKeyExchangeModes(e) => e.encode_body(output),
            Extension::KeyShare(e) => e.encode_body(output),
            Extension::Opaque(o) => {
                output.extend_from_slice(&o.data);
                Ok(())
            }
        }
    }
}

macro_rules! impl_from_body {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Extension {
                fn from(value: $ty) -> Self {
                    Extension::$variant(value)
                }
            }
        )*
    };
}

impl_from_body!(
    ServerName(ServerNameExtension),
    SupportedVersions(SupportedVersionsExtension),
    SupportedGroups(SupportedGroupsExtension),
    SignatureAlgorithms(SignatureAlgorithmsExtension),
    PskKeyExchangeModes(PskKeyExchangeModesExtension),
    KeyShare(KeyShareExtension),
    Opaque(OpaqueExtension),
);

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extension::ServerName(e) => write!(f, "{}", e),
            Extension::SupportedVersions(e) => write!(f, "{}", e),
            Extension::SupportedGroups(e) => write!(f, "{}", e),
            Extension::SignatureAlgorithms(e) => write!(f, "{}", e),
            Extension::PskKeyExchangeModes(e) => write!(f, "{}", e),
            Extension::KeyShare(e) => write!(f, "{}", e),
            Extension::Opaque(e) => write!(f, "{}", e),
        }
    }
}

/// Extension passed through without interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueExtension {
    pub extension_type: ExtensionType,
    pub data: Vec<u8>,
}

impl OpaqueExtension {
    pub fn new(extension_type: ExtensionType, data: Vec<u8>) -> Self {
        OpaqueExtension {
            extension_type,
            data,
        }
    }
}

impl fmt::Display for OpaqueExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Opaque {{ type: {}, len: {} }}",
            self.extension_type,
            self.data.len()
        )
    }
}

/// The extensions of a hello, at most one per type, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extensions(Vec<Extension>);

impl Extensions {
    pub fn new() -> Self {
        Extensions(Vec::new())
    }

    /// Add an extension. An existing extension of the same type is replaced
    /// in its original position and returned.
    pub fn insert(&mut self, extension: Extension) -> Option<Extension> {
        let t = extension.extension_type();
        match self.0.iter_mut().find(|e| e.extension_type() == t) {
            Some(existing) => Some(std::mem::replace(existing, extension)),
            None => {
                self.0.push(extension);
                None
            }
        }
    }

    pub fn get(&self, extension_type: ExtensionType) -> Option<&Extension> {
        self.0.iter().find(|e| e.extension_type() == extension_type)
    }

    /// Look up an extension by its typed body.
    pub fn find<T: ExtensionData>(&self) -> Option<&T> {
        self.get(T::TYPE).and_then(T::from_extension)
    }

    pub fn contains(&self, extension_type: ExtensionType) -> bool {
        self.get(extension_type).is_some()
    }

    pub fn remove(&mut self, extension_type: ExtensionType) -> Option<Extension> {
        let idx = self
            .0
            .iter()
            .position(|e| e.extension_type() == extension_type)?;
        Some(self.0.remove(idx))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Extension> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a u16 length prefixed extension block.
    pub fn parse<'a>(input: &'a [u8], registry: &ExtensionRegistry) -> ParseResult<'a, Extensions> {
        let (input, data) = length_u16("extensions", input)?;
        let (_, extensions) = registry.parse_list(data)?;
        Ok((input, extensions))
    }

    /// Write the extension block, u16 length prefix included.
    pub fn serialize(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        write_u16_prefixed("extensions", output, |out| {
            for extension in &self.0 {
                extension.serialize(out)?;
            }
            Ok(())
        })
    }
}

impl FromIterator<Extension> for Extensions {
    fn from_iter<I: IntoIterator<Item = Extension>>(iter: I) -> Self {
        let mut extensions = Extensions::new();
        for e in iter {
            extensions.insert(e);
        }
        extensions
    }
}

impl<'a> IntoIterator for &'a Extensions {
    type Item = &'a Extension;
    type IntoIter = std::slice::Iter<'a, Extension>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", e)?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionType {
    ServerName,
    MaxFragmentLength,
    StatusRequest,
    SupportedGroups,
    EcPointFormats,
    SignatureAlgorithms,
    UseSrtp,
    Heartbeat,
    ApplicationLayerProtocolNegotiation,
    SignedCertificateTimestamp,
    ClientCertificateType,
    ServerCertificateType,
    Padding,
    EncryptThenMac,
    ExtendedMasterSecret,
    SessionTicket,
    PreSharedKey,
    EarlyData,
    SupportedVersions,
    Cookie,
    PskKeyExchangeModes,
    CertificateAuthorities,
    OidFilters,
    PostHandshakeAuth,
    SignatureAlgorithmsCert,
    KeyShare,
    RenegotiationInfo,
    Unknown(u16),
}

impl ExtensionType {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0000 => ExtensionType::ServerName,
            0x0001 => ExtensionType::MaxFragmentLength,
            0x0005 => ExtensionType::StatusRequest,
            0x000A => ExtensionType::SupportedGroups,
            0x000B => ExtensionType::EcPointFormats,
            0x000D => ExtensionType::SignatureAlgorithms,
            0x000E => ExtensionType::UseSrtp,
            0x000F => ExtensionType::Heartbeat,
            0x0010 => ExtensionType::ApplicationLayerProtocolNegotiation,
            0x0012 => ExtensionType::SignedCertificateTimestamp,
            0x0013 => ExtensionType::ClientCertificateType,
            0x0014 => ExtensionType::ServerCertificateType,
            0x0015 => ExtensionType::Padding,
            0x0016 => ExtensionType::EncryptThenMac,
            0x0017 => ExtensionType::ExtendedMasterSecret,
            0x0023 => ExtensionType::SessionTicket,
            0x0029 => ExtensionType::PreSharedKey,
            0x002A => ExtensionType::EarlyData,
            0x002B => ExtensionType::SupportedVersions,
            0x002C => ExtensionType::Cookie,
            0x002D => ExtensionType::PskKeyExchangeModes,
            0x002F => ExtensionType::CertificateAuthorities,
            0x0030 => ExtensionType::OidFilters,
            0x0031 => ExtensionType::PostHandshakeAuth,
            0x0032 => ExtensionType::SignatureAlgorithmsCert,
            0x0033 => ExtensionType::KeyShare,
            0xFF01 => ExtensionType::RenegotiationInfo,
            _ => ExtensionType::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            ExtensionType::ServerName => 0x0000,
            ExtensionType::MaxFragmentLength => 0x0001,
            ExtensionType::StatusRequest => 0x0005,
            ExtensionType::SupportedGroups => 0x000A,
            ExtensionType::EcPointFormats => 0x000B,
            ExtensionType::SignatureAlgorithms => 0x000D,
            ExtensionType::UseSrtp => 0x000E,
            ExtensionType::Heartbeat => 0x000F,
            ExtensionType::ApplicationLayerProtocolNegotiation => 0x0010,
            ExtensionType::SignedCertificateTimestamp => 0x0012,
            ExtensionType::ClientCertificateType => 0x0013,
            ExtensionType::ServerCertificateType => 0x0014,
            ExtensionType::Padding => 0x0015,
            ExtensionType::EncryptThenMac => 0x0016,
            ExtensionType::ExtendedMasterSecret => 0x0017,
            ExtensionType::SessionTicket => 0x0023,
            ExtensionType::PreSharedKey => 0x0029,
            ExtensionType::EarlyData => 0x002A,
            ExtensionType::SupportedVersions => 0x002B,
            ExtensionType::Cookie => 0x002C,
            ExtensionType::PskKeyExchangeModes => 0x002D,
            ExtensionType::CertificateAuthorities => 0x002F,
            ExtensionType::OidFilters => 0x0030,
            ExtensionType::PostHandshakeAuth => 0x0031,
            ExtensionType::SignatureAlgorithmsCert => 0x0032,
            ExtensionType::KeyShare => 0x0033,
            ExtensionType::RenegotiationInfo => 0xFF01,
            ExtensionType::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, ExtensionType> {
        let (input, value) = be_u16(input)?;
        Ok((input, ExtensionType::from_u16(value)))
    }
}

impl From<u16> for ExtensionType {
    fn from(value: u16) -> Self {
        ExtensionType::from_u16(value)
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionType::Unknown(v) => write!(f, "Unknown(0x{:04x})", v),
            _ => write!(f, "{:?}", self),
        }
    }
}
