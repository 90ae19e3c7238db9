use std::fmt;

use rand::RngCore;
use tinyvec::TinyVec;

use crate::util::{length_u16, length_u8, many_exact, write_u16_prefixed, write_u8_prefixed};
use crate::Error;

use super::{
    standard_registry, CipherSuite, CompressionMethod, Extension, ExtensionRegistry, Extensions,
    KeyShareExtension, ParseResult, ProtocolVersion, PskKeyExchangeModesExtension, Random,
    ServerNameExtension, SessionId, SignatureAlgorithmsExtension, SupportedGroupsExtension,
    SupportedVersionsExtension,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHello {
    pub legacy_version: ProtocolVersion,
    pub random: Random,
    pub legacy_session_id: SessionId,
    pub cipher_suites: TinyVec<[CipherSuite; 32]>,
    pub compression_methods: TinyVec<[CompressionMethod; 4]>,
    pub extensions: Extensions,
}

impl ClientHello {
    /// Start a ClientHello with a random drawn from `rng`.
    pub fn builder<R: RngCore + ?Sized>(rng: &mut R) -> ClientHelloBuilder {
        ClientHelloBuilder::new(Random::new(rng))
    }

    pub fn server_name(&self) -> Option<&ServerNameExtension> {
        self.extensions.find()
    }

    pub fn supported_versions(&self) -> Option<&SupportedVersionsExtension> {
        self.extensions.find()
    }

    pub fn supported_groups(&self) -> Option<&SupportedGroupsExtension> {
        self.extensions.find()
    }

    pub fn signature_algorithms(&self) -> Option<&SignatureAlgorithmsExtension> {
        self.extensions.find()
    }

    pub fn psk_key_exchange_modes(&self) -> Option<&PskKeyExchangeModesExtension> {
        self.extensions.find()
    }

    pub fn key_share(&self) -> Option<&KeyShareExtension> {
        self.extensions.find()
    }

    /// Whether the supported_versions extension lists TLS 1.3.
    ///
    /// The legacy version field is ignored, a TLS 1.3 client always sends 0x0303 there.
    pub fn offers_tls13(&self) -> bool {
        self.supported_versions()
            .map(|v| v.contains(ProtocolVersion::TLS1_3))
            .unwrap_or(false)
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, ClientHello> {
        Self::parse_with(input, standard_registry())
    }

    pub fn parse_with<'a>(
        input: &'a [u8],
        registry: &ExtensionRegistry,
    ) -> ParseResult<'a, ClientHello> {
        let (input, legacy_version) = ProtocolVersion::parse(input)?;
        let (input, random) = Random::parse(input)?;
        let (input, legacy_session_id) = SessionId::parse(input)?;

        let (input, data) = length_u16("cipher_suites", input)?;
        let (_, cipher_suites): (_, TinyVec<[CipherSuite; 32]>) =
            many_exact("cipher_suites", data, CipherSuite::parse)?;

        let (input, data) = length_u8("compression_methods", input)?;
        let (_, compression_methods): (_, TinyVec<[CompressionMethod; 4]>) =
            many_exact("compression_methods", data, CompressionMethod::parse)?;

        let (input, extensions) = Extensions::parse(input, registry)?;

        trace!(
            "ClientHello with {} cipher suites and {} extensions",
            cipher_suites.len(),
            extensions.len()
        );

        Ok((
            input,
            ClientHello {
                legacy_version,
                random,
                legacy_session_id,
                cipher_suites,
                compression_methods,
                extensions,
            },
        ))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        let start = output.len();
        let r = self.serialize_fields(output);
        if r.is_err() {
            output.truncate(start);
        }
        r
    }

    fn serialize_fields(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        self.legacy_version.serialize(output);
        self.random.serialize(output);
        self.legacy_session_id.serialize(output);

        // Byte counts, not element counts
        write_u16_prefixed("cipher_suites", output, |out| {
            for suite in &self.cipher_suites {
                out.extend_from_slice(&suite.as_u16().to_be_bytes());
            }
            Ok(())
        })?;

        write_u8_prefixed("compression_methods", output, |out| {
            out.extend(self.compression_methods.iter().map(|m| m.as_u8()));
            Ok(())
        })?;

        self.extensions.serialize(output)
    }
}

impl fmt::Display for ClientHello {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suites: Vec<String> = self.cipher_suites.iter().map(|s| s.to_string()).collect();
        write!(
            f,
            "ClientHello {{ legacy_version: {}, random: {}, session_id: {}, \
             cipher_suites: [{}], compression_methods: {:?}, extensions: {} }}",
            self.legacy_version,
            self.random,
            self.legacy_session_id,
            suites.join(", "),
            self.compression_methods.as_slice(),
            self.extensions
        )
    }
}

/// Builder for outbound ClientHello messages.
///
/// Defaults: legacy version 0x0303, empty session id, the TLS 1.3 AEAD suites,
/// null compression, no extensions.
#[derive(Debug, Clone)]
pub struct ClientHelloBuilder {
    legacy_version: ProtocolVersion,
    random: Random,
    legacy_session_id: SessionId,
    cipher_suites: TinyVec<[CipherSuite; 32]>,
    compression_methods: TinyVec<[CompressionMethod; 4]>,
    extensions: Extensions,
}

impl ClientHelloBuilder {
    fn new(random: Random) -> Self {
        let mut compression_methods = TinyVec::new();
        compression_methods.push(CompressionMethod::Null);

        ClientHelloBuilder {
            legacy_version: ProtocolVersion::TLS1_2,
            random,
            legacy_session_id: SessionId::empty(),
            cipher_suites: CipherSuite::all().iter().copied().collect(),
            compression_methods,
            extensions: Extensions::new(),
        }
    }

    pub fn legacy_version(mut self, v: ProtocolVersion) -> Self {
        self.legacy_version = v;
        self
    }

    pub fn random(mut self, random: Random) -> Self {
        self.random = random;
        self
    }

    pub fn legacy_session_id(mut self, id: SessionId) -> Self {
        self.legacy_session_id = id;
        self
    }

    /// Replace the cipher suite list, keeping the given order.
    pub fn cipher_suites(mut self, suites: impl IntoIterator<Item = CipherSuite>) -> Self {
        self.cipher_suites = suites.into_iter().collect();
        self
    }

    pub fn compression_methods(
        mut self,
        methods: impl IntoIterator<Item = CompressionMethod>,
    ) -> Self {
        self.compression_methods = methods.into_iter().collect();
        self
    }

    /// Add an extension, replacing one of the same type in place.
    pub fn extension(mut self, extension: impl Into<Extension>) -> Self {
        self.extensions.insert(extension.into());
        self
    }

    pub fn build(self) -> ClientHello {
        ClientHello {
            legacy_version: self.legacy_version,
            random: self.random,
            legacy_session_id: self.legacy_session_id,
            cipher_suites: self.cipher_suites,
            compression_methods: self.compression_methods,
            extensions: self.extensions,
        }
    }
}
