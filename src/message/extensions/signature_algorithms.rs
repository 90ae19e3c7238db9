use std::fmt;

use tinyvec::TinyVec;

use crate::message::{Extension, ExtensionData, ExtensionType, ParseResult};
use crate::util::{be_u16, length_u16, many_exact, write_u16_prefixed};
use crate::Error;

/// Signature schemes (RFC 8446 Section 4.2.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum SignatureScheme {
    RSA_PKCS1_SHA256,
    RSA_PKCS1_SHA384,
    RSA_PKCS1_SHA512,
    ECDSA_SECP256R1_SHA256,
    ECDSA_SECP384R1_SHA384,
    ECDSA_SECP521R1_SHA512,
    RSA_PSS_RSAE_SHA256,
    RSA_PSS_RSAE_SHA384,
    RSA_PSS_RSAE_SHA512,
    ED25519,
    ED448,
    RSA_PSS_PSS_SHA256,
    RSA_PSS_PSS_SHA384,
    RSA_PSS_PSS_SHA512,
    RSA_PKCS1_SHA1,
    ECDSA_SHA1,
    Unknown(u16),
}

impl Default for SignatureScheme {
    fn default() -> Self {
        Self::Unknown(0)
    }
}

impl SignatureScheme {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0401 => SignatureScheme::RSA_PKCS1_SHA256,
            0x0501 => SignatureScheme::RSA_PKCS1_SHA384,
            0x0601 => SignatureScheme::RSA_PKCS1_SHA512,
            0x0403 => SignatureScheme::ECDSA_SECP256R1_SHA256,
            0x0503 => SignatureScheme::ECDSA_SECP384R1_SHA384,
            0x0603 => SignatureScheme::ECDSA_SECP521R1_SHA512,
            0x0804 => SignatureScheme::RSA_PSS_RSAE_SHA256,
            0x0805 => SignatureScheme::RSA_PSS_RSAE_SHA384,
            0x0806 => SignatureScheme::RSA_PSS_RSAE_SHA512,
            0x0807 => SignatureScheme::ED25519,
            0x0808 => SignatureScheme::ED448,
            0x0809 => SignatureScheme::RSA_PSS_PSS_SHA256,
            0x080A => SignatureScheme::RSA_PSS_PSS_SHA384,
            0x080B => SignatureScheme::RSA_PSS_PSS_SHA512,
            0x0201 => SignatureScheme::RSA_PKCS1_SHA1,
            0x0203 => SignatureScheme::ECDSA_SHA1,
            _ => SignatureScheme::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            SignatureScheme::RSA_PKCS1_SHA256 => 0x0401,
            SignatureScheme::RSA_PKCS1_SHA384 => 0x0501,
            SignatureScheme::RSA_PKCS1_SHA512 => 0x0601,
            SignatureScheme::ECDSA_SECP256R1_SHA256 => 0x0403,
            SignatureScheme::ECDSA_SECP384R1_SHA384 => 0x0503,
            SignatureScheme::ECDSA_SECP521R1_SHA512 => 0x0603,
            SignatureScheme::RSA_PSS_RSAE_SHA256 => 0x0804,
            SignatureScheme::RSA_PSS_RSAE_SHA384 => 0x0805,
            SignatureScheme::RSA_PSS_RSAE_SHA512 => 0x0806,
            SignatureScheme::ED25519 => 0x0807,
            SignatureScheme::ED448 => 0x0808,
            SignatureScheme::RSA_PSS_PSS_SHA256 => 0x0809,
            SignatureScheme::RSA_PSS_PSS_SHA384 => 0x080A,
            SignatureScheme::RSA_PSS_PSS_SHA512 => 0x080B,
            SignatureScheme::RSA_PKCS1_SHA1 => 0x0201,
            SignatureScheme::ECDSA_SHA1 => 0x0203,
            SignatureScheme::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, SignatureScheme> {
        let (input, value) = be_u16(input)?;
        Ok((input, SignatureScheme::from_u16(value)))
    }

    /// A reasonable default offer for a TLS 1.3 client.
    pub fn supported() -> TinyVec<[SignatureScheme; 16]> {
        let mut schemes = TinyVec::new();
        schemes.push(SignatureScheme::ECDSA_SECP256R1_SHA256);
        schemes.push(SignatureScheme::RSA_PSS_RSAE_SHA256);
        schemes.push(SignatureScheme::RSA_PKCS1_SHA256);
        schemes.push(SignatureScheme::ECDSA_SECP384R1_SHA384);
        schemes.push(SignatureScheme::RSA_PSS_RSAE_SHA384);
        schemes.push(SignatureScheme::RSA_PKCS1_SHA384);
        schemes.push(SignatureScheme::RSA_PSS_RSAE_SHA512);
        schemes.push(SignatureScheme::RSA_PKCS1_SHA512);
        schemes.push(SignatureScheme::ED25519);
        schemes
    }
}

impl From<u16> for SignatureScheme {
    fn from(value: u16) -> Self {
        SignatureScheme::from_u16(value)
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureScheme::Unknown(v) => write!(f, "Unknown(0x{:04x})", v),
            _ => write!(f, "{}", format!("{:?}", self).to_lowercase()),
        }
    }
}

/// SignatureAlgorithms extension (RFC 8446 Section 4.2.3)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureAlgorithmsExtension {
    pub schemes: TinyVec<[SignatureScheme; 16]>,
}

impl SignatureAlgorithmsExtension {
    pub fn new(schemes: TinyVec<[SignatureScheme; 16]>) -> Self {
        SignatureAlgorithmsExtension { schemes }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, SignatureAlgorithmsExtension> {
        let (input, data) = length_u16(Self::NAME, input)?;
        let (_, schemes) = many_exact(Self::NAME, data, SignatureScheme::parse)?;
        Ok((input, SignatureAlgorithmsExtension { schemes }))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        write_u16_prefixed(Self::NAME, output, |out| {
            for scheme in &self.schemes {
                out.extend_from_slice(&scheme.as_u16().to_be_bytes());
            }
            Ok(())
        })
    }
}

impl ExtensionData for SignatureAlgorithmsExtension {
    const TYPE: ExtensionType = ExtensionType::SignatureAlgorithms;
    const NAME: &'static str = "signature_algorithms";

    fn decode_body(input: &[u8]) -> ParseResult<'_, Self> {
        Self::parse(input)
    }

    fn encode_body(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        self.serialize(output)
    }

    fn into_extension(self) -> Extension {
        Extension::SignatureAlgorithms(self)
    }

    fn from_extension(ext: &Extension) -> Option<&Self> {
        match ext {
            Extension::SignatureAlgorithms(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for SignatureAlgorithmsExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.schemes.iter().map(|s| s.to_string()).collect();
        write!(f, "SignatureAlgorithms [{}]", names.join(", "))
    }
}
