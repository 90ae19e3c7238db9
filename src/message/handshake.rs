use std::fmt;

use crate::util::{be_u8, exhaust, length_u24, write_u24_prefixed};
use crate::Error;

use super::{standard_registry, ClientHello, ExtensionRegistry, ParseResult};

/// Handshake message: type, u24 length, body.
///
/// Only ClientHello bodies are decoded. Other message types are recognized,
/// their bytes consumed and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    msg_type: HandshakeType,
    body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    ClientHello(ClientHello),
    /// Body of a message type that is not decoded.
    Skipped,
}

impl Handshake {
    pub fn client_hello(client_hello: ClientHello) -> Self {
        Handshake {
            msg_type: HandshakeType::ClientHello,
            body: Body::ClientHello(client_hello),
        }
    }

    /// A handshake without a decoded body. It serializes with an empty body.
    ///
    /// ClientHello always needs its body and is refused with `WrongPayload`.
    pub fn skipped(msg_type: HandshakeType) -> Result<Self, Error> {
        if msg_type == HandshakeType::ClientHello {
            return Err(Error::WrongPayload {
                expected: "ClientHello",
                found: "no body".into(),
            });
        }
        Ok(Handshake {
            msg_type,
            body: Body::Skipped,
        })
    }

    pub fn msg_type(&self) -> HandshakeType {
        self.msg_type
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    pub fn as_client_hello(&self) -> Result<&ClientHello, Error> {
        match &self.body {
            Body::ClientHello(c) => Ok(c),
            Body::Skipped => Err(Error::WrongPayload {
                expected: "ClientHello",
                found: self.msg_type.to_string(),
            }),
        }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, Handshake> {
        Self::parse_with(input, standard_registry())
    }

    /// Parse, decoding ClientHello extensions with `registry`.
    pub fn parse_with<'a>(
        input: &'a [u8],
        registry: &ExtensionRegistry,
    ) -> ParseResult<'a, Handshake> {
        let (input, msg_type) = HandshakeType::parse(input)?;
        let (input, body) = length_u24("handshake", input)?;

        let body = match msg_type {
            HandshakeType::ClientHello => {
                let (_, c) = exhaust("client_hello", body, |i| {
                    ClientHello::parse_with(i, registry)
                })?;
                Body::ClientHello(c)
            }
            _ => {
                debug!("Skip handshake body of {} ({} bytes)", msg_type, body.len());
                Body::Skipped
            }
        };

        Ok((input, Handshake { msg_type, body }))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        output.push(self.msg_type.as_u8());
        write_u24_prefixed("handshake", output, |out| match &self.body {
            Body::ClientHello(c) => c.serialize(out),
            Body::Skipped => Ok(()),
        })
        .map_err(|e| {
            // drop the type byte too
            output.pop();
            e
        })
    }
}

impl fmt::Display for Handshake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            Body::ClientHello(c) => write!(f, "Handshake {{ {} }}", c),
            Body::Skipped => write!(f, "Handshake {{ {} (not decoded) }}", self.msg_type),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandshakeType {
    ClientHello,
    ServerHello,
    NewSessionTicket,
    EndOfEarlyData,
    EncryptedExtensions,
    Certificate,
    CertificateRequest,
    CertificateVerify,
    Finished,
    KeyUpdate,
    MessageHash,
    Unknown(u8),
}

impl HandshakeType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => HandshakeType::ClientHello,
            2 => HandshakeType::ServerHello,
            4 => HandshakeType::NewSessionTicket,
            5 => HandshakeType::EndOfEarlyData,
            8 => HandshakeType::EncryptedExtensions,
            11 => HandshakeType::Certificate,
            13 => HandshakeType::CertificateRequest,
            15 => HandshakeType::CertificateVerify,
            20 => HandshakeType::Finished,
            24 => HandshakeType::KeyUpdate,
            254 => HandshakeType::MessageHash,
            _ => HandshakeType::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            HandshakeType::ClientHello => 1,
            HandshakeType::ServerHello => 2,
            HandshakeType::NewSessionTicket => 4,
            HandshakeType::EndOfEarlyData => 5,
            HandshakeType::EncryptedExtensions => 8,
            HandshakeType::Certificate => 11,
            HandshakeType::CertificateRequest => 13,
            HandshakeType::CertificateVerify => 15,
            HandshakeType::Finished => 20,
            HandshakeType::KeyUpdate => 24,
            HandshakeType::MessageHash => 254,
            HandshakeType::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, HandshakeType> {
        let (input, byte) = be_u8(input)?;
        Ok((input, Self::from_u8(byte)))
    }
}

impl fmt::Display for HandshakeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandshakeType::Unknown(v) => write!(f, "Unknown({})", v),
            _ => write!(f, "{:?}", self),
        }
    }
}
