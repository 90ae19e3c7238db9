use std::fmt;

use crate::util::{be_u16, be_u8, exhaust, take_len, write_u16_prefixed};
use crate::{Config, Error};

use super::{
    fail, finish, standard_registry, Alert, ExtensionRegistry, Handshake, ParseErrorKind,
    ParseResult, ProtocolVersion,
};

/// Largest plaintext fragment allowed by TLS (2^14).
pub const MAX_FRAGMENT_LEN: usize = 16_384;

/// Plaintext record: content type, legacy version, u16 length, fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plaintext {
    content_type: ContentType,
    legacy_record_version: ProtocolVersion,
    fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Handshake(Handshake),
    Alert(Alert),
    /// Fragment of a content type that is not decoded.
    Skipped,
}

impl Plaintext {
    pub fn handshake(handshake: Handshake) -> Self {
        Plaintext {
            content_type: ContentType::Handshake,
            legacy_record_version: ProtocolVersion::TLS1_2,
            fragment: Fragment::Handshake(handshake),
        }
    }

    pub fn alert(alert: Alert) -> Self {
        Plaintext {
            content_type: ContentType::Alert,
            legacy_record_version: ProtocolVersion::TLS1_2,
            fragment: Fragment::Alert(alert),
        }
    }

    /// A record without a decoded fragment. It serializes with an empty fragment.
    ///
    /// Handshake and alert records always carry a payload and are refused.
    pub fn skipped(content_type: ContentType) -> Result<Self, Error> {
        let expected = match content_type {
            ContentType::Handshake => "Handshake",
            ContentType::Alert => "Alert",
            _ => {
                return Ok(Plaintext {
                    content_type,
                    legacy_record_version: ProtocolVersion::TLS1_2,
                    fragment: Fragment::Skipped,
                })
            }
        };
        Err(Error::WrongPayload {
            expected,
            found: "no fragment".into(),
        })
    }

    /// Set the legacy record version. Defaults to 0x0303.
    pub fn with_legacy_record_version(mut self, version: ProtocolVersion) -> Self {
        self.legacy_record_version = version;
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn legacy_record_version(&self) -> ProtocolVersion {
        self.legacy_record_version
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    pub fn into_fragment(self) -> Fragment {
        self.fragment
    }

    pub fn as_handshake(&self) -> Result<&Handshake, Error> {
        match &self.fragment {
            Fragment::Handshake(h) => Ok(h),
            _ => Err(self.wrong_payload("Handshake")),
        }
    }

    pub fn as_alert(&self) -> Result<&Alert, Error> {
        match &self.fragment {
            Fragment::Alert(a) => Ok(a),
            _ => Err(self.wrong_payload("Alert")),
        }
    }

    fn wrong_payload(&self, expected: &'static str) -> Error {
        Error::WrongPayload {
            expected,
            found: self.content_type.to_string(),
        }
    }

    /// Decode exactly one record from `input`.
    pub fn decode(input: &[u8]) -> Result<Plaintext, Error> {
        Self::decode_with(input, &Config::default())
    }

    /// Decode exactly one record from `input` using `config`.
    pub fn decode_with(input: &[u8], config: &Config) -> Result<Plaintext, Error> {
        let (rest, record) = finish(input, |i| Self::parse_with(i, config))?;
        if !rest.is_empty() {
            return Err(Error::LengthMismatch {
                field: "record",
                declared: input.len() - rest.len(),
                actual: input.len(),
            });
        }
        Ok(record)
    }

    /// Parse one record, returning the input after it.
    pub fn parse(input: &[u8]) -> ParseResult<'_, Plaintext> {
        Self::parse_limited(input, MAX_FRAGMENT_LEN, standard_registry())
    }

    pub fn parse_with<'a>(input: &'a [u8], config: &Config) -> ParseResult<'a, Plaintext> {
        Self::parse_limited(input, config.max_fragment_len(), config.registry())
    }

    fn parse_limited<'a>(
        input: &'a [u8],
        max: usize,
        registry: &ExtensionRegistry,
    ) -> ParseResult<'a, Plaintext> {
        let (input, content_type) = ContentType::parse(input)?;
        let (input, legacy_record_version) = ProtocolVersion::parse(input)?;
        let (rest, len) = be_u16(input)?;

        let len = len as usize;
        if len > max {
            return fail(ParseErrorKind::RecordOverflow { len, max }, input);
        }

        let (rest, data) = take_len("record", len, rest)?;

        let fragment = match content_type {
            ContentType::Handshake => {
                let (_, h) = exhaust("record", data, |i| Handshake::parse_with(i, registry))?;
                Fragment::Handshake(h)
            }
            ContentType::Alert => {
                let (_, a) = exhaust("record", data, Alert::parse)?;
                Fragment::Alert(a)
            }
            _ => {
                debug!("Skip record of {} ({} bytes)", content_type, len);
                Fragment::Skipped
            }
        };

        Ok((
            rest,
            Plaintext {
                content_type,
                legacy_record_version,
                fragment,
            },
        ))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        let start = output.len();
        output.push(self.content_type.as_u8());
        self.legacy_record_version.serialize(output);

        let r = write_u16_prefixed("record", output, |out| {
            let at = out.len();
            match &self.fragment {
                Fragment::Handshake(h) => h.serialize(out)?,
                Fragment::Alert(a) => a.serialize(out),
                Fragment::Skipped => {}
            }
            let len = out.len() - at;
            if len > MAX_FRAGMENT_LEN {
                return Err(Error::RecordOverflow {
                    len,
                    max: MAX_FRAGMENT_LEN,
                });
            }
            Ok(())
        });

        if r.is_err() {
            output.truncate(start);
        }
        r
    }

    /// Serialize into a new buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut output = Vec::new();
        self.serialize(&mut output)?;
        Ok(output)
    }
}

impl fmt::Display for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record {{ {}, {}, ", self.content_type, self.legacy_record_version)?;
        match &self.fragment {
            Fragment::Handshake(h) => write!(f, "{} }}", h),
            Fragment::Alert(a) => write!(f, "{} }}", a),
            Fragment::Skipped => write!(f, "not decoded }}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Invalid,
    ChangeCipherSpec,
    Alert,
    Handshake,
    ApplicationData,
    Unknown(u8),
}

impl ContentType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => ContentType::Invalid,
            20 => ContentType::ChangeCipherSpec,
            21 => ContentType::Alert,
            22 => ContentType::Handshake,
            23 => ContentType::ApplicationData,
            _ => ContentType::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            ContentType::Invalid => 0,
            ContentType::ChangeCipherSpec => 20,
            ContentType::Alert => 21,
            ContentType::Handshake => 22,
            ContentType::ApplicationData => 23,
            ContentType::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, ContentType> {
        let (input, byte) = be_u8(input)?;
        Ok((input, Self::from_u8(byte)))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Unknown(v) => write!(f, "Unknown({})", v),
            _ => write!(f, "{:?}", self),
        }
    }
}
