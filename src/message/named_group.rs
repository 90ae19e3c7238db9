use std::fmt;

use crate::util::be_u16;

use super::ParseResult;

/// Key exchange groups (RFC 8446 Section 4.2.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedGroup {
    /// secp256r1 / P-256.
    Secp256r1,
    /// secp384r1 / P-384.
    Secp384r1,
    /// secp521r1 / P-521.
    Secp521r1,
    X25519,
    X448,
    Ffdhe2048,
    Ffdhe3072,
    Ffdhe4096,
    Ffdhe6144,
    Ffdhe8192,
    /// Unknown or unsupported group.
    Unknown(u16),
}

impl Default for NamedGroup {
    fn default() -> Self {
        Self::Unknown(0)
    }
}

impl NamedGroup {
    /// Convert a wire format u16 value to a `NamedGroup`.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0017 => NamedGroup::Secp256r1,
            0x0018 => NamedGroup::Secp384r1,
            0x0019 => NamedGroup::Secp521r1,
            0x001D => NamedGroup::X25519,
            0x001E => NamedGroup::X448,
            0x0100 => NamedGroup::Ffdhe2048,
            0x0101 => NamedGroup::Ffdhe3072,
            0x0102 => NamedGroup::Ffdhe4096,
            0x0103 => NamedGroup::Ffdhe6144,
            0x0104 => NamedGroup::Ffdhe8192,
            _ => NamedGroup::Unknown(value),
        }
    }

    /// Convert this `NamedGroup` to its wire format u16 value.
    pub fn as_u16(&self) -> u16 {
        match self {
            NamedGroup::Secp256r1 => 0x0017,
            NamedGroup::Secp384r1 => 0x0018,
            NamedGroup::Secp521r1 => 0x0019,
            NamedGroup::X25519 => 0x001D,
            NamedGroup::X448 => 0x001E,
            NamedGroup::Ffdhe2048 => 0x0100,
            NamedGroup::Ffdhe3072 => 0x0101,
            NamedGroup::Ffdhe4096 => 0x0102,
            NamedGroup::Ffdhe6144 => 0x0103,
            NamedGroup::Ffdhe8192 => 0x0104,
            NamedGroup::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, NamedGroup> {
        let (input, value) = be_u16(input)?;
        Ok((input, NamedGroup::from_u16(value)))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        output.extend_from_slice(&self.as_u16().to_be_bytes());
    }

    /// Size of a public key share for this group, where it is fixed.
    pub fn key_share_len(&self) -> Option<usize> {
        match self {
            // uncompressed SEC1 points
            NamedGroup::Secp256r1 => Some(65),
            NamedGroup::Secp384r1 => Some(97),
            NamedGroup::Secp521r1 => Some(133),
            NamedGroup::X25519 => Some(32),
            NamedGroup::X448 => Some(56),
            NamedGroup::Ffdhe2048 => Some(256),
            NamedGroup::Ffdhe3072 => Some(384),
            NamedGroup::Ffdhe4096 => Some(512),
            NamedGroup::Ffdhe6144 => Some(768),
            NamedGroup::Ffdhe8192 => Some(1024),
            NamedGroup::Unknown(_) => None,
        }
    }
}

impl From<u16> for NamedGroup {
    fn from(value: u16) -> Self {
        NamedGroup::from_u16(value)
    }
}

impl fmt::Display for NamedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use NamedGroup::*;
        write!(
            f,
            "{}",
            match self {
                Secp256r1 => "secp256r1",
                Secp384r1 => "secp384r1",
                Secp521r1 => "secp521r1",
                X25519 => "x25519",
                X448 => "x448",
                Ffdhe2048 => "ffdhe2048",
                Ffdhe3072 => "ffdhe3072",
                Ffdhe4096 => "ffdhe4096",
                Ffdhe6144 => "ffdhe6144",
                Ffdhe8192 => "ffdhe8192",
                Unknown(v) => return write!(f, "unknown(0x{:04x})", v),
            }
        )
    }
}
