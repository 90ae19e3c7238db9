//! KeyShare extension (RFC 8446 Section 4.2.8)
//!
//! The key_share extension carries the client's (EC)DHE public values, one
//! entry per offered group. Entries keep the order the client sent them in,
//! which is its preference order.

use std::fmt;

use rand::RngCore;

use crate::message::{
    fail, Extension, ExtensionData, ExtensionType, NamedGroup, ParseErrorKind, ParseResult,
};
use crate::util::{length_u16, many_exact, write_u16_prefixed};
use crate::Error;

/// A single key share entry: named group + public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyShareEntry {
    /// The named group (e.g., X25519, secp256r1).
    pub group: NamedGroup,
    /// Opaque public key bytes.
    pub key_exchange: Vec<u8>,
}

impl KeyShareEntry {
    pub fn new(group: NamedGroup, key_exchange: Vec<u8>) -> Self {
        KeyShareEntry {
            group,
            key_exchange,
        }
    }

    /// Entry filled with random bytes of the group's public key size.
    ///
    /// Returns `None` for groups without a fixed key size.
    pub fn random<R: RngCore + ?Sized>(group: NamedGroup, rng: &mut R) -> Option<Self> {
        let len = group.key_share_len()?;
        let mut key_exchange = vec![0; len];
        rng.fill_bytes(&mut key_exchange);
        Some(KeyShareEntry::new(group, key_exchange))
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, KeyShareEntry> {
        let (input, group) = NamedGroup::parse(input)?;
        let (input, key) = length_u16("key_exchange", input)?;
        Ok((input, KeyShareEntry::new(group, key.to_vec())))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        self.group.serialize(output);
        write_u16_prefixed("key_exchange", output, |out| {
            out.extend_from_slice(&self.key_exchange);
            Ok(())
        })
    }
}

/// KeyShare extension for ClientHello.
///
/// Holds at most one entry per group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyShareExtension {
    entries: Vec<KeyShareEntry>,
}

impl KeyShareExtension {
    pub fn new() -> Self {
        KeyShareExtension {
            entries: Vec::new(),
        }
    }

    /// Add an entry. An entry for the same group is replaced in place and returned.
    pub fn insert(&mut self, entry: KeyShareEntry) -> Option<KeyShareEntry> {
        match self.entries.iter_mut().find(|e| e.group == entry.group) {
            Some(existing) => Some(std::mem::replace(existing, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn with(mut self, group: NamedGroup, key_exchange: Vec<u8>) -> Self {
        self.insert(KeyShareEntry::new(group, key_exchange));
        self
    }

    pub fn get(&self, group: NamedGroup) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.group == group)
            .map(|e| e.key_exchange.as_slice())
    }

    pub fn entries(&self) -> &[KeyShareEntry] {
        &self.entries
    }

    pub fn groups(&self) -> impl Iterator<Item = NamedGroup> + '_ {
        self.entries.iter().map(|e| e.group)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the extension data from a ClientHello.
    pub fn parse(input: &[u8]) -> ParseResult<'_, KeyShareExtension> {
        let (input, data) = length_u16(Self::NAME, input)?;
        let (_, list): (_, Vec<KeyShareEntry>) = many_exact(Self::NAME, data, KeyShareEntry::parse)?;

        let mut ext = KeyShareExtension::new();
        for entry in list {
            if ext.insert(entry).is_some() {
                return fail(ParseErrorKind::DuplicateEntry("key_share group"), input);
            }
        }

        Ok((input, ext))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        write_u16_prefixed(Self::NAME, output, |out| {
            for entry in &self.entries {
                entry.serialize(out)?;
            }
            Ok(())
        })
    }
}

impl FromIterator<KeyShareEntry> for KeyShareExtension {
    fn from_iter<I: IntoIterator<Item = KeyShareEntry>>(iter: I) -> Self {
        let mut ext = KeyShareExtension::new();
        for entry in iter {
            ext.insert(entry);
        }
        ext
    }
}

impl ExtensionData for KeyShareExtension {
    const TYPE: ExtensionType = ExtensionType::KeyShare;
    const NAME: &'static str = "key_share";

    fn decode_body(input: &[u8]) -> ParseResult<'_, Self> {
        Self::parse(input)
    }

    fn encode_body(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        self.serialize(output)
    }

    fn into_extension(self) -> Extension {
        Extension::KeyShare(self)
    }

    fn from_extension(ext: &Extension) -> Option<&Self> {
        match ext {
            Extension::KeyShare(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for KeyShareExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyShare [")?;
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {} bytes", e.group, e.key_exchange.len())?;
        }
        write!(f, "]")
    }
}
