use std::fmt;

use tinyvec::TinyVec;

use crate::message::{Extension, ExtensionData, ExtensionType, NamedGroup, ParseResult};
use crate::util::{length_u16, many_exact, write_u16_prefixed};
use crate::Error;

/// SupportedGroups extension (RFC 8446 Section 4.2.7)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupportedGroupsExtension {
    pub groups: TinyVec<[NamedGroup; 16]>,
}

impl SupportedGroupsExtension {
    pub fn new(groups: TinyVec<[NamedGroup; 16]>) -> Self {
        SupportedGroupsExtension { groups }
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, SupportedGroupsExtension> {
        let (input, data) = length_u16(Self::NAME, input)?;
        let (_, groups) = many_exact(Self::NAME, data, NamedGroup::parse)?;
        Ok((input, SupportedGroupsExtension { groups }))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        write_u16_prefixed(Self::NAME, output, |out| {
            for group in &self.groups {
                group.serialize(out);
            }
            Ok(())
        })
    }
}

impl ExtensionData for SupportedGroupsExtension {
    const TYPE: ExtensionType = ExtensionType::SupportedGroups;
    const NAME: &'static str = "supported_groups";

    fn decode_body(input: &[u8]) -> ParseResult<'_, Self> {
        Self::parse(input)
    }

    fn encode_body(&self, output: &mut Vec<u8>) -> Result<(), Error> {
        self.serialize(output)
    }

    fn into_extension(self) -> Extension {
        Extension::SupportedGroups(self)
    }

    fn from_extension(ext: &Extension) -> Option<&Self> {
        match ext {
            Extension::SupportedGroups(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for SupportedGroupsExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.groups.iter().map(|g| g.to_string()).collect();
        write!(f, "SupportedGroups [{}]", names.join(", "))
    }
}
