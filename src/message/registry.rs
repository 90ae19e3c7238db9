use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::util::exhaust;
use crate::Error;

use super::{
    fail, Extension, ExtensionData, ExtensionType, Extensions, KeyShareExtension,
    OpaqueExtension, ParseErrorKind, ParseResult, PskKeyExchangeModesExtension,
    ServerNameExtension, SignatureAlgorithmsExtension, SupportedGroupsExtension,
    SupportedVersionsExtension,
};

static STANDARD: Lazy<ExtensionRegistry> = Lazy::new(ExtensionRegistry::standard);

/// The registry with every built in extension codec.
pub fn standard_registry() -> &'static ExtensionRegistry {
    &STANDARD
}

/// Decoder for one extension type.
#[derive(Clone, Copy)]
pub struct ExtensionCodec {
    name: &'static str,
    extension_type: Option<ExtensionType>,
    decode: for<'a> fn(&'a [u8]) -> ParseResult<'a, Extension>,
}

impl ExtensionCodec {
    /// Codec for a typed extension body.
    pub fn of<T: ExtensionData>() -> Self {
        ExtensionCodec {
            name: T::NAME,
            extension_type: Some(T::TYPE),
            decode: decode_as::<T>,
        }
    }

    /// Codec from a plain decode function.
    ///
    /// Its output is checked against the extension type at decode time.
    pub fn new(name: &'static str, decode: for<'a> fn(&'a [u8]) -> ParseResult<'a, Extension>) -> Self {
        ExtensionCodec {
            name,
            extension_type: None,
            decode,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The type a typed codec always produces, `None` for plain functions.
    pub fn extension_type(&self) -> Option<ExtensionType> {
        self.extension_type
    }

    /// Decode a full extension body. Every byte must be used.
    pub fn decode<'a>(&self, body: &'a [u8]) -> ParseResult<'a, Extension> {
        exhaust(self.name, body, self.decode)
    }
}

impl fmt::Debug for ExtensionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionCodec")
            .field("name", &self.name)
            .field("extension_type", &self.extension_type)
            .finish()
    }
}

fn decode_as<T: ExtensionData>(input: &[u8]) -> ParseResult<'_, Extension> {
    let (input, body) = T::decode_body(input)?;
    Ok((input, body.into_extension()))
}

/// Maps extension type codes to codecs.
///
/// Types without a codec are kept as [`OpaqueExtension`].
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    codecs: HashMap<u16, ExtensionCodec>,
}

impl ExtensionRegistry {
    /// An empty registry. Every extension decodes as opaque.
    pub fn new() -> Self {
        ExtensionRegistry {
            codecs: HashMap::new(),
        }
    }

    /// Registry with the server_name, supported_versions, supported_groups,
    /// signature_algorithms, psk_key_exchange_modes and key_share codecs.
    pub fn standard() -> Self {
        let mut registry = ExtensionRegistry::new();
        registry.register_type::<ServerNameExtension>();
        registry.register_type::<SupportedVersionsExtension>();
        registry.register_type::<SupportedGroupsExtension>();
        registry.register_type::<SignatureAlgorithmsExtension>();
        registry.register_type::<PskKeyExchangeModesExtension>();
        registry.register_type::<KeyShareExtension>();
        registry
    }

    /// Set the codec for a type, returning the previous one.
    ///
    /// A typed codec can only be registered under its own type.
    pub fn register(
        &mut self,
        extension_type: ExtensionType,
        codec: ExtensionCodec,
    ) -> Result<Option<ExtensionCodec>, Error> {
        match codec.extension_type {
            Some(found) if found != extension_type => Err(Error::ExtensionTypeMismatch {
                expected: extension_type,
                found,
            }),
            _ => Ok(self.codecs.insert(extension_type.as_u16(), codec)),
        }
    }

    pub fn register_type<T: ExtensionData>(&mut self) -> Option<ExtensionCodec> {
        self.codecs.insert(T::TYPE.as_u16(), ExtensionCodec::of::<T>())
    }

    pub fn unregister(&mut self, extension_type: ExtensionType) -> Option<ExtensionCodec> {
        self.codecs.remove(&extension_type.as_u16())
    }

    pub fn codec(&self, extension_type: ExtensionType) -> Option<&ExtensionCodec> {
        self.codecs.get(&extension_type.as_u16())
    }

    /// Decode an extension body of the given type.
    pub fn decode<'a>(
        &self,
        extension_type: ExtensionType,
        body: &'a [u8],
    ) -> ParseResult<'a, Extension> {
        match self.codec(extension_type) {
            Some(codec) => {
                trace!("Decode {} extension ({} bytes)", codec.name(), body.len());
                let (rest, extension) = codec.decode(body)?;
                let found = extension.extension_type();
                if found != extension_type {
                    return fail(
                        ParseErrorKind::ExtensionTypeMismatch {
                            expected: extension_type,
                            found,
                        },
                        body,
                    );
                }
                Ok((rest, extension))
            }
            None => {
                debug!(
                    "No codec for extension {}, keeping {} bytes opaque",
                    extension_type,
                    body.len()
                );
                let opaque = OpaqueExtension::new(extension_type, body.to_vec());
                Ok((&body[body.len()..], Extension::Opaque(opaque)))
            }
        }
    }

    /// Walk concatenated extensions until `data` is used up.
    ///
    /// A repeated type replaces the earlier one, keeping its position.
    pub fn parse_list<'a>(&self, data: &'a [u8]) -> ParseResult<'a, Extensions> {
        let mut extensions = Extensions::new();
        let mut input = data;

        while !input.is_empty() {
            let (rest, extension) = match Extension::parse(input, self) {
                Ok(v) => v,
                // too short for the type/length header
                Err(nom::Err::Error(_)) => {
                    return fail(
                        ParseErrorKind::LengthMismatch {
                            field: "extensions",
                            declared: data.len(),
                            actual: data.len() - input.len(),
                        },
                        input,
                    );
                }
                Err(e) => return Err(e),
            };

            if let Some(old) = extensions.insert(extension) {
                debug!("Repeated extension {} replaces earlier one", old.extension_type());
            }
            input = rest;
        }

        Ok((input, extensions))
    }
}
