use tls13wire::message::{
    finish, standard_registry, Extension, ExtensionCodec, ExtensionRegistry, ExtensionType,
    Handshake, OpaqueExtension, ParseResult, Plaintext,
};
use tls13wire::{Config, Error};

use crate::common::*;

fn decode_extension(bytes: &[u8]) -> Result<Extension, Error> {
    let (rest, ext) = finish(bytes, |i| Extension::parse(i, standard_registry()))?;
    assert!(rest.is_empty());
    Ok(ext)
}

/// Rewrite the outer length of a single extension TLV.
fn set_outer_len(tlv: &mut [u8], len: usize) {
    tlv[2..4].copy_from_slice(&(len as u16).to_be_bytes());
}

#[test]
fn padded_body_is_a_length_mismatch() {
    init();

    for ext in typed_extensions() {
        let mut tlv = Vec::new();
        ext.serialize(&mut tlv).unwrap();
        assert_eq!(decode_extension(&tlv).unwrap(), ext);

        let body_len = tlv.len() - 4;
        tlv.push(0x00);
        set_outer_len(&mut tlv, body_len + 1);

        let err = decode_extension(&tlv).unwrap_err();
        assert!(
            matches!(err, Error::LengthMismatch { .. }),
            "{}: {:?}",
            ext.extension_type(),
            err
        );
    }
}

#[test]
fn truncated_body_is_a_length_mismatch() {
    init();

    for ext in typed_extensions() {
        let mut tlv = Vec::new();
        ext.serialize(&mut tlv).unwrap();

        let body_len = tlv.len() - 4;
        tlv.pop();
        set_outer_len(&mut tlv, body_len - 1);

        let err = decode_extension(&tlv).unwrap_err();
        assert!(
            matches!(err, Error::LengthMismatch { .. }),
            "{}: {:?}",
            ext.extension_type(),
            err
        );
    }
}

#[test]
fn outer_length_past_end() {
    init();

    let mut tlv = Vec::new();
    typed_extensions()[0].serialize(&mut tlv).unwrap();
    tlv.pop();

    assert_eq!(
        decode_extension(&tlv).unwrap_err(),
        Error::LengthMismatch {
            field: "extension_data",
            declared: tlv.len() - 3,
            actual: tlv.len() - 4
        }
    );
}

#[test]
fn duplicate_host_name_fails_whole_record() {
    init();

    let mut bytes = full_hello_record(20).to_bytes().unwrap();

    // Overwrite the single 15 byte host_name entry with three 5 byte
    // entries, two of them host names. The list length stays valid.
    let name = b"wire.example";
    let pos = bytes
        .windows(name.len())
        .position(|w| w == name)
        .expect("host name in record");
    let entry_start = pos - 3;
    let mut body = vec![0x00, 0x00, 0x02, b'a', b'b'];
    body.extend_from_slice(&[0x00, 0x00, 0x02, b'c', b'd']);
    body.extend_from_slice(&[0x05, 0x00, 0x02, b'e', b'f']);
    assert_eq!(body.len(), 15);
    bytes[entry_start..entry_start + 15].copy_from_slice(&body);

    assert_eq!(
        Plaintext::decode(&bytes).unwrap_err(),
        Error::DuplicateEntry("host_name")
    );
}

#[test]
fn empty_registry_keeps_everything_opaque() {
    init();

    let bytes = full_hello_record(21).to_bytes().unwrap();

    let config = Config::builder()
        .registry(ExtensionRegistry::new())
        .build()
        .unwrap();
    let record = Plaintext::decode_with(&bytes, &config).unwrap();
    let hello = record.as_handshake().unwrap().as_client_hello().unwrap();

    assert_eq!(hello.extensions.len(), typed_extensions().len());
    assert!(hello
        .extensions
        .iter()
        .all(|e| matches!(e, Extension::Opaque(_))));
    assert!(hello.server_name().is_none());

    assert_eq!(record.to_bytes().unwrap(), bytes);
}

#[test]
fn custom_codec_in_registry() {
    init();

    // early_data in a ClientHello has an empty body
    fn decode_early_data(input: &[u8]) -> ParseResult<'_, Extension> {
        Ok((
            input,
            Extension::Opaque(OpaqueExtension::new(ExtensionType::EarlyData, Vec::new())),
        ))
    }

    let mut registry = ExtensionRegistry::standard();
    registry.register(
        ExtensionType::EarlyData,
        ExtensionCodec::new("early_data", decode_early_data),
    )
    .unwrap();
    let config = Config::builder().registry(registry).build().unwrap();

    let mut rng = rng(22);
    let hello = tls13wire::message::ClientHello::builder(&mut rng)
        .extension(OpaqueExtension::new(ExtensionType::EarlyData, vec![0xFF]))
        .build();
    let bytes = Plaintext::handshake(Handshake::client_hello(hello))
        .to_bytes()
        .unwrap();

    // a non-empty body is left over by the codec
    assert_eq!(
        Plaintext::decode_with(&bytes, &config).unwrap_err(),
        Error::LengthMismatch {
            field: "early_data",
            declared: 1,
            actual: 0
        }
    );

    // the standard registry keeps it opaque
    assert!(Plaintext::decode(&bytes).is_ok());
}
