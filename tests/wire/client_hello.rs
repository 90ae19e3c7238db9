
use tls13wire::message::{
    CipherSuite, ClientHello, CompressionMethod, Extension, ExtensionType, Handshake, NamedGroup,
    OpaqueExtension, Plaintext, ProtocolVersion, PskKeyExchangeMode, Random, SessionId,
    SignatureScheme, SupportedVersionsExtension,
};
use tls13wire::Error;

use crate::common::*;

#[test]
fn client_hello_with_supported_versions_only() {
    init();

    let mut rng = rng(1);
    let hello = ClientHello::builder(&mut rng)
        .cipher_suites([CipherSuite::TLS_AES_128_GCM_SHA256])
        .compression_methods([CompressionMethod::Null])
        .extension(SupportedVersionsExtension::tls13(false))
        .build();

    let mut body = Vec::new();
    hello.serialize(&mut body).unwrap();

    let record = Plaintext::handshake(Handshake::client_hello(hello.clone()));
    let bytes = record.to_bytes().unwrap();

    let record_len = u16::from_be_bytes([bytes[3], bytes[4]]) as usize;
    assert_eq!(record_len, HANDSHAKE_HEADER_LEN + body.len());
    assert_eq!(bytes.len(), RECORD_HEADER_LEN + record_len);

    // 2 + 32 + 1 + (2 + 2) + (1 + 1) + (2 + 4 + 3)
    assert_eq!(body.len(), 50);

    let decoded = Plaintext::decode(&bytes).unwrap();
    let parsed = decoded.as_handshake().unwrap().as_client_hello().unwrap();

    assert_eq!(
        parsed.cipher_suites.as_slice(),
        &[CipherSuite::TLS_AES_128_GCM_SHA256]
    );
    assert_eq!(
        parsed.compression_methods.as_slice(),
        &[CompressionMethod::Null]
    );
    assert_eq!(parsed.extensions.len(), 1);
    assert_eq!(
        parsed.supported_versions().unwrap().versions.as_slice(),
        &[ProtocolVersion::TLS1_3]
    );
    assert!(parsed.offers_tls13());
    assert_eq!(parsed, &hello);
}

#[test]
fn every_typed_extension_roundtrips() {
    init();

    let record = full_hello_record(2);
    let bytes = record.to_bytes().unwrap();

    let decoded = Plaintext::decode(&bytes).unwrap();
    assert_eq!(decoded, record);
    assert_eq!(decoded.to_bytes().unwrap(), bytes);
}

#[test]
fn order_is_kept() {
    init();

    let mut rng = rng(3);
    let hello = ClientHello::builder(&mut rng)
        .cipher_suites([
            CipherSuite::TLS_CHACHA20_POLY1305_SHA256,
            CipherSuite::Unknown(0x00FF),
            CipherSuite::TLS_AES_128_GCM_SHA256,
        ])
        .compression_methods([CompressionMethod::Unknown(0x40), CompressionMethod::Null])
        .extension(OpaqueExtension::new(ExtensionType::Unknown(0xFE0D), vec![1, 2]))
        .extension(SupportedVersionsExtension::tls13(false))
        .extension(OpaqueExtension::new(ExtensionType::Padding, vec![0; 5]))
        .build();

    let mut bytes = Vec::new();
    hello.serialize(&mut bytes).unwrap();
    let (rest, parsed) = ClientHello::parse(&bytes).unwrap();
    assert!(rest.is_empty());

    assert_eq!(parsed.cipher_suites, hello.cipher_suites);
    assert_eq!(parsed.compression_methods, hello.compression_methods);
    let types: Vec<_> = parsed.extensions.iter().map(|e| e.extension_type()).collect();
    assert_eq!(
        types,
        [
            ExtensionType::Unknown(0xFE0D),
            ExtensionType::SupportedVersions,
            ExtensionType::Padding
        ]
    );
}

#[test]
fn unknown_extension_keeps_type_header_and_body() {
    init();

    let mut rng = rng(4);
    let hello = ClientHello::builder(&mut rng)
        .extension(OpaqueExtension::new(
            ExtensionType::Unknown(0x9999),
            vec![0xCA, 0xFE],
        ))
        .build();

    let mut bytes = Vec::new();
    hello.serialize(&mut bytes).unwrap();
    assert_eq!(
        &bytes[bytes.len() - 6..],
        &[0x99, 0x99, 0x00, 0x02, 0xCA, 0xFE]
    );

    let (_, parsed) = ClientHello::parse(&bytes).unwrap();
    let ext = parsed.extensions.get(ExtensionType::Unknown(0x9999)).unwrap();
    assert_eq!(
        ext,
        &Extension::Opaque(OpaqueExtension::new(
            ExtensionType::Unknown(0x9999),
            vec![0xCA, 0xFE]
        ))
    );

    let mut again = Vec::new();
    parsed.serialize(&mut again).unwrap();
    assert_eq!(again, bytes);
}

#[test]
fn session_id_limits() {
    init();

    let mut rng = rng(5);
    let id = SessionId::random(32, &mut rng).unwrap();
    assert_eq!(id.len(), 32);

    assert!(SessionId::try_new(&[0; 255]).is_ok());
    let err: Error = SessionId::try_new(&[0; 256]).unwrap_err().into();
    assert!(matches!(err, Error::InvalidLength(_)));

    let hello = ClientHello::builder(&mut rng)
        .random(Random::from([0x42; 32]))
        .legacy_session_id(id)
        .build();
    let mut bytes = Vec::new();
    hello.serialize(&mut bytes).unwrap();
    assert_eq!(bytes[34], 32);
    assert_eq!(&bytes[35..67], &*id);
}

#[test]
fn key_share_offer_in_hello() {
    init();

    let mut rng = rng(6);
    let hello = ClientHello::builder(&mut rng)
        .extension(
            tls13wire::message::KeyShareExtension::new()
                .with(NamedGroup::X25519, vec![0x11; 32])
                .with(NamedGroup::Secp256r1, vec![0x04; 65]),
        )
        .build();

    let mut bytes = Vec::new();
    hello.serialize(&mut bytes).unwrap();
    let (_, parsed) = ClientHello::parse(&bytes).unwrap();

    let shares = parsed.key_share().unwrap();
    let groups: Vec<_> = shares.groups().collect();
    assert_eq!(groups, [NamedGroup::X25519, NamedGroup::Secp256r1]);
    assert_eq!(shares.get(NamedGroup::X25519).unwrap(), &[0x11; 32][..]);
    assert_eq!(shares.get(NamedGroup::Secp256r1).unwrap(), &[0x04; 65][..]);
}

// ClientHello record of the simple 1-RTT trace in RFC 8448, section 3
const RFC8448_CLIENT_HELLO: &[u8] = &[
    0x16, 0x03, 0x01, 0x00, 0xC4, // record header
    0x01, 0x00, 0x00, 0xC0, // handshake header
    0x03, 0x03, // legacy_version
    0xCB, 0x34, 0xEC, 0xB1, 0xE7, 0x81, 0x63, 0xBA, 0x1C, 0x38, 0xC6, 0xDA, 0xCB, 0x19, 0x6A,
    0x6D, 0xFF, 0xA2, 0x1A, 0x8D, 0x99, 0x12, 0xEC, 0x18, 0xA2, 0xEF, 0x62, 0x83, 0x02, 0x4D,
    0xEC, 0xE7, // random
    0x00, // legacy_session_id
    0x00, 0x06, 0x13, 0x01, 0x13, 0x03, 0x13, 0x02, // cipher_suites
    0x01, 0x00, // compression_methods
    0x00, 0x91, // extensions
    0x00, 0x00, 0x00, 0x0B, 0x00, 0x09, 0x00, 0x00, 0x06, 0x73, 0x65, 0x72, 0x76, 0x65,
    0x72, // server_name "server"
    0xFF, 0x01, 0x00, 0x01, 0x00, // renegotiation_info
    0x00, 0x0A, 0x00, 0x14, 0x00, 0x12, 0x00, 0x1D, 0x00, 0x17, 0x00, 0x18, 0x00, 0x19, 0x01,
    0x00, 0x01, 0x01, 0x01, 0x02, 0x01, 0x03, 0x01, 0x04, // supported_groups
    0x00, 0x23, 0x00, 0x00, // session_ticket
    0x00, 0x33, 0x00, 0x26, 0x00, 0x24, 0x00, 0x1D, 0x00, 0x20, 0x99, 0x38, 0x1D, 0xE5, 0x60,
    0xE4, 0xBD, 0x43, 0xD2, 0x3D, 0x8E, 0x43, 0x5A, 0x7D, 0xBA, 0xFE, 0xB3, 0xC0, 0x6E, 0x51,
    0xC1, 0x3C, 0xAE, 0x4D, 0x54, 0x13, 0x69, 0x1E, 0x52, 0x9A, 0xAF, 0x2C, // key_share
    0x00, 0x2B, 0x00, 0x03, 0x02, 0x03, 0x04, // supported_versions
    0x00, 0x0D, 0x00, 0x20, 0x00, 0x1E, 0x04, 0x03, 0x05, 0x03, 0x06, 0x03, 0x02, 0x03, 0x08,
    0x04, 0x08, 0x05, 0x08, 0x06, 0x04, 0x01, 0x05, 0x01, 0x06, 0x01, 0x02, 0x01, 0x04, 0x02,
    0x05, 0x02, 0x06, 0x02, 0x02, 0x02, // signature_algorithms
    0x00, 0x2D, 0x00, 0x02, 0x01, 0x01, // psk_key_exchange_modes
    0x00, 0x1C, 0x00, 0x02, 0x40, 0x01, // record_size_limit
];

#[test]
fn captured_client_hello_roundtrip() {
    init();

    let record = Plaintext::decode(RFC8448_CLIENT_HELLO).unwrap();
    assert_eq!(record.legacy_record_version(), ProtocolVersion::TLS1_0);

    let hello = record.as_handshake().unwrap().as_client_hello().unwrap();
    assert_eq!(hello.legacy_version, ProtocolVersion::TLS1_2);
    assert_eq!(hello.random.as_bytes(), &RFC8448_CLIENT_HELLO[11..43]);
    assert!(hello.legacy_session_id.is_empty());
    assert_eq!(
        hello.cipher_suites.as_slice(),
        &[
            CipherSuite::TLS_AES_128_GCM_SHA256,
            CipherSuite::TLS_CHACHA20_POLY1305_SHA256,
            CipherSuite::TLS_AES_256_GCM_SHA384,
        ]
    );
    assert_eq!(hello.compression_methods.as_slice(), &[CompressionMethod::Null]);

    assert_eq!(hello.server_name().unwrap().host_name(), Some("server"));
    assert!(hello.offers_tls13());
    assert_eq!(
        hello.supported_groups().unwrap().groups.as_slice(),
        &[
            NamedGroup::X25519,
            NamedGroup::Secp256r1,
            NamedGroup::Secp384r1,
            NamedGroup::Secp521r1,
            NamedGroup::Ffdhe2048,
            NamedGroup::Ffdhe3072,
            NamedGroup::Ffdhe4096,
            NamedGroup::Ffdhe6144,
            NamedGroup::Ffdhe8192,
        ]
    );
    let schemes = &hello.signature_algorithms().unwrap().schemes;
    assert_eq!(schemes.len(), 15);
    assert_eq!(schemes[0], SignatureScheme::ECDSA_SECP256R1_SHA256);
    assert_eq!(schemes[11], SignatureScheme::Unknown(0x0402));
    assert_eq!(
        hello.psk_key_exchange_modes().unwrap().modes.as_slice(),
        &[PskKeyExchangeMode::PskDheKe]
    );
    let shares = hello.key_share().unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(
        shares.get(NamedGroup::X25519).unwrap(),
        &RFC8448_CLIENT_HELLO[114..146]
    );

    // renegotiation_info, session_ticket and record_size_limit have no codec
    let opaque: Vec<(u16, &[u8])> = hello
        .extensions
        .iter()
        .filter_map(|e| match e {
            Extension::Opaque(o) => Some((o.extension_type.as_u16(), o.data.as_slice())),
            _ => None,
        })
        .collect();
    assert_eq!(
        opaque,
        [
            (0xFF01, &[0x00][..]),
            (0x0023, &[][..]),
            (0x001C, &[0x40, 0x01][..]),
        ]
    );

    assert_eq!(record.to_bytes().unwrap(), RFC8448_CLIENT_HELLO);
}
