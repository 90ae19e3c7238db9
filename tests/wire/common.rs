//! Shared helpers for wire codec integration tests.

#![allow(unused)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use tls13wire::message::{
    ClientHello, Extension, Handshake, KeyShareExtension, NamedGroup, Plaintext,
    ProtocolVersion, PskKeyExchangeMode, PskKeyExchangeModesExtension, ServerNameExtension,
    SignatureAlgorithmsExtension, SignatureScheme, SupportedGroupsExtension,
    SupportedVersionsExtension,
};
use tinyvec::tiny_vec;

/// Record header: content type, legacy version, u16 length.
pub const RECORD_HEADER_LEN: usize = 5;
/// Handshake header: message type, u24 length.
pub const HANDSHAKE_HEADER_LEN: usize = 4;

pub fn init() {
    let _ = env_logger::try_init();
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// One of every extension with a typed codec.
pub fn typed_extensions() -> Vec<Extension> {
    vec![
        ServerNameExtension::new("wire.example").into(),
        SupportedVersionsExtension::new(tiny_vec![ProtocolVersion::TLS1_3, ProtocolVersion::TLS1_2])
            .into(),
        SupportedGroupsExtension::new(tiny_vec![NamedGroup::X25519, NamedGroup::Secp256r1]).into(),
        SignatureAlgorithmsExtension::new(tiny_vec![
            SignatureScheme::ECDSA_SECP256R1_SHA256,
            SignatureScheme::RSA_PSS_RSAE_SHA256,
            SignatureScheme::ED25519
        ])
        .into(),
        PskKeyExchangeModesExtension::new([PskKeyExchangeMode::PskDheKe].into_iter().collect())
            .into(),
        KeyShareExtension::new()
            .with(NamedGroup::X25519, vec![0x25; 32])
            .into(),
    ]
}

/// A ClientHello carrying every typed extension, wrapped in a handshake record.
pub fn full_hello_record(seed: u64) -> Plaintext {
    let mut rng = rng(seed);
    let mut builder = ClientHello::builder(&mut rng);
    for e in typed_extensions() {
        builder = builder.extension(e);
    }
    Plaintext::handshake(Handshake::client_hello(builder.build()))
}
