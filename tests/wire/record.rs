use tls13wire::message::{
    Alert, AlertDescription, AlertLevel, ContentType, Fragment, HandshakeType, Plaintext,
    ProtocolVersion,
};
use tls13wire::{Config, Error};

use crate::common::*;

#[test]
fn minimal_alert_record() {
    init();

    let bytes = [0x15, 0x03, 0x03, 0x00, 0x02, 0x01, 0x00];
    let record = Plaintext::decode(&bytes).expect("decode alert record");

    assert_eq!(record.content_type(), ContentType::Alert);
    assert_eq!(record.legacy_record_version(), ProtocolVersion::TLS1_2);
    assert_eq!(
        record.as_alert().unwrap(),
        &Alert::new(AlertLevel::Warning, AlertDescription::CloseNotify)
    );

    assert_eq!(record.to_bytes().unwrap(), bytes);
}

#[test]
fn fatal_alert_built_and_decoded() {
    init();

    let record = Plaintext::alert(Alert::fatal(AlertDescription::DecodeError));
    let bytes = record.to_bytes().unwrap();
    assert_eq!(bytes, [0x15, 0x03, 0x03, 0x00, 0x02, 0x02, 0x32]);

    let decoded = Plaintext::decode(&bytes).unwrap();
    assert!(decoded.as_alert().unwrap().is_fatal());
}

#[test]
fn several_records_in_one_buffer() {
    init();

    let mut buf = full_hello_record(11).to_bytes().unwrap();
    buf.extend_from_slice(&[0x15, 0x03, 0x03, 0x00, 0x02, 0x02, 0x28]);
    buf.extend_from_slice(&[0x14, 0x03, 0x03, 0x00, 0x01, 0x01]);

    let mut input = buf.as_slice();
    let mut types = Vec::new();
    while !input.is_empty() {
        let (rest, record) = Plaintext::parse(input).expect("parse record");
        types.push(record.content_type());
        input = rest;
    }

    assert_eq!(
        types,
        [
            ContentType::Handshake,
            ContentType::Alert,
            ContentType::ChangeCipherSpec
        ]
    );
}

#[test]
fn change_cipher_spec_is_recognized_not_decoded() {
    init();

    let record = Plaintext::decode(&[0x14, 0x03, 0x03, 0x00, 0x01, 0x01]).unwrap();
    assert_eq!(record.content_type(), ContentType::ChangeCipherSpec);
    assert_eq!(record.fragment(), &Fragment::Skipped);
    assert!(matches!(
        record.as_handshake(),
        Err(Error::WrongPayload {
            expected: "Handshake",
            ..
        })
    ));
}

#[test]
fn handshake_other_than_client_hello() {
    init();

    // ServerHello, body not decoded
    let bytes = [
        0x16, 0x03, 0x03, 0x00, 0x06, // record header
        0x02, 0x00, 0x00, 0x02, // ServerHello, 2 bytes
        0x03, 0x03,
    ];
    let record = Plaintext::decode(&bytes).unwrap();
    let handshake = record.as_handshake().unwrap();
    assert_eq!(handshake.msg_type(), HandshakeType::ServerHello);
    assert_eq!(
        handshake.as_client_hello().unwrap_err(),
        Error::WrongPayload {
            expected: "ClientHello",
            found: "ServerHello".into()
        }
    );
}

#[test]
fn record_length_disagrees_with_handshake() {
    init();

    let mut bytes = full_hello_record(12).to_bytes().unwrap();
    // one byte of padding inside the record fragment
    let len = u16::from_be_bytes([bytes[3], bytes[4]]) + 1;
    bytes[3..5].copy_from_slice(&len.to_be_bytes());
    bytes.push(0);

    assert!(matches!(
        Plaintext::decode(&bytes),
        Err(Error::LengthMismatch { field: "record", .. })
    ));
}

#[test]
fn handshake_length_past_record() {
    init();

    let mut bytes = full_hello_record(13).to_bytes().unwrap();
    // handshake u24 length one more than the record holds
    let len = u32::from_be_bytes([0, bytes[6], bytes[7], bytes[8]]) + 1;
    bytes[6..9].copy_from_slice(&len.to_be_bytes()[1..]);

    assert!(matches!(
        Plaintext::decode(&bytes),
        Err(Error::LengthMismatch {
            field: "handshake",
            ..
        })
    ));
}

#[test]
fn configured_fragment_limit() {
    init();

    let bytes = full_hello_record(14).to_bytes().unwrap();
    let len = bytes.len() - RECORD_HEADER_LEN;

    let tight = Config::builder().max_fragment_len(len - 1).build().unwrap();
    assert_eq!(
        Plaintext::decode_with(&bytes, &tight).unwrap_err(),
        Error::RecordOverflow { len, max: len - 1 }
    );

    let exact = Config::builder().max_fragment_len(len).build().unwrap();
    assert!(Plaintext::decode_with(&bytes, &exact).is_ok());
}

#[test]
fn empty_input() {
    assert!(matches!(
        Plaintext::decode(&[]),
        Err(Error::Malformed { offset: 0, .. })
    ));
}
