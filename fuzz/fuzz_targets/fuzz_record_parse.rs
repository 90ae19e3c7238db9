#![no_main]

//! Fuzz target for TLS record decoding.
//!
//! Feeds the input to the record decoder as is, and again wrapped in a
//! handshake record header so the fuzzer reaches the ClientHello and
//! extension parsers without first having to find a valid header.
//!
//! Anything that decodes must serialize, and decode again to the same value.

use libfuzzer_sys::fuzz_target;

use tls13wire::message::Plaintext;

/// Record header length
const HEADER_LEN: usize = 5;
/// Maximum plaintext fragment size
const MAX_FRAGMENT_SIZE: usize = 16384;

fn check(record: &[u8]) {
    let Ok(parsed) = Plaintext::decode(record) else {
        return;
    };
    let bytes = parsed.to_bytes().expect("decoded record serializes");
    let again = Plaintext::decode(&bytes).expect("serialized record decodes");
    assert_eq!(again, parsed);
}

fuzz_target!(|data: &[u8]| {
    check(data);

    if !data.is_empty() {
        let frag_len = data.len().min(MAX_FRAGMENT_SIZE);

        let mut record = Vec::with_capacity(HEADER_LEN + frag_len);
        record.push(22u8); // ContentType::Handshake
        record.extend_from_slice(&[0x03, 0x01]);
        record.extend_from_slice(&(frag_len as u16).to_be_bytes());
        record.extend_from_slice(&data[..frag_len]);

        check(&record);
    }
});
