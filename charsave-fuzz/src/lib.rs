//! Fuzzing entry points for charsave-core
//!
//! Each entry point accepts arbitrary bytes and must not panic on them.
//! Wire them into `fuzz_target!` bodies of a cargo-fuzz project to run them
//! under libFuzzer.

use charsave_core::{
    decoder::decode_character_from_bytes, encoder::encode_character, trailer::Envelope, Bytes,
};

pub fn fuzz_decode(data: &[u8]) {
    // Try to decode - should never panic
    let _ = decode_character_from_bytes(data);
}

/// Anything that decodes must re-encode to a stable byte stream
///
/// Records carry raw f32 fields, so a NaN never compares equal to itself.
/// Stability is checked on the encoded bytes instead of the record tree.
pub fn fuzz_round_trip(data: &[u8]) {
    let Ok(first) = decode_character_from_bytes(data) else {
        return;
    };

    let encoded = encode_character(&first).expect("decoded strings always fit");
    let second = decode_character_from_bytes(&encoded).expect("re-encoded save must decode");

    assert_eq!(first.is_instantiated(), second.is_instantiated());
    assert_eq!(
        encode_character(&second).expect("decoded strings always fit"),
        encoded
    );
}

pub fn fuzz_envelope(data: &[u8]) {
    if let Ok(envelope) = Envelope::split(Bytes::copy_from_slice(data)) {
        let _ = envelope.digest_matches();
    }
}
