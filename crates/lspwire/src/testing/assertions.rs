//! Cross-backend assertions.
//!
//! These panic with both payloads rendered so a divergence can be read
//! straight from the test output.

use lspwire_core::{Backend, DecodeError};
use lspwire_protocol::{decode_with, encode_with, WireType};

const BACKENDS: [Backend; 2] = [Backend::Standard, Backend::Streaming];

fn render(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Asserts that `value` survives an encode/decode cycle under each backend,
/// and under each pairing of encoder and decoder.
///
/// # Panics
///
/// Panics when encoding fails, decoding fails, or a decoded value differs
/// from `value`.
pub fn assert_round_trip<T: WireType>(value: &T) {
    for encoder in BACKENDS {
        let bytes = encode_with(encoder, value)
            .unwrap_or_else(|e| panic!("{encoder} failed to encode {value:?}: {e}"));
        for decoder in BACKENDS {
            let decoded: T = decode_with(decoder, &bytes).unwrap_or_else(|e| {
                panic!("{decoder} failed to decode {encoder} output {}: {e}", render(&bytes))
            });
            assert_eq!(
                &decoded,
                value,
                "{encoder} -> {decoder} round trip changed the value; wire: {}",
                render(&bytes)
            );
        }
    }
}

/// Asserts that both backends encode `value` to the same bytes.
///
/// Returns the shared encoding.
///
/// # Panics
///
/// Panics when either backend fails or the outputs differ.
pub fn assert_backends_agree<T: WireType>(value: &T) -> Vec<u8> {
    let standard = encode_with(Backend::Standard, value)
        .unwrap_or_else(|e| panic!("standard failed to encode {value:?}: {e}"));
    let streaming = encode_with(Backend::Streaming, value)
        .unwrap_or_else(|e| panic!("streaming failed to encode {value:?}: {e}"));
    assert_eq!(
        render(&standard),
        render(&streaming),
        "backends wrote different bytes for {value:?}"
    );

    let standard_tree: serde_json::Value = serde_json::from_slice(&standard)
        .unwrap_or_else(|e| panic!("standard wrote invalid JSON {}: {e}", render(&standard)));
    let streaming_tree: serde_json::Value = serde_json::from_slice(&streaming)
        .unwrap_or_else(|e| panic!("streaming wrote invalid JSON {}: {e}", render(&streaming)));
    assert_eq!(standard_tree, streaming_tree);
    streaming
}

/// Asserts that both backends decode `wire` to the same value, and returns it.
///
/// # Panics
///
/// Panics when either backend fails or the decoded values differ.
pub fn assert_decode_agrees<T: WireType>(wire: &str) -> T {
    let standard: T = decode_with(Backend::Standard, wire.as_bytes())
        .unwrap_or_else(|e| panic!("standard failed to decode {wire}: {e}"));
    let streaming: T = decode_with(Backend::Streaming, wire.as_bytes())
        .unwrap_or_else(|e| panic!("streaming failed to decode {wire}: {e}"));
    assert_eq!(standard, streaming, "backends decoded {wire} differently");
    streaming
}

/// Asserts that both backends reject `wire` with the same error kind at the
/// same path, and returns the streaming error.
///
/// Malformed input is compared by kind only. Type mismatches must also
/// render identically, since they name the same alternatives.
///
/// # Panics
///
/// Panics when either backend accepts `wire` or the failures differ.
pub fn assert_decode_fails_alike<T: WireType>(wire: &str) -> DecodeError {
    let standard = match decode_with::<T>(Backend::Standard, wire.as_bytes()) {
        Ok(value) => panic!("standard accepted {wire} as {value:?}"),
        Err(e) => e,
    };
    let streaming = match decode_with::<T>(Backend::Streaming, wire.as_bytes()) {
        Ok(value) => panic!("streaming accepted {wire} as {value:?}"),
        Err(e) => e,
    };
    assert_eq!(
        standard.kind_name(),
        streaming.kind_name(),
        "standard: {standard}; streaming: {streaming}"
    );
    if !streaming.is_malformed() {
        assert_eq!(
            standard.path(),
            streaming.path(),
            "standard: {standard}; streaming: {streaming}"
        );
    }
    if streaming.is_type_mismatch() {
        assert_eq!(standard.to_string(), streaming.to_string());
    }
    streaming
}
