//! Backend dispatch.
//!
//! [`Codec`] routes encode and decode calls to the backend selected by its
//! [`CodecConfig`]. With cross-checking enabled it also runs the other
//! backend and logs any divergence, which is how a deployment verifies the
//! two backends agree on real traffic before switching.

use lspwire_core::logging::{is_enabled, targets, trace, warn, Level};
use lspwire_core::{Backend, CodecConfig, DecodeError, EncodeError, Reset};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

use crate::stream::StreamValue;
use crate::{standard, stream};

/// A protocol type usable with either backend.
///
/// Implemented automatically for every type that supports both the
/// standard and the streaming backend.
pub trait WireType: Serialize + DeserializeOwned + StreamValue + Reset + PartialEq + fmt::Debug {}

impl<T> WireType for T where T: Serialize + DeserializeOwned + StreamValue + Reset + PartialEq + fmt::Debug {}

/// Encodes `value` with the given backend.
pub fn encode_with<T: WireType>(backend: Backend, value: &T) -> Result<Vec<u8>, EncodeError> {
    match backend {
        Backend::Standard => standard::to_vec(value),
        Backend::Streaming => stream::to_vec(value),
    }
}

/// Decodes a `T` with the given backend.
pub fn decode_with<T: WireType>(backend: Backend, bytes: &[u8]) -> Result<T, DecodeError> {
    match backend {
        Backend::Standard => standard::from_slice(bytes),
        Backend::Streaming => stream::from_slice(bytes),
    }
}

/// Configured entry point for encoding and decoding protocol values.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    #[must_use]
    pub fn new(config: CodecConfig) -> Self {
        lspwire_core::log_codec!(
            "codec on {} backend (cross-check {}, payload tracing {})",
            config.backend,
            config.cross_check,
            config.trace_payloads
        );
        Self { config }
    }

    /// Creates a codec with default settings and the given backend.
    #[must_use]
    pub fn with_backend(backend: Backend) -> Self {
        Self::new(CodecConfig::default().with_backend(backend))
    }

    /// Creates a codec configured from `LSPWIRE_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(CodecConfig::from_env())
    }

    #[must_use]
    pub fn backend(&self) -> Backend {
        self.config.backend
    }

    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encodes a value as compact JSON.
    pub fn encode<T: WireType>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        let bytes = encode_with(self.backend(), value)?;
        self.trace_payload("encoded", T::SHAPE, &bytes);
        if self.config.cross_check {
            self.cross_check_encode(value, &bytes);
        }
        Ok(bytes)
    }

    /// Decodes a value from JSON bytes.
    pub fn decode<T: WireType>(&self, bytes: &[u8]) -> Result<T, DecodeError> {
        self.trace_payload("decoding", T::SHAPE, bytes);
        let decoded = decode_with(self.backend(), bytes);
        if self.config.cross_check {
            self.cross_check_decode(&decoded, bytes);
        }
        decoded
    }

    /// Decodes into an existing value.
    ///
    /// `place` is reset first; on failure it is left reset. The streaming
    /// backend reuses the buffers `place` already owns.
    pub fn decode_into<T: WireType>(&self, place: &mut T, bytes: &[u8]) -> Result<(), DecodeError> {
        self.trace_payload("decoding", T::SHAPE, bytes);
        match self.backend() {
            Backend::Streaming => stream::decode_into(place, bytes),
            Backend::Standard => {
                place.reset();
                *place = standard::from_slice(bytes)?;
                Ok(())
            }
        }
    }

    fn trace_payload(&self, action: &str, shape: &str, bytes: &[u8]) {
        if self.config.trace_payloads && is_enabled(Level::Trace, targets::CODEC) {
            trace!(
                target: targets::CODEC,
                "{action} {shape} via {}: {}",
                self.backend(),
                String::from_utf8_lossy(bytes)
            );
        }
    }

    fn cross_check_encode<T: WireType>(&self, value: &T, bytes: &[u8]) {
        let other = self.backend().other();
        let divergence = match encode_with(other, value) {
            Ok(other_bytes) if other_bytes == bytes => return,
            Ok(other_bytes) => format!(
                "{} wrote {}, {other} wrote {}",
                self.backend(),
                String::from_utf8_lossy(bytes),
                String::from_utf8_lossy(&other_bytes)
            ),
            Err(err) => format!("{other} failed: {err}"),
        };
        warn!(target: targets::CODEC, "encode divergence for {}: {divergence}", T::SHAPE);
    }

    fn cross_check_decode<T: WireType>(&self, decoded: &Result<T, DecodeError>, bytes: &[u8]) {
        let other = self.backend().other();
        let divergence = match (decoded, &decode_with::<T>(other, bytes)) {
            (Ok(ours), Ok(theirs)) if ours == theirs => return,
            (Err(ours), Err(theirs))
                if ours.kind_name() == theirs.kind_name() && ours.path() == theirs.path() =>
            {
                return;
            }
            (Ok(ours), Ok(theirs)) => format!("{ours:?} vs {theirs:?}"),
            (Err(ours), Err(theirs)) => format!("`{ours}` vs `{theirs}`"),
            (Ok(_), Err(theirs)) => format!("{other} failed: {theirs}"),
            (Err(ours), Ok(_)) => format!("{} failed ({ours}), {other} succeeded", self.backend()),
        };
        warn!(target: targets::CODEC, "decode divergence for {}: {divergence}", T::SHAPE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::union::Or2;

    type Token = Or2<i32, String>;

    #[test]
    fn both_backends_are_selectable() {
        for backend in [Backend::Standard, Backend::Streaming] {
            let codec = Codec::with_backend(backend);
            assert_eq!(codec.backend(), backend);

            let bytes = codec.encode(&Token::B("t".into())).unwrap();
            assert_eq!(bytes, b"\"t\"");
            assert_eq!(codec.decode::<Token>(b"7").unwrap(), Token::A(7));
        }
    }

    #[test]
    fn decode_into_leaves_place_reset_on_failure() {
        for backend in [Backend::Standard, Backend::Streaming] {
            let codec = Codec::with_backend(backend);
            let mut words = vec!["stale".to_string()];
            assert!(codec.decode_into(&mut words, b"[\"a\",2]").is_err());
            assert!(words.is_empty(), "{backend}");

            codec.decode_into(&mut words, b"[\"a\"]").unwrap();
            assert_eq!(words, ["a"]);
        }
    }

    #[test]
    fn cross_check_returns_selected_result() {
        let codec = Codec::new(
            CodecConfig::new()
                .with_cross_check(true)
                .with_payload_tracing(true),
        );
        assert_eq!(codec.decode::<Token>(b"\"x\"").unwrap(), Token::B("x".into()));
        assert!(codec.decode::<Token>(b"true").unwrap_err().is_type_mismatch());
        assert_eq!(codec.encode(&Token::A(1)).unwrap(), b"1");
    }
}
