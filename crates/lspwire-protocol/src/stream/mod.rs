//! Streaming codec backend.
//!
//! Decoding drives a `serde_json::Deserializer` token by token through
//! per-type decoders; no intermediate tree is built and object keys are
//! interned through the Key Table. Encoding writes compact JSON straight
//! into a byte buffer.
//!
//! Every protocol type implements [`StreamValue`]; record types also
//! implement [`StreamObject`], which supplies key dispatch and member
//! encoding to the shared object visitor.

mod context;
mod encode;
mod values;

use lspwire_core::logging::{debug, targets, trace};
use lspwire_core::{DecodeError, DecodeErrorKind, EncodeError, Pool, Pooled, Reset};
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Unexpected, Visitor};
use serde_json::value::RawValue;
use std::fmt;
use std::io;
use std::marker::PhantomData;

use crate::keys::WireKey;
use crate::wire::{first_missing, raw_kind, WireRecord, WireValue};

pub use context::DecodeContext;
pub use encode::{ObjectWriter, StreamWriter};
pub use values::WireMapKey;

/// A value the streaming backend can decode and encode.
pub trait StreamValue: WireValue + Sized {
    /// Decodes a fresh value.
    fn decode<'de, D: Deserializer<'de>>(de: D, cx: &mut DecodeContext) -> Result<Self, D::Error>;

    /// Decodes into an existing value, reusing its buffers where possible.
    ///
    /// On success `self` holds exactly what a fresh [`decode`](Self::decode)
    /// would have produced.
    fn decode_in_place<'de, D: Deserializer<'de>>(
        &mut self,
        de: D,
        cx: &mut DecodeContext,
    ) -> Result<(), D::Error> {
        *self = Self::decode(de, cx)?;
        Ok(())
    }

    /// Appends the compact JSON encoding of `self`.
    fn encode(&self, w: &mut StreamWriter<'_>) -> io::Result<()>;

    /// Estimated encoded size, used to pre-size output buffers.
    fn size_hint(&self) -> usize {
        8
    }
}

/// Per-record half of the streaming contract.
pub trait StreamObject: StreamValue + WireRecord {
    /// Number of keys the record declares.
    fn key_count() -> usize {
        Self::KEYS.len()
    }

    /// Decodes the member named `key` into its field.
    ///
    /// Keys the record does not declare are left alone.
    fn decode_key<'de, D: Deserializer<'de>>(
        &mut self,
        key: &'static str,
        de: D,
        cx: &mut DecodeContext,
    ) -> Result<(), D::Error>;

    /// Writes the members selected by each field's policy, in declaration order.
    fn encode_fields(&self, fields: &mut ObjectWriter<'_, '_>) -> io::Result<()>;
}

// ─────────────────────────────────────────────────
// Entry points
// ─────────────────────────────────────────────────

/// Decodes a value from JSON bytes.
pub fn from_slice<T: StreamValue>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut cx = DecodeContext::new();
    let mut tokens = serde_json::Deserializer::from_slice(bytes);
    let decoded = T::decode(&mut tokens, &mut cx).and_then(|value| tokens.end().map(|()| value));
    decoded.map_err(|err| failed::<T>(cx, err))
}

/// Decodes a value from a JSON string.
pub fn from_str<T: StreamValue>(text: &str) -> Result<T, DecodeError> {
    from_slice(text.as_bytes())
}

/// Resets `place` and decodes into it.
///
/// On failure `place` is reset again, so it never holds a partial value.
pub fn decode_into<T: StreamValue + Reset>(place: &mut T, bytes: &[u8]) -> Result<(), DecodeError> {
    place.reset();
    let mut cx = DecodeContext::new();
    let mut tokens = serde_json::Deserializer::from_slice(bytes);
    let decoded = place
        .decode_in_place(&mut tokens, &mut cx)
        .and_then(|()| tokens.end());
    decoded.map_err(|err| {
        place.reset();
        failed::<T>(cx, err)
    })
}

/// Decodes into an instance acquired from `pool`.
///
/// The instance returns to the pool when the guard drops, including when
/// decoding fails.
pub fn from_slice_pooled<'p, T>(bytes: &[u8], pool: &'p Pool<T>) -> Result<Pooled<'p, T>, DecodeError>
where
    T: StreamValue + Reset + Default,
{
    let mut item = pool.acquire();
    decode_into(&mut *item, bytes)?;
    Ok(item)
}

/// Encodes a value as compact JSON.
pub fn to_vec<T: StreamValue>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(value.size_hint());
    value.encode(&mut StreamWriter::new(&mut out))?;
    Ok(out)
}

fn failed<T: WireValue>(cx: DecodeContext, err: serde_json::Error) -> DecodeError {
    let err = cx.finish(err);
    debug!(target: targets::STREAM, "decode of {} failed: {err}", T::SHAPE);
    err
}

// ─────────────────────────────────────────────────
// Shared decoding machinery
// ─────────────────────────────────────────────────

/// Seed that decodes a fresh value.
pub(crate) struct Fresh<'a, T> {
    cx: &'a mut DecodeContext,
    marker: PhantomData<T>,
}

impl<'a, T> Fresh<'a, T> {
    pub(crate) fn new(cx: &'a mut DecodeContext) -> Self {
        Self {
            cx,
            marker: PhantomData,
        }
    }
}

impl<'de, T: StreamValue> DeserializeSeed<'de> for Fresh<'_, T> {
    type Value = T;

    fn deserialize<D: Deserializer<'de>>(self, de: D) -> Result<T, D::Error> {
        T::decode(de, self.cx)
    }
}

/// Records an `UnexpectedKind` failure and builds the matching serde error.
pub(crate) fn reject<E: de::Error>(cx: &mut DecodeContext, expected: &str, found: Unexpected<'_>) -> E {
    cx.fail(DecodeErrorKind::UnexpectedKind {
        expected: expected.to_owned(),
        found: found.to_string(),
    });
    E::invalid_type(found, &expected)
}

/// Generates `visit_*` methods that reject a JSON kind.
///
/// The visitor must provide `fn reject<E: de::Error>(self, Unexpected) -> E`.
macro_rules! reject_kinds {
    ($de:lifetime; $($kind:ident),* $(,)?) => {
        $( $crate::stream::reject_kinds!(@one $de $kind); )*
    };
    (@one $de:lifetime bool) => {
        fn visit_bool<E: ::serde::de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Err(self.reject(::serde::de::Unexpected::Bool(v)))
        }
    };
    (@one $de:lifetime i64) => {
        fn visit_i64<E: ::serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Err(self.reject(::serde::de::Unexpected::Signed(v)))
        }
    };
    (@one $de:lifetime u64) => {
        fn visit_u64<E: ::serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Err(self.reject(::serde::de::Unexpected::Unsigned(v)))
        }
    };
    (@one $de:lifetime f64) => {
        fn visit_f64<E: ::serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Err(self.reject(::serde::de::Unexpected::Float(v)))
        }
    };
    (@one $de:lifetime str) => {
        fn visit_str<E: ::serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Err(self.reject(::serde::de::Unexpected::Str(v)))
        }
    };
    (@one $de:lifetime unit) => {
        fn visit_unit<E: ::serde::de::Error>(self) -> Result<Self::Value, E> {
            Err(self.reject(::serde::de::Unexpected::Unit))
        }
    };
    (@one $de:lifetime seq) => {
        fn visit_seq<S: ::serde::de::SeqAccess<$de>>(self, _seq: S) -> Result<Self::Value, S::Error> {
            Err(self.reject(::serde::de::Unexpected::Seq))
        }
    };
    (@one $de:lifetime map) => {
        fn visit_map<M: ::serde::de::MapAccess<$de>>(self, _map: M) -> Result<Self::Value, M::Error> {
            Err(self.reject(::serde::de::Unexpected::Map))
        }
    };
}

pub(crate) use reject_kinds;

/// Decodes a JSON object into `place` through its key dispatcher.
///
/// Unknown keys are skipped. A key that repeats keeps only its last value,
/// decoded at the position of its first occurrence, which is how a parsed
/// tree sees the same object. Required keys absent from the object fail
/// with `MissingField` once the object is exhausted.
pub fn decode_object<'de, T, D>(place: &mut T, de: D, cx: &mut DecodeContext) -> Result<(), D::Error>
where
    T: StreamObject,
    D: Deserializer<'de>,
{
    de.deserialize_any(ObjectVisitor { place, cx })
}

struct ObjectVisitor<'a, T> {
    place: &'a mut T,
    cx: &'a mut DecodeContext,
}

impl<T: StreamObject> ObjectVisitor<'_, T> {
    fn reject<E: de::Error>(self, found: Unexpected<'_>) -> E {
        reject(self.cx, &format!("{} object", T::NAME), found)
    }
}

impl<'de, T: StreamObject> Visitor<'de> for ObjectVisitor<'_, T> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} object", T::NAME)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        let mut members: Vec<(&'static str, &'de RawValue)> = Vec::with_capacity(T::key_count());
        let mut seen = 0u64;
        while let Some(key) = map.next_key::<WireKey>()? {
            let Some((index, key)) = key.known().and_then(|key| {
                T::KEYS.iter().position(|declared| *declared == key).map(|index| (index, key))
            }) else {
                trace!(target: targets::STREAM, "{}: skipping key unknown to {}", self.cx.path(), T::NAME);
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            let raw = map.next_value::<&'de RawValue>()?;
            let bit = 1u64 << index;
            if seen & bit == 0 {
                seen |= bit;
                members.push((key, raw));
            } else if let Some(member) = members.iter_mut().find(|(known, _)| *known == key) {
                trace!(target: targets::STREAM, "{}: {key} repeats, keeping the last value", self.cx.path());
                member.1 = raw;
            }
        }
        for (key, raw) in members {
            let mut tokens = serde_json::Deserializer::from_str(raw.get());
            self.place
                .decode_key(key, &mut tokens, self.cx)
                .map_err(<A::Error as de::Error>::custom)?;
        }
        if let Some(missing) = first_missing(T::KEYS, T::REQUIRED, seen) {
            self.cx.fail(DecodeErrorKind::MissingField(missing));
            return Err(de::Error::missing_field(missing));
        }
        Ok(())
    }

    reject_kinds!('de; bool, i64, u64, f64, str, unit, seq);
}

/// Runs one union alternative over a buffered raw value.
///
/// Returns `None` when the alternative rejects the value; the failure is
/// traced and never reaches `cx`.
pub(crate) fn trial<T: StreamValue>(raw: &RawValue, cx: &DecodeContext) -> Option<T> {
    let mut attempt = cx.fork();
    let mut tokens = serde_json::Deserializer::from_str(raw.get());
    let decoded = T::decode(&mut tokens, &mut attempt).and_then(|value| tokens.end().map(|()| value));
    match decoded {
        Ok(value) => Some(value),
        Err(err) => {
            let err = attempt.finish(err);
            lspwire_core::log_union!("{}: {} rejected: {}", cx.path(), T::SHAPE, err.kind());
            None
        }
    }
}

/// Records a union resolution failure and builds the matching serde error.
pub(crate) fn mismatch<E: de::Error>(
    cx: &mut DecodeContext,
    raw: &RawValue,
    alternatives: &'static [&'static str],
) -> E {
    let found = raw_kind(raw.get());
    cx.fail(DecodeErrorKind::TypeMismatch {
        found: found.to_owned(),
        alternatives,
    });
    E::unknown_variant(found, alternatives)
}
