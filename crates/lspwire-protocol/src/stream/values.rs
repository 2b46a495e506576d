//! Streaming decoders for scalars and std containers.

use lspwire_core::DecodeErrorKind;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::Deserialize;
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::marker::PhantomData;

use super::{reject, reject_kinds, DecodeContext, Fresh, StreamValue, StreamWriter};
use crate::wire::WireValue;

// ─────────────────────────────────────────────────
// Booleans
// ─────────────────────────────────────────────────

struct BoolVisitor<'a> {
    cx: &'a mut DecodeContext,
}

impl BoolVisitor<'_> {
    fn reject<E: de::Error>(self, found: Unexpected<'_>) -> E {
        reject(self.cx, bool::SHAPE, found)
    }
}

impl<'de> Visitor<'de> for BoolVisitor<'_> {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(bool::SHAPE)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
        Ok(v)
    }

    reject_kinds!('de; i64, u64, f64, str, unit, seq, map);
}

impl StreamValue for bool {
    fn decode<'de, D: Deserializer<'de>>(de: D, cx: &mut DecodeContext) -> Result<Self, D::Error> {
        de.deserialize_any(BoolVisitor { cx })
    }

    fn encode(&self, w: &mut StreamWriter<'_>) -> io::Result<()> {
        w.bool(*self)
    }

    fn size_hint(&self) -> usize {
        5
    }
}

// ─────────────────────────────────────────────────
// Integers
// ─────────────────────────────────────────────────

struct IntVisitor<'a, T> {
    cx: &'a mut DecodeContext,
    marker: PhantomData<T>,
}

impl<T: WireValue> IntVisitor<'_, T> {
    fn reject<E: de::Error>(self, found: Unexpected<'_>) -> E {
        reject(self.cx, T::SHAPE, found)
    }

    fn out_of_range<E: de::Error>(self, found: Unexpected<'_>) -> E {
        self.cx.fail(DecodeErrorKind::InvalidValue(format!(
            "{found}, expected {}",
            T::SHAPE
        )));
        E::invalid_value(found, &T::SHAPE)
    }
}

impl<'de, T> Visitor<'de> for IntVisitor<'_, T>
where
    T: WireValue + TryFrom<i64> + TryFrom<u64>,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(T::SHAPE)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        T::try_from(v).map_err(|_| self.out_of_range(Unexpected::Signed(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        T::try_from(v).map_err(|_| self.out_of_range(Unexpected::Unsigned(v)))
    }

    reject_kinds!('de; bool, f64, str, unit, seq, map);
}

macro_rules! stream_integer {
    ($($ty:ident),*) => {
        $(
            impl StreamValue for $ty {
                fn decode<'de, D: Deserializer<'de>>(de: D, cx: &mut DecodeContext) -> Result<Self, D::Error> {
                    de.deserialize_any(IntVisitor::<$ty> { cx, marker: PhantomData })
                }

                fn encode(&self, w: &mut StreamWriter<'_>) -> io::Result<()> {
                    w.$ty(*self)
                }

                fn size_hint(&self) -> usize {
                    10
                }
            }
        )*
    };
}

stream_integer!(i32, u32);

// ─────────────────────────────────────────────────
// Decimals
// ─────────────────────────────────────────────────

struct FloatVisitor<'a> {
    cx: &'a mut DecodeContext,
}

impl FloatVisitor<'_> {
    fn reject<E: de::Error>(self, found: Unexpected<'_>) -> E {
        reject(self.cx, f64::SHAPE, found)
    }
}

impl<'de> Visitor<'de> for FloatVisitor<'_> {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(f64::SHAPE)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    reject_kinds!('de; bool, str, unit, seq, map);
}

impl StreamValue for f64 {
    fn decode<'de, D: Deserializer<'de>>(de: D, cx: &mut DecodeContext) -> Result<Self, D::Error> {
        de.deserialize_any(FloatVisitor { cx })
    }

    fn encode(&self, w: &mut StreamWriter<'_>) -> io::Result<()> {
        w.f64(*self)
    }

    fn size_hint(&self) -> usize {
        24
    }
}

// ─────────────────────────────────────────────────
// Strings
// ─────────────────────────────────────────────────

struct TextVisitor<'a> {
    place: &'a mut String,
    cx: &'a mut DecodeContext,
}

impl TextVisitor<'_> {
    fn reject<E: de::Error>(self, found: Unexpected<'_>) -> E {
        reject(self.cx, String::SHAPE, found)
    }
}

impl<'de> Visitor<'de> for TextVisitor<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(String::SHAPE)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
        self.place.clear();
        self.place.push_str(v);
        Ok(())
    }

    reject_kinds!('de; bool, i64, u64, f64, unit, seq, map);
}

impl StreamValue for String {
    fn decode<'de, D: Deserializer<'de>>(de: D, cx: &mut DecodeContext) -> Result<Self, D::Error> {
        let mut text = String::new();
        text.decode_in_place(de, cx)?;
        Ok(text)
    }

    fn decode_in_place<'de, D: Deserializer<'de>>(
        &mut self,
        de: D,
        cx: &mut DecodeContext,
    ) -> Result<(), D::Error> {
        de.deserialize_any(TextVisitor { place: self, cx })
    }

    fn encode(&self, w: &mut StreamWriter<'_>) -> io::Result<()> {
        w.str(self)
    }

    fn size_hint(&self) -> usize {
        self.len() + 2
    }
}

// ─────────────────────────────────────────────────
// LSPAny
// ─────────────────────────────────────────────────

impl StreamValue for serde_json::Value {
    fn decode<'de, D: Deserializer<'de>>(de: D, _cx: &mut DecodeContext) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(de)
    }

    fn encode(&self, w: &mut StreamWriter<'_>) -> io::Result<()> {
        w.value(self)
    }

    fn size_hint(&self) -> usize {
        64
    }
}

// ─────────────────────────────────────────────────
// Optional values
// ─────────────────────────────────────────────────

struct OptionVisitor<'a, T> {
    place: &'a mut Option<T>,
    cx: &'a mut DecodeContext,
}

impl<'de, T: StreamValue> Visitor<'de> for OptionVisitor<'_, T> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} or null", T::SHAPE)
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        *self.place = None;
        Ok(())
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        *self.place = None;
        Ok(())
    }

    fn visit_some<D: Deserializer<'de>>(self, de: D) -> Result<(), D::Error> {
        match self.place.as_mut() {
            Some(value) => value.decode_in_place(de, self.cx),
            None => {
                *self.place = Some(T::decode(de, self.cx)?);
                Ok(())
            }
        }
    }
}

impl<T: StreamValue> StreamValue for Option<T> {
    fn decode<'de, D: Deserializer<'de>>(de: D, cx: &mut DecodeContext) -> Result<Self, D::Error> {
        let mut value = None;
        value.decode_in_place(de, cx)?;
        Ok(value)
    }

    fn decode_in_place<'de, D: Deserializer<'de>>(
        &mut self,
        de: D,
        cx: &mut DecodeContext,
    ) -> Result<(), D::Error> {
        de.deserialize_option(OptionVisitor { place: self, cx })
    }

    fn encode(&self, w: &mut StreamWriter<'_>) -> io::Result<()> {
        match self {
            Some(value) => value.encode(w),
            None => w.null(),
        }
    }

    fn size_hint(&self) -> usize {
        self.as_ref().map_or(4, StreamValue::size_hint)
    }
}

// ─────────────────────────────────────────────────
// Arrays
// ─────────────────────────────────────────────────

struct SeqVisitor<'a, T> {
    place: &'a mut Vec<T>,
    cx: &'a mut DecodeContext,
}

impl<T: StreamValue> SeqVisitor<'_, T> {
    fn reject<E: de::Error>(self, found: Unexpected<'_>) -> E {
        reject(self.cx, <Vec<T>>::SHAPE, found)
    }
}

impl<'de, T: StreamValue> Visitor<'de> for SeqVisitor<'_, T> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(<Vec<T>>::SHAPE)
    }

    fn visit_seq<S: SeqAccess<'de>>(self, mut seq: S) -> Result<(), S::Error> {
        self.place.clear();
        if let Some(hint) = seq.size_hint() {
            self.place.reserve(hint);
        }
        let mut index = 0;
        loop {
            self.cx.enter_index(index);
            let Some(item) = seq.next_element_seed(Fresh::<T>::new(self.cx))? else {
                self.cx.leave();
                return Ok(());
            };
            self.cx.leave();
            self.place.push(item);
            index += 1;
        }
    }

    reject_kinds!('de; bool, i64, u64, f64, str, unit, map);
}

impl<T: StreamValue> StreamValue for Vec<T> {
    fn decode<'de, D: Deserializer<'de>>(de: D, cx: &mut DecodeContext) -> Result<Self, D::Error> {
        let mut items = Vec::new();
        items.decode_in_place(de, cx)?;
        Ok(items)
    }

    fn decode_in_place<'de, D: Deserializer<'de>>(
        &mut self,
        de: D,
        cx: &mut DecodeContext,
    ) -> Result<(), D::Error> {
        de.deserialize_any(SeqVisitor { place: self, cx })
    }

    fn encode(&self, w: &mut StreamWriter<'_>) -> io::Result<()> {
        w.array(self)
    }

    fn size_hint(&self) -> usize {
        self.iter().map(|item| item.size_hint() + 1).sum::<usize>() + 2
    }
}

// ─────────────────────────────────────────────────
// String-keyed maps
// ─────────────────────────────────────────────────

/// A string-like type usable as a JSON object key.
pub trait WireMapKey: Ord + From<String> + AsRef<str> {}

impl WireMapKey for String {}

struct MapVisitor<'a, K, V> {
    place: &'a mut BTreeMap<K, V>,
    cx: &'a mut DecodeContext,
}

impl<K, V> MapVisitor<'_, K, V> {
    fn reject<E: de::Error>(self, found: Unexpected<'_>) -> E {
        reject(self.cx, "object", found)
    }
}

impl<'de, K: WireMapKey, V: StreamValue> Visitor<'de> for MapVisitor<'_, K, V> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        self.place.clear();
        // Repeated keys keep their first position and their last value.
        let mut members: Vec<(String, &'de RawValue)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        let mut positions: BTreeMap<String, usize> = BTreeMap::new();
        while let Some(key) = map.next_key::<String>()? {
            let raw = map.next_value::<&'de RawValue>()?;
            match positions.get(&key).and_then(|&at| members.get_mut(at)) {
                Some(member) => member.1 = raw,
                None => {
                    positions.insert(key.clone(), members.len());
                    members.push((key, raw));
                }
            }
        }
        for (key, raw) in members {
            self.cx.enter_key(key.clone());
            let mut tokens = serde_json::Deserializer::from_str(raw.get());
            let value = V::decode(&mut tokens, self.cx).map_err(<A::Error as de::Error>::custom)?;
            self.cx.leave();
            self.place.insert(K::from(key), value);
        }
        Ok(())
    }

    reject_kinds!('de; bool, i64, u64, f64, str, unit, seq);
}

impl<K: WireMapKey, V: StreamValue> StreamValue for BTreeMap<K, V> {
    fn decode<'de, D: Deserializer<'de>>(de: D, cx: &mut DecodeContext) -> Result<Self, D::Error> {
        let mut map = BTreeMap::new();
        map.decode_in_place(de, cx)?;
        Ok(map)
    }

    fn decode_in_place<'de, D: Deserializer<'de>>(
        &mut self,
        de: D,
        cx: &mut DecodeContext,
    ) -> Result<(), D::Error> {
        de.deserialize_any(MapVisitor { place: self, cx })
    }

    fn encode(&self, w: &mut StreamWriter<'_>) -> io::Result<()> {
        w.map(self)
    }

    fn size_hint(&self) -> usize {
        self.iter()
            .map(|(key, value)| key.as_ref().len() + value.size_hint() + 4)
            .sum::<usize>()
            + 2
    }
}

