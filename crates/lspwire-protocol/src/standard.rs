//! Standard codec backend.
//!
//! Decoding parses the input into a `serde_json::Value` tree and walks it
//! with [`TreeDeserializer`], whose error type is [`DecodeError`]: every
//! failure surfaces with its kind and the path of the offending value.
//! Encoding is plain `serde_json` serialization of the generated
//! `Serialize` impls.

use lspwire_core::logging::{debug, targets};
use lspwire_core::{DecodeError, EncodeError};
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{DeserializeOwned, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{forward_to_deserialize_any, Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::iter::Enumerate;
use std::slice;

use crate::keys;

/// Decodes a value from JSON bytes.
///
/// Input that is not well-formed JSON fails with `MalformedWire`.
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let tree: Value = serde_json::from_slice(bytes).map_err(DecodeError::malformed)?;
    from_value(&tree).inspect_err(|err| {
        debug!(target: targets::STANDARD, "decode of {} failed: {err}", std::any::type_name::<T>());
    })
}

/// Decodes a value from a JSON string.
pub fn from_str<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    from_slice(text.as_bytes())
}

/// Decodes a value from an already parsed tree.
pub fn from_value<'a, T: Deserialize<'a>>(tree: &'a Value) -> Result<T, DecodeError> {
    T::deserialize(TreeDeserializer::new(tree))
}

/// Encodes a value as compact JSON.
pub fn to_vec<T: Serialize>(value: &T) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(value)?)
}

/// Encodes a value as a JSON tree.
pub fn to_value<T: Serialize>(value: &T) -> Result<Value, EncodeError> {
    Ok(serde_json::to_value(value)?)
}

/// Strict deserializer over a borrowed JSON tree.
///
/// Hands each node to the visitor as its exact JSON kind, so a visitor
/// only accepts the kinds it declares: no string-to-number coercion and
/// no `null` for required values.
#[derive(Debug, Clone, Copy)]
pub struct TreeDeserializer<'a> {
    node: &'a Value,
}

impl<'a> TreeDeserializer<'a> {
    #[must_use]
    pub fn new(node: &'a Value) -> Self {
        Self { node }
    }
}

impl<'a> Deserializer<'a> for TreeDeserializer<'a> {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'a>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        match self.node {
            Value::Null => visitor.visit_unit(),
            Value::Bool(v) => visitor.visit_bool(*v),
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    visitor.visit_u64(v)
                } else if let Some(v) = n.as_i64() {
                    visitor.visit_i64(v)
                } else {
                    visitor.visit_f64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(v) => visitor.visit_borrowed_str(v),
            Value::Array(items) => {
                let len = items.len();
                let mut seq = SeqWalker {
                    items: items.iter().enumerate(),
                };
                let value = visitor.visit_seq(&mut seq)?;
                match seq.items.len() {
                    0 => Ok(value),
                    remaining => Err(serde::de::Error::invalid_length(
                        len - remaining,
                        &"fewer elements in array",
                    )),
                }
            }
            Value::Object(members) => visitor.visit_map(MapWalker {
                members: members.iter(),
                pending: None,
            }),
        }
    }

    fn deserialize_option<V: Visitor<'a>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        match self.node {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'a>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'a>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        match self.node {
            Value::String(variant) => visitor.visit_enum(BorrowedStrDeserializer::new(variant)),
            _ => self.deserialize_any(visitor),
        }
    }

    forward_to_deserialize_any! {
        <W: Visitor<'a>>
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

struct SeqWalker<'a> {
    items: Enumerate<slice::Iter<'a, Value>>,
}

impl<'a> SeqAccess<'a> for &mut SeqWalker<'a> {
    type Error = DecodeError;

    fn next_element_seed<T: DeserializeSeed<'a>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, DecodeError> {
        match self.items.next() {
            Some((index, item)) => seed
                .deserialize(TreeDeserializer::new(item))
                .map(Some)
                .map_err(|err| err.within_index(index)),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

struct MapWalker<'a> {
    members: serde_json::map::Iter<'a>,
    pending: Option<(&'a str, &'a Value)>,
}

impl<'a> MapAccess<'a> for MapWalker<'a> {
    type Error = DecodeError;

    fn next_key_seed<K: DeserializeSeed<'a>>(&mut self, seed: K) -> Result<Option<K::Value>, DecodeError> {
        match self.members.next() {
            Some((key, value)) => {
                self.pending = Some((key.as_str(), value));
                seed.deserialize(BorrowedStrDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'a>>(&mut self, seed: V) -> Result<V::Value, DecodeError> {
        let Some((key, value)) = self.pending.take() else {
            return Err(serde::de::Error::custom("map value requested before its key"));
        };
        seed.deserialize(TreeDeserializer::new(value))
            .map_err(|err| err.within_key(segment(key)))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.members.len())
    }
}

/// Path segment for an object key, borrowing from the Key Table when possible.
fn segment(key: &str) -> Cow<'static, str> {
    keys::intern(key).map_or_else(|| Cow::Owned(key.to_owned()), Cow::Borrowed)
}
