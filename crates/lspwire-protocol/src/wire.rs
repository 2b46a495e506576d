//! Shape metadata shared by both codec backends.
//!
//! [`WireValue`] names the wire shape of a type (used in union error
//! reports and alternative lists) and defines when a value counts as
//! empty for `omitempty` fields. [`WireRecord`] adds the key list and
//! required-key mask of a record type.

use serde_json::Value;
use std::collections::BTreeMap;

/// A type with a known JSON shape.
pub trait WireValue {
    /// Shape name as reported in union alternative lists.
    const SHAPE: &'static str;

    /// Shape name of an array of this type.
    const ARRAY_SHAPE: &'static str;

    /// Returns true when the value is the zero value for omission purposes.
    fn is_empty(&self) -> bool;
}

/// A record type declared with `wire_record!`.
pub trait WireRecord: WireValue + Default {
    /// Type name.
    const NAME: &'static str;

    /// Wire keys in declaration order.
    const KEYS: &'static [&'static str];

    /// Bit `i` is set when `KEYS[i]` is required.
    const REQUIRED: u64;
}

/// Returns the first required key absent from `seen`.
#[must_use]
pub fn first_missing(keys: &'static [&'static str], required: u64, seen: u64) -> Option<&'static str> {
    let missing = required & !seen;
    if missing == 0 {
        return None;
    }
    keys.get(missing.trailing_zeros() as usize).copied()
}

/// Returns the JSON kind of a parsed value.
#[must_use]
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "decimal"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Returns the JSON kind of a raw, already validated JSON value.
///
/// Agrees with [`json_kind`] on every input.
#[must_use]
pub fn raw_kind(raw: &str) -> &'static str {
    let raw = raw.trim_start();
    match raw.as_bytes().first() {
        Some(b'n') => "null",
        Some(b't' | b'f') => "boolean",
        Some(b'"') => "string",
        Some(b'[') => "array",
        Some(b'{') => "object",
        _ => match serde_json::from_str::<serde_json::Number>(raw) {
            Ok(n) if n.is_i64() || n.is_u64() => "integer",
            _ => "decimal",
        },
    }
}

macro_rules! scalar_shape {
    ($($ty:ty => $shape:literal, $empty:expr;)*) => {
        $(
            impl WireValue for $ty {
                const SHAPE: &'static str = $shape;
                const ARRAY_SHAPE: &'static str = concat!($shape, "[]");

                #[inline]
                fn is_empty(&self) -> bool {
                    let empty: fn(&$ty) -> bool = $empty;
                    empty(self)
                }
            }
        )*
    };
}

scalar_shape! {
    bool => "boolean", |v| !*v;
    i32 => "integer", |v| *v == 0;
    u32 => "uinteger", |v| *v == 0;
    f64 => "decimal", |v| *v == 0.0;
    String => "string", String::is_empty;
    Value => "LSPAny", Value::is_null;
}

impl<T: WireValue> WireValue for Vec<T> {
    const SHAPE: &'static str = T::ARRAY_SHAPE;
    const ARRAY_SHAPE: &'static str = "array[]";

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

impl<T: WireValue> WireValue for Option<T> {
    const SHAPE: &'static str = T::SHAPE;
    const ARRAY_SHAPE: &'static str = T::ARRAY_SHAPE;

    fn is_empty(&self) -> bool {
        self.is_none()
    }
}

impl<K, V> WireValue for BTreeMap<K, V> {
    const SHAPE: &'static str = "object";
    const ARRAY_SHAPE: &'static str = "object[]";

    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }
}
