//! Single-definition schema macros.
//!
//! A record is declared once with [`wire_record!`]: each field names its
//! Rust type, its Key Table constant and its emission policy. Everything
//! else is generated from that declaration:
//!
//! - the struct itself (`Debug`, `Clone`, `Default`, `PartialEq`)
//! - serde `Serialize`/`Deserialize` for the standard backend
//! - `StreamObject`/`StreamValue` for the streaming backend
//! - `WireValue`/`WireRecord` metadata and an exhaustive `Reset`
//!
//! Field policies:
//!
//! | Policy | Encode | Decode when absent |
//! |--------|--------|--------------------|
//! | `required` | always | `MissingField` |
//! | `always` | always, even when zero | zero value |
//! | `omitempty` | only when non-empty | zero value |

/// Whether a field is written on encode.
macro_rules! policy_emits {
    (required, $value:expr) => {
        true
    };
    (always, $value:expr) => {
        true
    };
    (omitempty, $value:expr) => {
        !$crate::wire::WireValue::is_empty($value)
    };
}

/// Contribution of a field to the required-key mask.
macro_rules! policy_mask {
    (required, $bit:expr) => {
        $bit
    };
    (always, $bit:expr) => {
        0
    };
    (omitempty, $bit:expr) => {
        0
    };
}

/// Declares a protocol record.
///
/// ```ignore
/// wire_record! {
///     /// A position in a text document.
///     pub struct Position {
///         line: u32 = keys::LINE, required;
///         character: u32 = keys::CHARACTER, required;
///     }
/// }
/// ```
macro_rules! wire_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty = $key:path, $policy:ident;
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )+
        }

        const _: () = {
            use ::serde::de::{IgnoredAny, MapAccess, Visitor};
            use ::serde::ser::SerializeStruct as _;
            use $crate::keys::WireKey;
            use $crate::stream::{DecodeContext, ObjectWriter, StreamObject, StreamValue, StreamWriter};
            use $crate::wire::{WireRecord, WireValue};

            #[allow(non_camel_case_types)]
            #[derive(Clone, Copy)]
            enum Field {
                $($field),+
            }

            impl Field {
                const fn bit(self) -> u64 {
                    1u64 << (self as u32)
                }
            }

            impl WireRecord for $name {
                const NAME: &'static str = stringify!($name);
                const KEYS: &'static [&'static str] = &[$($key),+];
                const REQUIRED: u64 =
                    0 $(| $crate::record::policy_mask!($policy, Field::$field.bit()))+;
            }

            const _: () = assert!(
                <$name as WireRecord>::KEYS.len() <= 64,
                "record has more keys than the seen-mask can track"
            );

            impl WireValue for $name {
                const SHAPE: &'static str = stringify!($name);
                const ARRAY_SHAPE: &'static str = concat!(stringify!($name), "[]");

                fn is_empty(&self) -> bool {
                    true $(&& WireValue::is_empty(&self.$field))+
                }
            }

            impl ::lspwire_core::Reset for $name {
                fn reset(&mut self) {
                    $( ::lspwire_core::Reset::reset(&mut self.$field); )+
                }
            }

            impl ::serde::Serialize for $name {
                fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    let len = 0usize
                        $(+ usize::from($crate::record::policy_emits!($policy, &self.$field)))+;
                    let mut state = serializer.serialize_struct(stringify!($name), len)?;
                    $(
                        if $crate::record::policy_emits!($policy, &self.$field) {
                            state.serialize_field($key, &self.$field)?;
                        } else {
                            state.skip_field($key)?;
                        }
                    )+
                    state.end()
                }
            }

            impl<'de> ::serde::Deserialize<'de> for $name {
                fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    struct RecordVisitor;

                    impl<'de> Visitor<'de> for RecordVisitor {
                        type Value = $name;

                        fn expecting(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                            f.write_str(concat!(stringify!($name), " object"))
                        }

                        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<$name, A::Error> {
                            let mut record = $name::default();
                            let mut seen = 0u64;
                            while let Some(key) = map.next_key::<WireKey>()? {
                                let Some(key) = key.known() else {
                                    map.next_value::<IgnoredAny>()?;
                                    continue;
                                };
                                $(
                                    if key == $key {
                                        record.$field = map.next_value()?;
                                        seen |= Field::$field.bit();
                                        continue;
                                    }
                                )+
                                map.next_value::<IgnoredAny>()?;
                            }
                            if let Some(missing) = $crate::wire::first_missing(
                                <$name as WireRecord>::KEYS,
                                <$name as WireRecord>::REQUIRED,
                                seen,
                            ) {
                                return Err(<A::Error as ::serde::de::Error>::missing_field(missing));
                            }
                            Ok(record)
                        }
                    }

                    deserializer.deserialize_struct(
                        stringify!($name),
                        <$name as WireRecord>::KEYS,
                        RecordVisitor,
                    )
                }
            }

            impl StreamObject for $name {
                fn decode_key<'de, D: ::serde::Deserializer<'de>>(
                    &mut self,
                    key: &'static str,
                    de: D,
                    cx: &mut DecodeContext,
                ) -> Result<(), D::Error> {
                    $(
                        if key == $key {
                            cx.enter_key($key);
                            StreamValue::decode_in_place(&mut self.$field, de, cx)?;
                            cx.leave();
                            return Ok(());
                        }
                    )+
                    Ok(())
                }

                fn encode_fields(&self, fields: &mut ObjectWriter<'_, '_>) -> ::std::io::Result<()> {
                    $(
                        if $crate::record::policy_emits!($policy, &self.$field) {
                            fields.field($key, &self.$field)?;
                        }
                    )+
                    Ok(())
                }
            }

            impl StreamValue for $name {
                fn decode<'de, D: ::serde::Deserializer<'de>>(
                    de: D,
                    cx: &mut DecodeContext,
                ) -> Result<Self, D::Error> {
                    let mut record = Self::default();
                    $crate::stream::decode_object(&mut record, de, cx)?;
                    Ok(record)
                }

                fn decode_in_place<'de, D: ::serde::Deserializer<'de>>(
                    &mut self,
                    de: D,
                    cx: &mut DecodeContext,
                ) -> Result<(), D::Error> {
                    ::lspwire_core::Reset::reset(self);
                    $crate::stream::decode_object(self, de, cx)
                }

                fn encode(&self, w: &mut StreamWriter<'_>) -> ::std::io::Result<()> {
                    w.object(self)
                }

                fn size_hint(&self) -> usize {
                    24 * <$name as StreamObject>::key_count()
                }
            }
        };
    };
}

/// Declares an integer-coded or string-coded protocol enumeration.
///
/// The first variant is the `Default`. Unknown codes fail with
/// `InvalidValue` in both backends.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: integer {
            $(#[$fmeta:meta])*
            $first:ident = $first_code:literal
            $(, $(#[$vmeta:meta])* $variant:ident = $code:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(#[$fmeta])*
            $first,
            $($(#[$vmeta])* $variant,)*
        }

        impl $name {
            /// Returns the wire code.
            #[must_use]
            pub const fn code(self) -> i32 {
                match self {
                    Self::$first => $first_code,
                    $(Self::$variant => $code,)*
                }
            }

            /// Looks up a variant by wire code.
            #[must_use]
            pub const fn from_code(code: i32) -> Option<Self> {
                match code {
                    $first_code => Some(Self::$first),
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i32(self.code())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = <i32 as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::from_code(code).ok_or_else(|| {
                    <D::Error as ::serde::de::Error>::invalid_value(
                        ::serde::de::Unexpected::Signed(i64::from(code)),
                        &concat!("a ", stringify!($name), " code"),
                    )
                })
            }
        }

        impl $crate::stream::StreamValue for $name {
            fn decode<'de, D: ::serde::Deserializer<'de>>(
                de: D,
                cx: &mut $crate::stream::DecodeContext,
            ) -> Result<Self, D::Error> {
                let code = <i32 as $crate::stream::StreamValue>::decode(de, cx)?;
                Self::from_code(code).ok_or_else(|| {
                    let expected = concat!("a ", stringify!($name), " code");
                    cx.fail(::lspwire_core::DecodeErrorKind::InvalidValue(format!(
                        "integer `{code}`, expected {expected}"
                    )));
                    <D::Error as ::serde::de::Error>::invalid_value(
                        ::serde::de::Unexpected::Signed(i64::from(code)),
                        &expected,
                    )
                })
            }

            fn encode(&self, w: &mut $crate::stream::StreamWriter<'_>) -> ::std::io::Result<()> {
                w.i32(self.code())
            }

            fn size_hint(&self) -> usize {
                4
            }
        }

        $crate::record::wire_enum!(@common $name, $first);
    };

    (
        $(#[$meta:meta])*
        pub enum $name:ident: string {
            $(#[$fmeta:meta])*
            $first:ident = $first_code:literal
            $(, $(#[$vmeta:meta])* $variant:ident = $code:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(#[$fmeta])*
            $first,
            $($(#[$vmeta])* $variant,)*
        }

        impl $name {
            /// Returns the wire spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    Self::$first => $first_code,
                    $(Self::$variant => $code,)*
                }
            }

            /// Looks up a variant by wire spelling.
            #[must_use]
            pub fn from_wire(wire: &str) -> Option<Self> {
                match wire {
                    $first_code => Some(Self::$first),
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let wire = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::from_wire(&wire).ok_or_else(|| {
                    <D::Error as ::serde::de::Error>::invalid_value(
                        ::serde::de::Unexpected::Str(&wire),
                        &concat!("a ", stringify!($name), " value"),
                    )
                })
            }
        }

        impl $crate::stream::StreamValue for $name {
            fn decode<'de, D: ::serde::Deserializer<'de>>(
                de: D,
                cx: &mut $crate::stream::DecodeContext,
            ) -> Result<Self, D::Error> {
                let wire = <String as $crate::stream::StreamValue>::decode(de, cx)?;
                Self::from_wire(&wire).ok_or_else(|| {
                    let expected = concat!("a ", stringify!($name), " value");
                    let unexpected = ::serde::de::Unexpected::Str(&wire);
                    cx.fail(::lspwire_core::DecodeErrorKind::InvalidValue(format!(
                        "{unexpected}, expected {expected}"
                    )));
                    <D::Error as ::serde::de::Error>::invalid_value(unexpected, &expected)
                })
            }

            fn encode(&self, w: &mut $crate::stream::StreamWriter<'_>) -> ::std::io::Result<()> {
                w.str(self.as_str())
            }
        }

        $crate::record::wire_enum!(@common $name, $first);
    };

    (@common $name:ident, $first:ident) => {
        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        impl $crate::wire::WireValue for $name {
            const SHAPE: &'static str = stringify!($name);
            const ARRAY_SHAPE: &'static str = concat!(stringify!($name), "[]");

            fn is_empty(&self) -> bool {
                false
            }
        }

        impl ::lspwire_core::Reset for $name {
            fn reset(&mut self) {
                *self = Self::$first;
            }
        }
    };
}

pub(crate) use {policy_emits, policy_mask, wire_enum, wire_record};
