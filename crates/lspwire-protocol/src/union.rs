//! Sum-of-types field values.
//!
//! A union holds exactly one of its declared alternatives. Decoding tries
//! the alternatives in declaration order and keeps the first that accepts
//! the whole value. Order is part of the type: `Or2<Vec<Location>,
//! Vec<LocationLink>>` resolves `[]` to the first alternative. When no
//! alternative fits, decoding fails with `TypeMismatch` naming the JSON
//! kind found and every alternative tried.
//!
//! Encoding is untagged: only the held alternative is written.
//!
//! A union field that may be absent is declared `Option<Or2<..>>`;
//! `None` is its empty state and `null` decodes to `None`.

/// Declares a union type.
///
/// The generic form produces containers such as `Or2<A, B>` whose shape is
/// `union`. The named form produces a concrete union whose shape is its own
/// name, so enclosing unions can report it among their alternatives.
macro_rules! wire_union {
    (@impls $name:ident, $self_ty:ty, [$($gen:ident),*] $shape:expr, $array_shape:expr;
        first = $first:ident($fty:ty);
        $( $var:ident($ty:ty) => ($is:ident, $as_ref:ident, $into:ident) ),+
    ) => {
        impl<$($gen: $crate::wire::WireValue),*> $self_ty {
            /// Wire shapes of the alternatives, in trial order.
            pub const ALTERNATIVES: &'static [&'static str] =
                &[$(<$ty as $crate::wire::WireValue>::SHAPE),+];

            /// Zero-based index of the held alternative.
            #[must_use]
            pub fn alternative(&self) -> usize {
                let mut index = 0;
                $(
                    if matches!(self, Self::$var(_)) {
                        return index;
                    }
                    index += 1;
                )+
                index
            }

            /// Wire shape of the held alternative.
            #[must_use]
            pub fn held_shape(&self) -> &'static str {
                match self {
                    $( Self::$var(_) => <$ty as $crate::wire::WireValue>::SHAPE, )+
                }
            }

            $(
                #[doc = concat!("Returns true when the `", stringify!($var), "` alternative is held.")]
                #[must_use]
                pub fn $is(&self) -> bool {
                    matches!(self, Self::$var(_))
                }

                #[doc = concat!("Borrows the `", stringify!($var), "` alternative, if held.")]
                #[must_use]
                pub fn $as_ref(&self) -> Option<&$ty> {
                    match self {
                        Self::$var(value) => Some(value),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                #[doc = concat!("Extracts the `", stringify!($var), "` alternative.")]
                ///
                /// # Errors
                ///
                /// Returns [`WrongAlternative`](lspwire_core::WrongAlternative)
                /// when another alternative is held.
                pub fn $into(self) -> Result<$ty, ::lspwire_core::WrongAlternative> {
                    match self {
                        Self::$var(value) => Ok(value),
                        #[allow(unreachable_patterns)]
                        other => Err(::lspwire_core::WrongAlternative {
                            requested: <$ty as $crate::wire::WireValue>::SHAPE,
                            held: other.held_shape(),
                        }),
                    }
                }
            )+
        }

        impl<$($gen),*> Default for $self_ty
        where
            $fty: Default,
        {
            fn default() -> Self {
                Self::$first(<$fty>::default())
            }
        }

        impl<$($gen),*> ::lspwire_core::Reset for $self_ty
        where
            $fty: Default,
        {
            fn reset(&mut self) {
                *self = Self::default();
            }
        }

        impl<$($gen: $crate::wire::WireValue),*> $crate::wire::WireValue for $self_ty {
            const SHAPE: &'static str = $shape;
            const ARRAY_SHAPE: &'static str = $array_shape;

            /// A present union is never empty; absence is modelled by `Option`.
            fn is_empty(&self) -> bool {
                false
            }
        }

        impl<$($gen: ::serde::Serialize),*> ::serde::Serialize for $self_ty {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $( Self::$var(value) => ::serde::Serialize::serialize(value, serializer), )+
                }
            }
        }

        impl<'de, $($gen: ::serde::de::DeserializeOwned + $crate::wire::WireValue),*>
            ::serde::Deserialize<'de> for $self_ty
        {
            fn deserialize<De: ::serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
                let tree = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                $(
                    match $crate::standard::from_value::<$ty>(&tree) {
                        Ok(value) => return Ok(Self::$var(value)),
                        Err(err) => ::lspwire_core::log_union!(
                            "{} rejected by {}: {}",
                            <$ty as $crate::wire::WireValue>::SHAPE,
                            stringify!($name),
                            err
                        ),
                    }
                )+
                Err(<De::Error as ::serde::de::Error>::unknown_variant(
                    $crate::wire::json_kind(&tree),
                    Self::ALTERNATIVES,
                ))
            }
        }

        impl<$($gen: $crate::stream::StreamValue),*> $crate::stream::StreamValue for $self_ty {
            fn decode<'de, De: ::serde::Deserializer<'de>>(
                de: De,
                cx: &mut $crate::stream::DecodeContext,
            ) -> Result<Self, De::Error> {
                let raw = <&'de ::serde_json::value::RawValue as ::serde::Deserialize<'de>>::deserialize(de)?;
                $(
                    if let Some(value) = $crate::stream::trial::<$ty>(raw, cx) {
                        return Ok(Self::$var(value));
                    }
                )+
                Err($crate::stream::mismatch(cx, raw, Self::ALTERNATIVES))
            }

            fn encode(&self, w: &mut $crate::stream::StreamWriter<'_>) -> ::std::io::Result<()> {
                match self {
                    $( Self::$var(value) => $crate::stream::StreamValue::encode(value, w), )+
                }
            }

            fn size_hint(&self) -> usize {
                match self {
                    $( Self::$var(value) => $crate::stream::StreamValue::size_hint(value), )+
                }
            }
        }
    };

    (
        $(#[$meta:meta])*
        pub enum $name:ident<$($gen:ident),+> {
            $(#[$fmeta:meta])*
            $first:ident($fty:ty) => ($fis:ident, $fas:ident, $finto:ident)
            $(, $(#[$vmeta:meta])* $var:ident($ty:ty) => ($is:ident, $as_ref:ident, $into:ident))* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name<$($gen),+> {
            $(#[$fmeta])*
            $first($fty),
            $($(#[$vmeta])* $var($ty),)*
        }

        $crate::union::wire_union!(@impls $name, $name<$($gen),+>, [$($gen),+] "union", "union[]";
            first = $first($fty);
            $first($fty) => ($fis, $fas, $finto)
            $(, $var($ty) => ($is, $as_ref, $into))*
        );
    };

    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(#[$fmeta:meta])*
            $first:ident($fty:ty) => ($fis:ident, $fas:ident, $finto:ident)
            $(, $(#[$vmeta:meta])* $var:ident($ty:ty) => ($is:ident, $as_ref:ident, $into:ident))* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $(#[$fmeta])*
            $first($fty),
            $($(#[$vmeta])* $var($ty),)*
        }

        impl From<$fty> for $name {
            fn from(value: $fty) -> Self {
                Self::$first(value)
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    Self::$var(value)
                }
            }
        )*

        $crate::union::wire_union!(@impls $name, $name, [] stringify!($name), concat!(stringify!($name), "[]");
            first = $first($fty);
            $first($fty) => ($fis, $fas, $finto)
            $(, $var($ty) => ($is, $as_ref, $into))*
        );
    };
}

pub(crate) use wire_union;

wire_union! {
    /// A value of one of two types.
    pub enum Or2<A, B> {
        A(A) => (is_a, as_a, into_a),
        B(B) => (is_b, as_b, into_b),
    }
}

wire_union! {
    /// A value of one of three types.
    pub enum Or3<A, B, C> {
        A(A) => (is_a, as_a, into_a),
        B(B) => (is_b, as_b, into_b),
        C(C) => (is_c, as_c, into_c),
    }
}

wire_union! {
    /// A value of one of four types.
    pub enum Or4<A, B, C, D> {
        A(A) => (is_a, as_a, into_a),
        B(B) => (is_b, as_b, into_b),
        C(C) => (is_c, as_c, into_c),
        D(D) => (is_d, as_d, into_d),
    }
}
