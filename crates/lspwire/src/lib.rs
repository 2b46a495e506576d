//! LSP wire model with union-aware, dual-backend JSON codecs.
//!
//! `lspwire` re-exports everything needed to encode and decode protocol
//! values:
//!
//! - Protocol records, enumerations and union containers (`Or2`, `Or3`, `Or4`)
//! - Both codec backends ([`standard`], [`stream`]) and the [`Codec`] dispatcher
//! - [`CodecConfig`], the error taxonomy and the object [`Pool`]
//!
//! # Quick Start
//!
//! ```
//! use lspwire::{Backend, Codec, CodecConfig, Hover};
//!
//! let codec = Codec::new(CodecConfig::new().with_backend(Backend::Streaming));
//! let hover: Hover = codec
//!     .decode(br#"{"contents":{"kind":"markdown","value":"`u32`"}}"#)
//!     .unwrap();
//! assert!(hover.contents.is_a());
//! assert_eq!(codec.encode(&hover).unwrap(), br#"{"contents":{"kind":"markdown","value":"`u32`"}}"#);
//! ```
//!
//! # Pooled Decoding
//!
//! ```
//! use lspwire::{stream, Pool, Position};
//!
//! let pool: Pool<Position> = Pool::new(8);
//! let position = stream::from_slice_pooled(br#"{"line":1,"character":2}"#, &pool).unwrap();
//! assert_eq!(*position, Position::new(1, 2));
//! drop(position);
//! assert_eq!(pool.idle(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod testing;

pub use lspwire_core::logging;
pub use lspwire_core::{
    Backend, CodecConfig, ConfigError, DecodeError, DecodeErrorKind, EncodeError, PathSegment,
    Pool, Pooled, Reset, WirePath, WrongAlternative,
};
pub use lspwire_protocol::*;
