//! LSP data model and wire codecs.
//!
//! This crate provides:
//! - The Key Table: every wire key, spelled once
//! - Union containers for sum-of-types fields
//! - Two interchangeable codec backends:
//!   - [`standard`]: tree-walking, built on serde's data model
//!   - [`stream`]: token-driven, no intermediate tree, in-place decoding
//! - [`Codec`]: configured dispatch between the backends
//! - The protocol record types
//!
//! # Wire Format
//!
//! Values are compact JSON. Both backends produce byte-identical output
//! for the same value and accept exactly the same inputs.
//!
//! # Example
//!
//! ```
//! use lspwire_protocol::{stream, standard, Location, Or2};
//!
//! let wire = br#"[{"uri":"file:///a.rs","range":{"start":{"line":1,"character":0},"end":{"line":1,"character":4}}}]"#;
//! let decoded: Or2<Location, Vec<Location>> = stream::from_slice(wire).unwrap();
//! assert!(decoded.is_b());
//! assert_eq!(standard::from_slice::<Or2<Location, Vec<Location>>>(wire).unwrap(), decoded);
//! ```

#![forbid(unsafe_code)]

mod codec;
pub mod keys;
mod record;
pub mod standard;
pub mod stream;
mod types;
mod union;
mod uri;
pub mod wire;

pub use codec::{decode_with, encode_with, Codec, WireType};
pub use types::*;
pub use union::{Or2, Or3, Or4};
pub use uri::DocumentUri;
pub use wire::{WireRecord, WireValue};
