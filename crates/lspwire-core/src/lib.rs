//! Core types for lspwire.
//!
//! This crate provides the protocol-agnostic building blocks shared by
//! both codec backends:
//! - The decode/encode error taxonomy with field paths
//! - Logging targets over the `log` facade
//! - [`CodecConfig`] and backend selection
//! - The [`Reset`] trait and the [`Pool`] used by the streaming decoder
//!
//! # Design Principles
//!
//! - Decoding is all-or-nothing; no partial value escapes a failed call
//! - All types are `Send + Sync` where their contents allow
//! - No I/O; callers own transport and framing

#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod logging;
pub mod pool;

pub use config::{Backend, CodecConfig, ConfigError};
pub use error::{
    DecodeError, DecodeErrorKind, EncodeError, PathSegment, WirePath, WrongAlternative,
};
pub use pool::{Pool, Pooled, Reset};
