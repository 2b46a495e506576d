//! Test utilities for lspwire.
//!
//! The assertions run every check through both codec backends, so a test
//! written against one type covers the whole backend contract:
//!
//! - [`assert_round_trip`]: `decode(encode(x)) == x` under each backend
//! - [`assert_backends_agree`]: both backends write the same bytes
//! - [`assert_decode_agrees`]: both backends decode a payload to the same value
//! - [`assert_decode_fails_alike`]: both backends reject a payload with the
//!   same error kind at the same path
//!
//! [`fixtures`] holds populated protocol values that exercise every union
//! alternative at least once.
//!
//! # Example
//!
//! ```
//! use lspwire::testing::{assert_round_trip, fixtures};
//!
//! assert_round_trip(&fixtures::hover_marked_list());
//! ```

mod assertions;
pub mod fixtures;

pub use assertions::{
    assert_backends_agree, assert_decode_agrees, assert_decode_fails_alike, assert_round_trip,
};
