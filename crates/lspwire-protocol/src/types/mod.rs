//! LSP protocol types.
//!
//! Every record is declared once with `wire_record!` and supports both
//! codec backends.

mod basic;
mod capabilities;
mod diagnostic;
mod language;
mod lifecycle;
mod progress;
mod workspace;

pub use basic::*;
pub use capabilities::*;
pub use diagnostic::*;
pub use language::*;
pub use lifecycle::*;
pub use progress::*;
pub use workspace::*;
