//! Structured logging for lspwire.
//!
//! Built on the standard [`log`] facade. lspwire does not include a log
//! implementation; applications install their preferred backend.
//!
//! # Log Levels
//!
//! - **warn**: backend divergence detected by a cross-check
//! - **debug**: decode failures, pool evictions
//! - **trace**: failed union trials, ignored keys, raw payloads
//!
//! # Log Targets
//!
//! - `lspwire`: Root target for all lspwire logs
//! - `lspwire::codec`: Backend dispatch and cross-checks
//! - `lspwire::standard`: Tree-walking backend
//! - `lspwire::stream`: Streaming backend
//! - `lspwire::union`: Union alternative resolution
//! - `lspwire::pool`: Object pool lifecycle
//!
//! Example filter: `RUST_LOG=lspwire::union=trace,lspwire::codec=debug`

// Re-export log macros for ergonomic use
pub use log::{debug, error, info, trace, warn};

// Re-export log level types for programmatic use
pub use log::{Level, LevelFilter};

/// Log targets used by lspwire components.
pub mod targets {
    /// Root target for all lspwire logs.
    pub const LSPWIRE: &str = "lspwire";

    /// Backend dispatch and cross-checks.
    pub const CODEC: &str = "lspwire::codec";

    /// Tree-walking (standard) backend.
    pub const STANDARD: &str = "lspwire::standard";

    /// Token-driven (streaming) backend.
    pub const STREAM: &str = "lspwire::stream";

    /// Union alternative resolution.
    pub const UNION: &str = "lspwire::union";

    /// Object pool lifecycle.
    pub const POOL: &str = "lspwire::pool";
}

/// Returns whether logging is enabled at the given level for the given target.
///
/// Useful before rendering payloads for trace output:
///
/// ```
/// use lspwire_core::logging::{is_enabled, targets, Level};
///
/// if is_enabled(Level::Trace, targets::STREAM) {
///     // format the raw payload
/// }
/// ```
#[inline]
#[must_use]
pub fn is_enabled(level: Level, target: &str) -> bool {
    log::log_enabled!(target: target, level)
}

/// Logs a backend dispatch event at DEBUG level.
#[macro_export]
macro_rules! log_codec {
    ($($arg:tt)*) => {
        $crate::logging::debug!(target: "lspwire::codec", $($arg)*)
    };
}

/// Logs a union resolution event at TRACE level.
#[macro_export]
macro_rules! log_union {
    ($($arg:tt)*) => {
        $crate::logging::trace!(target: "lspwire::union", $($arg)*)
    };
}

/// Logs an object pool event at DEBUG level.
#[macro_export]
macro_rules! log_pool {
    ($($arg:tt)*) => {
        $crate::logging::debug!(target: "lspwire::pool", $($arg)*)
    };
}
