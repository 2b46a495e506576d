//! Centralized configuration for lspwire codecs.
//!
//! `CodecConfig` can be built programmatically, read from environment
//! variables, or parsed from a TOML document.

use serde::Deserialize;
use std::env;
use std::fmt;

/// Default number of idle instances a pool keeps.
pub const DEFAULT_POOL_CAPACITY: usize = 64;

/// Which codec adapter encodes and decodes protocol values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Tree-walking adapter built on serde's data model.
    Standard,
    /// Token-driven adapter with per-type dispatch.
    #[default]
    Streaming,
}

impl Backend {
    /// Returns the other backend.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Backend::Standard => Backend::Streaming,
            Backend::Streaming => Backend::Standard,
        }
    }

    /// Returns the lowercase name used in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Standard => "standard",
            Backend::Streaming => "streaming",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Backend used by the dispatching codec.
    pub backend: Backend,
    /// Maximum idle instances retained by each pool.
    pub pool_capacity: usize,
    /// Run the other backend as well and log any divergence.
    pub cross_check: bool,
    /// Log raw wire payloads at trace level.
    pub trace_payloads: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            pool_capacity: DEFAULT_POOL_CAPACITY,
            cross_check: false,
            trace_payloads: false,
        }
    }
}

impl CodecConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables
    ///
    /// # Environment Variables
    ///
    /// | Variable | Values | Description |
    /// |----------|--------|-------------|
    /// | `LSPWIRE_BACKEND` | standard/streaming | Codec backend |
    /// | `LSPWIRE_POOL_CAPACITY` | integer | Idle instances per pool |
    /// | `LSPWIRE_CROSS_CHECK` | 0/1 | Compare both backends |
    /// | `LSPWIRE_TRACE_PAYLOADS` | 0/1 | Trace raw payloads |
    ///
    /// Unparseable values leave the default in place.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("LSPWIRE_BACKEND") {
            config.backend = match val.to_lowercase().as_str() {
                "standard" | "reflective" => Backend::Standard,
                // "streaming" and any other value default to Streaming
                _ => Backend::Streaming,
            };
        }
        if let Some(capacity) = lookup("LSPWIRE_POOL_CAPACITY").and_then(|v| v.parse().ok()) {
            config.pool_capacity = capacity;
        }
        if let Some(val) = lookup("LSPWIRE_CROSS_CHECK") {
            config.cross_check = is_truthy(&val);
        }
        if let Some(val) = lookup("LSPWIRE_TRACE_PAYLOADS") {
            config.trace_payloads = is_truthy(&val);
        }

        config
    }

    /// Parses a config from TOML.
    ///
    /// ```
    /// use lspwire_core::{Backend, CodecConfig};
    ///
    /// let config = CodecConfig::from_toml_str("backend = \"standard\"\npool_capacity = 8").unwrap();
    /// assert_eq!(config.backend, Backend::Standard);
    /// assert_eq!(config.pool_capacity, 8);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Toml)
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    /// Set the backend
    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the pool capacity
    #[must_use]
    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Enable backend cross-checking
    #[must_use]
    pub fn with_cross_check(mut self, enabled: bool) -> Self {
        self.cross_check = enabled;
        self
    }

    /// Enable payload tracing
    #[must_use]
    pub fn with_payload_tracing(mut self, enabled: bool) -> Self {
        self.trace_payloads = enabled;
        self
    }
}

fn is_truthy(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Error returned when a configuration document cannot be parsed.
#[derive(Debug)]
pub enum ConfigError {
    /// The TOML document is invalid or names unknown settings.
    Toml(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Toml(e) => write!(f, "invalid codec config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Toml(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CodecConfig::new();
        assert_eq!(config.backend, Backend::Streaming);
        assert_eq!(config.pool_capacity, DEFAULT_POOL_CAPACITY);
        assert!(!config.cross_check);
        assert!(!config.trace_payloads);
    }

    #[test]
    fn test_builder_pattern() {
        let config = CodecConfig::new()
            .with_backend(Backend::Standard)
            .with_pool_capacity(4)
            .with_cross_check(true)
            .with_payload_tracing(true);

        assert_eq!(config.backend, Backend::Standard);
        assert_eq!(config.pool_capacity, 4);
        assert!(config.cross_check);
        assert!(config.trace_payloads);
    }

    #[test]
    fn test_env_lookup() {
        let config = CodecConfig::from_lookup(lookup(&[
            ("LSPWIRE_BACKEND", "Standard"),
            ("LSPWIRE_POOL_CAPACITY", "12"),
            ("LSPWIRE_CROSS_CHECK", "1"),
            ("LSPWIRE_TRACE_PAYLOADS", "false"),
        ]));
        assert_eq!(config.backend, Backend::Standard);
        assert_eq!(config.pool_capacity, 12);
        assert!(config.cross_check);
        assert!(!config.trace_payloads);
    }

    #[test]
    fn test_env_lookup_ignores_garbage() {
        let config = CodecConfig::from_lookup(lookup(&[
            ("LSPWIRE_BACKEND", "quantum"),
            ("LSPWIRE_POOL_CAPACITY", "many"),
        ]));
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn test_toml_partial_document() {
        let config = CodecConfig::from_toml_str("cross_check = true").unwrap();
        assert!(config.cross_check);
        assert_eq!(config.backend, Backend::Streaming);
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let err = CodecConfig::from_toml_str("backnd = \"standard\"").unwrap_err();
        assert!(err.to_string().contains("invalid codec config"));
    }

    #[test]
    fn test_backend_other() {
        assert_eq!(Backend::Standard.other(), Backend::Streaming);
        assert_eq!(Backend::Streaming.other(), Backend::Standard);
        assert_eq!(Backend::Standard.to_string(), "standard");
    }
}
