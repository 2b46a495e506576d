use lspwire_core::Reset;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::io;

use crate::stream::{DecodeContext, StreamValue, StreamWriter, WireMapKey};
use crate::wire::WireValue;

/// A document URI.
///
/// Opaque to the codec: carried as a string, neither parsed nor
/// normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentUri(String);

impl DocumentUri {
    /// Wraps a URI string.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for DocumentUri {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

impl From<&str> for DocumentUri {
    fn from(uri: &str) -> Self {
        Self(uri.to_owned())
    }
}

impl AsRef<str> for DocumentUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl WireValue for DocumentUri {
    const SHAPE: &'static str = "DocumentUri";
    const ARRAY_SHAPE: &'static str = "DocumentUri[]";

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Reset for DocumentUri {
    fn reset(&mut self) {
        self.0.clear();
    }
}

impl StreamValue for DocumentUri {
    fn decode<'de, D: Deserializer<'de>>(de: D, cx: &mut DecodeContext) -> Result<Self, D::Error> {
        String::decode(de, cx).map(Self)
    }

    fn decode_in_place<'de, D: Deserializer<'de>>(
        &mut self,
        de: D,
        cx: &mut DecodeContext,
    ) -> Result<(), D::Error> {
        self.0.decode_in_place(de, cx)
    }

    fn encode(&self, w: &mut StreamWriter<'_>) -> io::Result<()> {
        w.str(&self.0)
    }

    fn size_hint(&self) -> usize {
        self.0.len() + 2
    }
}

impl WireMapKey for DocumentUri {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{standard, stream};

    #[test]
    fn uri_is_a_plain_string_on_the_wire() {
        let uri = DocumentUri::from("file:///tmp/a%20b.rs");
        let wire = serde_json::to_string(&uri).unwrap();
        assert_eq!(wire, "\"file:///tmp/a%20b.rs\"");
        assert_eq!(stream::to_vec(&uri).unwrap(), wire.as_bytes());

        assert_eq!(standard::from_str::<DocumentUri>(&wire).unwrap(), uri);
        assert_eq!(stream::from_str::<DocumentUri>(&wire).unwrap(), uri);
    }

    #[test]
    fn uri_rejects_non_strings() {
        assert!(standard::from_str::<DocumentUri>("1").unwrap_err().is_unexpected_kind());
        assert!(stream::from_str::<DocumentUri>("1").unwrap_err().is_unexpected_kind());
    }
}
