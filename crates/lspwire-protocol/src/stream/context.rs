use lspwire_core::{DecodeError, DecodeErrorKind, WirePath};
use serde_json::error::Category;
use std::borrow::Cow;

/// Decode state threaded through every streaming decoder.
///
/// Tracks the path of the value being decoded and records the first
/// structured failure. `serde_json::Error` carries only a message and a
/// position, so the kind and path of a failure live here instead and are
/// joined with the tokenizer's error by [`DecodeContext::finish`].
#[derive(Debug, Default)]
pub struct DecodeContext {
    path: WirePath,
    error: Option<DecodeError>,
}

impl DecodeContext {
    /// Creates a context positioned at the document root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the path of the value currently being decoded.
    #[must_use]
    pub fn path(&self) -> &WirePath {
        &self.path
    }

    /// Descends into an object member.
    pub fn enter_key(&mut self, key: impl Into<Cow<'static, str>>) {
        self.path.push_key(key);
    }

    /// Descends into an array element.
    pub fn enter_index(&mut self, index: usize) {
        self.path.push_index(index);
    }

    /// Returns to the parent value.
    ///
    /// Not called on the error path, so a recorded failure keeps the full
    /// path of the offending value.
    pub fn leave(&mut self) {
        self.path.pop();
    }

    /// Records a failure at the current path. The first failure wins.
    pub fn fail(&mut self, kind: DecodeErrorKind) {
        if self.error.is_none() {
            self.error = Some(DecodeError::new(self.path.clone(), kind));
        }
    }

    /// Creates a scratch context for a union trial.
    ///
    /// Failures recorded in the fork never reach this context.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            path: self.path.clone(),
            error: None,
        }
    }

    /// Converts the error that aborted a decode into a [`DecodeError`].
    ///
    /// A recorded structured failure takes precedence. Otherwise syntax
    /// and I/O errors surface verbatim as `MalformedWire` and anything
    /// else becomes `InvalidValue` at the current path.
    #[must_use]
    pub fn finish(self, err: serde_json::Error) -> DecodeError {
        if let Some(recorded) = self.error {
            return recorded;
        }
        match err.classify() {
            Category::Data => DecodeError::new(self.path, DecodeErrorKind::InvalidValue(err.to_string())),
            Category::Syntax | Category::Eof | Category::Io => DecodeError::malformed(err),
        }
    }
}
