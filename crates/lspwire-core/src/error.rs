//! Error types for lspwire codec operations.
//!
//! Decoding is all-or-nothing: any field-level failure aborts the whole
//! call and surfaces as a single [`DecodeError`] carrying the path of the
//! field that diverged from the expected schema.

use std::borrow::Cow;
use std::fmt;

/// One step in a [`WirePath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// An object key.
    Key(Cow<'static, str>),
    /// An array index.
    Index(usize),
}

/// Location of a value inside a decoded document.
///
/// Renders as `root.capabilities.hoverProvider` or `root.items[3].range`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WirePath {
    segments: Vec<PathSegment>,
}

impl WirePath {
    /// Creates the root path.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the segments from the root down.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns true if this is the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends an object key.
    pub fn push_key(&mut self, key: impl Into<Cow<'static, str>>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    /// Appends an array index.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// Removes the innermost segment.
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    /// Inserts a segment above every existing one.
    ///
    /// Used while an error bubbles up from a nested value.
    pub fn prepend(&mut self, segment: PathSegment) {
        self.segments.insert(0, segment);
    }
}

impl fmt::Display for WirePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// What went wrong during a decode.
#[derive(Debug)]
pub enum DecodeErrorKind {
    /// A union value matched none of its declared alternatives.
    TypeMismatch {
        /// JSON kind of the offending value.
        found: String,
        /// Alternatives tried, in trial order.
        alternatives: &'static [&'static str],
    },
    /// The input is not well-formed JSON.
    MalformedWire(serde_json::Error),
    /// A value has the wrong JSON kind for its field.
    UnexpectedKind {
        /// Shape the field requires.
        expected: String,
        /// What the wire carried instead.
        found: String,
    },
    /// A required key is absent.
    MissingField(&'static str),
    /// The JSON kind is right but the value is outside the field's domain.
    InvalidValue(String),
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::TypeMismatch {
                found,
                alternatives,
            } => write!(
                f,
                "{found} matched none of the alternatives ({})",
                alternatives.join(" | ")
            ),
            DecodeErrorKind::MalformedWire(e) => write!(f, "{e}"),
            DecodeErrorKind::UnexpectedKind { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            DecodeErrorKind::MissingField(key) => write!(f, "missing required field `{key}`"),
            DecodeErrorKind::InvalidValue(detail) => write!(f, "invalid value: {detail}"),
        }
    }
}

/// Error returned when wire bytes cannot be decoded into a protocol type.
#[derive(Debug)]
pub struct DecodeError {
    path: WirePath,
    kind: DecodeErrorKind,
}

impl DecodeError {
    /// Creates an error at the given path.
    #[must_use]
    pub fn new(path: WirePath, kind: DecodeErrorKind) -> Self {
        Self { path, kind }
    }

    /// Wraps a tokenizer error verbatim.
    #[must_use]
    pub fn malformed(err: serde_json::Error) -> Self {
        Self::new(WirePath::root(), DecodeErrorKind::MalformedWire(err))
    }

    /// Creates a union resolution failure.
    #[must_use]
    pub fn type_mismatch(
        path: WirePath,
        found: impl Into<String>,
        alternatives: &'static [&'static str],
    ) -> Self {
        Self::new(
            path,
            DecodeErrorKind::TypeMismatch {
                found: found.into(),
                alternatives,
            },
        )
    }

    /// Returns the path of the field that failed.
    #[must_use]
    pub fn path(&self) -> &WirePath {
        &self.path
    }

    /// Returns the failure kind.
    #[must_use]
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Returns true for union resolution failures.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::TypeMismatch { .. })
    }

    /// Returns true when the input was not JSON at all.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::MalformedWire(_))
    }

    /// Returns true when a primitive had the wrong JSON kind.
    #[must_use]
    pub fn is_unexpected_kind(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::UnexpectedKind { .. })
    }

    /// Returns a short, stable name for the kind (for comparisons and logs).
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            DecodeErrorKind::TypeMismatch { .. } => "type_mismatch",
            DecodeErrorKind::MalformedWire(_) => "malformed_wire",
            DecodeErrorKind::UnexpectedKind { .. } => "unexpected_kind",
            DecodeErrorKind::MissingField(_) => "missing_field",
            DecodeErrorKind::InvalidValue(_) => "invalid_value",
        }
    }

    /// Moves the error one object level down, under `key`.
    #[must_use]
    pub fn within_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.path.prepend(PathSegment::Key(key.into()));
        self
    }

    /// Moves the error one array level down, under `index`.
    #[must_use]
    pub fn within_index(mut self, index: usize) -> Self {
        self.path.prepend(PathSegment::Index(index));
        self
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            // Tokenizer errors already carry line/column.
            DecodeErrorKind::MalformedWire(e) => write!(f, "malformed JSON: {e}"),
            kind => write!(f, "{}: {kind}", self.path),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            DecodeErrorKind::MalformedWire(e) => Some(e),
            _ => None,
        }
    }
}

impl serde::de::Error for DecodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::new(
            WirePath::root(),
            DecodeErrorKind::InvalidValue(msg.to_string()),
        )
    }

    fn invalid_type(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        Self::new(
            WirePath::root(),
            DecodeErrorKind::UnexpectedKind {
                expected: exp.to_string(),
                found: unexp.to_string(),
            },
        )
    }

    fn invalid_value(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        Self::new(
            WirePath::root(),
            DecodeErrorKind::InvalidValue(format!("{unexp}, expected {exp}")),
        )
    }

    fn unknown_variant(variant: &str, expected: &'static [&'static str]) -> Self {
        Self::type_mismatch(WirePath::root(), variant, expected)
    }

    fn missing_field(field: &'static str) -> Self {
        Self::new(WirePath::root(), DecodeErrorKind::MissingField(field))
    }
}

/// Error returned when a protocol value cannot be encoded.
#[derive(Debug)]
pub enum EncodeError {
    /// Writing to the output buffer failed.
    Io(std::io::Error),
    /// The standard serializer rejected the value.
    Json(serde_json::Error),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Io(e) => write!(f, "write error: {e}"),
            EncodeError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Io(e) => Some(e),
            EncodeError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for EncodeError {
    fn from(err: std::io::Error) -> Self {
        EncodeError::Io(err)
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Json(err)
    }
}

/// Returned when a caller extracts an alternative a union does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrongAlternative {
    /// Alternative the caller asked for.
    pub requested: &'static str,
    /// Alternative actually held.
    pub held: &'static str,
}

impl fmt::Display for WrongAlternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "union holds {} but {} was requested",
            self.held, self.requested
        )
    }
}

impl std::error::Error for WrongAlternative {}
