//! Diagnostics published by the server.

use super::basic::{Location, Range};
use crate::keys;
use crate::record::{wire_enum, wire_record};
use crate::union::Or2;
use crate::uri::DocumentUri;

wire_enum! {
    pub enum DiagnosticSeverity: integer {
        Error = 1,
        Warning = 2,
        Information = 3,
        Hint = 4,
    }
}

wire_enum! {
    pub enum DiagnosticTag: integer {
        /// Unused or unnecessary code; rendered faded out.
        Unnecessary = 1,
        /// Deprecated or obsolete code; rendered struck through.
        Deprecated = 2,
    }
}

/// A diagnostic code: `integer | string`.
pub type DiagnosticCode = Or2<i32, String>;

wire_record! {
    /// Link to documentation for a diagnostic code.
    pub struct CodeDescription {
        href: String = keys::HREF, required;
    }
}

wire_record! {
    /// A secondary location relevant to a diagnostic.
    pub struct DiagnosticRelatedInformation {
        location: Location = keys::LOCATION, required;
        message: String = keys::MESSAGE, required;
    }
}

wire_record! {
    /// A compiler error, warning or hint.
    pub struct Diagnostic {
        range: Range = keys::RANGE, required;
        severity: Option<DiagnosticSeverity> = keys::SEVERITY, omitempty;
        code: Option<DiagnosticCode> = keys::CODE, omitempty;
        code_description: Option<CodeDescription> = keys::CODE_DESCRIPTION, omitempty;
        /// Producer of the diagnostic, e.g. `rustc`.
        source: Option<String> = keys::SOURCE, omitempty;
        message: String = keys::MESSAGE, required;
        tags: Option<Vec<DiagnosticTag>> = keys::TAGS, omitempty;
        related_information: Option<Vec<DiagnosticRelatedInformation>> = keys::RELATED_INFORMATION, omitempty;
        /// Preserved between a publish and a later code action request.
        data: Option<serde_json::Value> = keys::DATA, omitempty;
    }
}

wire_record! {
    /// Payload of `textDocument/publishDiagnostics`.
    pub struct PublishDiagnosticsParams {
        uri: DocumentUri = keys::URI, required;
        version: Option<i32> = keys::VERSION, omitempty;
        /// Empty clears all diagnostics for the document.
        diagnostics: Vec<Diagnostic> = keys::DIAGNOSTICS, always;
    }
}

impl Diagnostic {
    pub fn new(range: Range, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;
    use crate::{standard, stream};

    fn range() -> Range {
        Range::new(Position::new(2, 0), Position::new(2, 8))
    }

    #[test]
    fn code_resolves_per_alternative() {
        let wire = br#"{"range":{"start":{"line":2,"character":0},"end":{"line":2,"character":8}},"code":"E0308","message":"mismatched types"}"#;
        let diagnostic: Diagnostic = stream::from_slice(wire).unwrap();
        assert_eq!(diagnostic.code, Some(DiagnosticCode::B("E0308".into())));
        assert_eq!(standard::from_slice::<Diagnostic>(wire).unwrap(), diagnostic);
        assert_eq!(stream::to_vec(&diagnostic).unwrap(), wire);
    }

    #[test]
    fn severity_and_tags_are_integer_codes() {
        let diagnostic = Diagnostic {
            tags: Some(vec![DiagnosticTag::Deprecated]),
            ..Diagnostic::new(range(), "old").with_severity(DiagnosticSeverity::Hint)
        };
        let wire = stream::to_vec(&diagnostic).unwrap();
        assert_eq!(
            wire,
            br#"{"range":{"start":{"line":2,"character":0},"end":{"line":2,"character":8}},"severity":4,"message":"old","tags":[2]}"#
        );
        assert_eq!(standard::to_vec(&diagnostic).unwrap(), wire);
    }

    #[test]
    fn unknown_severity_is_invalid() {
        let wire = br#"{"range":{"start":{"line":0,"character":0},"end":{"line":0,"character":0}},"severity":9,"message":""}"#;
        for err in [
            stream::from_slice::<Diagnostic>(wire).unwrap_err(),
            standard::from_slice::<Diagnostic>(wire).unwrap_err(),
        ] {
            assert_eq!(err.kind_name(), "invalid_value");
            assert_eq!(err.path().to_string(), "root.severity");
        }
    }

    #[test]
    fn empty_diagnostics_are_still_emitted() {
        let params = PublishDiagnosticsParams {
            uri: "file:///lib.rs".into(),
            ..PublishDiagnosticsParams::default()
        };
        let expected = br#"{"uri":"file:///lib.rs","diagnostics":[]}"#;
        assert_eq!(stream::to_vec(&params).unwrap(), expected);
        assert_eq!(standard::to_vec(&params).unwrap(), expected);

        let back: PublishDiagnosticsParams = stream::from_slice(br#"{"uri":"file:///lib.rs"}"#).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn bad_element_reports_index_path() {
        let wire = br#"{"uri":"u","diagnostics":[{"range":{"start":{"line":0,"character":0},"end":{"line":0,"character":0}},"message":"ok"},{"message":"no range"}]}"#;
        for err in [
            stream::from_slice::<PublishDiagnosticsParams>(wire).unwrap_err(),
            standard::from_slice::<PublishDiagnosticsParams>(wire).unwrap_err(),
        ] {
            assert_eq!(err.path().to_string(), "root.diagnostics[1]");
            assert_eq!(err.kind_name(), "missing_field");
        }
    }
}
