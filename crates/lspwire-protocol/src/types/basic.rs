//! Structures shared by most requests: positions, ranges, locations and edits.

use crate::keys;
use crate::record::{wire_enum, wire_record};
use crate::uri::DocumentUri;

wire_record! {
    /// A zero-based line and character offset in a text document.
    pub struct Position {
        /// Line number.
        line: u32 = keys::LINE, required;
        /// Character offset on the line, in UTF-16 code units.
        character: u32 = keys::CHARACTER, required;
    }
}

wire_record! {
    /// A range in a text document; `end` is exclusive.
    pub struct Range {
        start: Position = keys::START, required;
        end: Position = keys::END, required;
    }
}

wire_record! {
    /// A range inside a resource.
    pub struct Location {
        uri: DocumentUri = keys::URI, required;
        range: Range = keys::RANGE, required;
    }
}

wire_record! {
    /// A link between a source and a target location.
    pub struct LocationLink {
        /// Span of the origin of this link, for highlighting.
        origin_selection_range: Option<Range> = keys::ORIGIN_SELECTION_RANGE, omitempty;
        /// The target resource.
        target_uri: DocumentUri = keys::TARGET_URI, required;
        /// Full target range, e.g. a whole function body.
        target_range: Range = keys::TARGET_RANGE, required;
        /// The part of `target_range` to select, e.g. the function name.
        target_selection_range: Range = keys::TARGET_SELECTION_RANGE, required;
    }
}

wire_record! {
    /// Identifies a text document.
    pub struct TextDocumentIdentifier {
        uri: DocumentUri = keys::URI, required;
    }
}

wire_record! {
    /// Identifies a specific version of a text document.
    pub struct VersionedTextDocumentIdentifier {
        uri: DocumentUri = keys::URI, required;
        version: i32 = keys::VERSION, required;
    }
}

wire_record! {
    /// A text document transferred from the client to the server.
    pub struct TextDocumentItem {
        uri: DocumentUri = keys::URI, required;
        /// Language identifier, e.g. `rust`.
        language_id: String = keys::LANGUAGE_ID, required;
        version: i32 = keys::VERSION, required;
        /// Full content of the document.
        text: String = keys::TEXT, required;
    }
}

wire_record! {
    /// A document and a position inside it.
    pub struct TextDocumentPositionParams {
        text_document: TextDocumentIdentifier = keys::TEXT_DOCUMENT, required;
        position: Position = keys::POSITION, required;
    }
}

wire_record! {
    /// A textual replacement.
    pub struct TextEdit {
        /// Range to replace; empty to insert.
        range: Range = keys::RANGE, required;
        /// Replacement text; empty to delete.
        new_text: String = keys::NEW_TEXT, required;
    }
}

wire_record! {
    /// A completion edit with distinct insert and replace ranges.
    pub struct InsertReplaceEdit {
        new_text: String = keys::NEW_TEXT, required;
        /// Range used when the completion is inserted.
        insert: Range = keys::INSERT, required;
        /// Range used when the completion replaces text.
        replace: Range = keys::REPLACE, required;
    }
}

wire_enum! {
    /// Format of a [`MarkupContent`] value.
    pub enum MarkupKind: string {
        PlainText = "plaintext",
        Markdown = "markdown",
    }
}

wire_record! {
    /// Human-readable content in plain text or markdown.
    pub struct MarkupContent {
        kind: MarkupKind = keys::KIND, required;
        value: String = keys::VALUE, required;
    }
}

wire_record! {
    /// A reference to a command the client can run.
    pub struct Command {
        /// Title shown in the UI.
        title: String = keys::TITLE, required;
        /// Identifier of the command handler.
        command: String = keys::COMMAND, required;
        arguments: Option<Vec<serde_json::Value>> = keys::ARGUMENTS, omitempty;
    }
}

impl Position {
    #[must_use]
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl Range {
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns true when `start == end`.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

impl Location {
    pub fn new(uri: impl Into<DocumentUri>, range: Range) -> Self {
        Self {
            uri: uri.into(),
            range,
        }
    }
}

impl TextDocumentIdentifier {
    pub fn new(uri: impl Into<DocumentUri>) -> Self {
        Self { uri: uri.into() }
    }
}

impl TextEdit {
    pub fn new(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }
}

impl MarkupContent {
    pub fn markdown(value: impl Into<String>) -> Self {
        Self {
            kind: MarkupKind::Markdown,
            value: value.into(),
        }
    }

    pub fn plain_text(value: impl Into<String>) -> Self {
        Self {
            kind: MarkupKind::PlainText,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{standard, stream};

    #[test]
    fn position_wire_form() {
        let wire = br#"{"line":3,"character":14}"#;
        assert_eq!(stream::to_vec(&Position::new(3, 14)).unwrap(), wire);
        assert_eq!(stream::from_slice::<Position>(wire).unwrap(), Position::new(3, 14));
        assert_eq!(standard::from_slice::<Position>(wire).unwrap(), Position::new(3, 14));
    }

    #[test]
    fn member_order_on_the_wire_does_not_matter() {
        let wire = br#"{"range":{"end":{"character":2,"line":0},"start":{"line":0,"character":0}},"uri":"file:///x"}"#;
        let expected = Location::new("file:///x", Range::new(Position::new(0, 0), Position::new(0, 2)));
        assert_eq!(stream::from_slice::<Location>(wire).unwrap(), expected);
        assert_eq!(standard::from_slice::<Location>(wire).unwrap(), expected);
    }

    #[test]
    fn unknown_members_are_ignored() {
        let wire = br#"{"line":1,"character":2,"extra":{"nested":[1,2,{"deep":null}]}}"#;
        assert_eq!(stream::from_slice::<Position>(wire).unwrap(), Position::new(1, 2));
        assert_eq!(standard::from_slice::<Position>(wire).unwrap(), Position::new(1, 2));
    }

    #[test]
    fn repeated_member_keeps_last_value() {
        let wire = br#"{"line":1,"character":2,"line":5}"#;
        assert_eq!(stream::from_slice::<Position>(wire).unwrap(), Position::new(5, 2));
        assert_eq!(standard::from_slice::<Position>(wire).unwrap(), Position::new(5, 2));
    }

    #[test]
    fn missing_nested_member_has_full_path() {
        let wire = br#"{"uri":"file:///x","range":{"start":{"line":0,"character":0},"end":{"line":0}}}"#;
        for err in [
            stream::from_slice::<Location>(wire).unwrap_err(),
            standard::from_slice::<Location>(wire).unwrap_err(),
        ] {
            assert_eq!(err.path().to_string(), "root.range.end");
            assert_eq!(err.kind_name(), "missing_field");
        }
    }

    #[test]
    fn markup_kind_is_validated() {
        let wire = br#"{"kind":"html","value":"<b>"}"#;
        let err = stream::from_slice::<MarkupContent>(wire).unwrap_err();
        assert_eq!(err.path().to_string(), "root.kind");
        assert_eq!(err.kind_name(), "invalid_value");
        let err = standard::from_slice::<MarkupContent>(wire).unwrap_err();
        assert_eq!(err.path().to_string(), "root.kind");
        assert_eq!(err.kind_name(), "invalid_value");
    }

    #[test]
    fn command_arguments_are_opaque() {
        let wire = br#"{"title":"Run","command":"run","arguments":[1,"two",{"three":3}]}"#;
        let command: Command = stream::from_slice(wire).unwrap();
        assert_eq!(command.arguments.as_ref().map(Vec::len), Some(3));
        assert_eq!(stream::to_vec(&command).unwrap(), wire);
        assert_eq!(standard::to_vec(&command).unwrap(), wire);
    }

    #[test]
    fn collapsed_range() {
        let p = Position::new(4, 4);
        assert!(Range::new(p.clone(), p).is_collapsed());
    }
}
