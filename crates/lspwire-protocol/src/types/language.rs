//! Language feature requests: hover, definition, references and completion.

use super::basic::{
    Command, InsertReplaceEdit, Location, LocationLink, MarkupContent, Position, Range,
    TextDocumentIdentifier, TextEdit,
};
use super::progress::ProgressToken;
use crate::keys;
use crate::record::{wire_enum, wire_record};
use crate::union::{wire_union, Or2, Or3};

wire_record! {
    /// A code block tagged with its language.
    pub struct LanguageString {
        language: String = keys::LANGUAGE, required;
        value: String = keys::VALUE, required;
    }
}

wire_union! {
    /// Deprecated hover content: markdown text or a language-tagged code block.
    pub enum MarkedString {
        String(String) => (is_string, as_string, into_string),
        LanguageString(LanguageString) => (is_language_string, as_language_string, into_language_string),
    }
}

/// Contents of a hover.
pub type HoverContents = Or3<MarkupContent, MarkedString, Vec<MarkedString>>;

wire_record! {
    /// Result of a hover request.
    pub struct Hover {
        contents: HoverContents = keys::CONTENTS, required;
        range: Option<Range> = keys::RANGE, omitempty;
    }
}

wire_record! {
    pub struct HoverParams {
        text_document: TextDocumentIdentifier = keys::TEXT_DOCUMENT, required;
        position: Position = keys::POSITION, required;
        work_done_token: Option<ProgressToken> = keys::WORK_DONE_TOKEN, omitempty;
    }
}

wire_record! {
    pub struct DefinitionParams {
        text_document: TextDocumentIdentifier = keys::TEXT_DOCUMENT, required;
        position: Position = keys::POSITION, required;
        work_done_token: Option<ProgressToken> = keys::WORK_DONE_TOKEN, omitempty;
        partial_result_token: Option<ProgressToken> = keys::PARTIAL_RESULT_TOKEN, omitempty;
    }
}

/// Result of `textDocument/definition`: `Location | Location[] | LocationLink[]`.
///
/// An empty array resolves to `Location[]`.
pub type DefinitionResponse = Or3<Location, Vec<Location>, Vec<LocationLink>>;

wire_record! {
    pub struct ReferenceContext {
        /// Include the declaration of the symbol itself.
        include_declaration: bool = keys::INCLUDE_DECLARATION, required;
    }
}

wire_record! {
    pub struct ReferenceParams {
        text_document: TextDocumentIdentifier = keys::TEXT_DOCUMENT, required;
        position: Position = keys::POSITION, required;
        context: ReferenceContext = keys::CONTEXT, required;
        work_done_token: Option<ProgressToken> = keys::WORK_DONE_TOKEN, omitempty;
        partial_result_token: Option<ProgressToken> = keys::PARTIAL_RESULT_TOKEN, omitempty;
    }
}

wire_enum! {
    pub enum CompletionItemKind: integer {
        Text = 1,
        Method = 2,
        Function = 3,
        Constructor = 4,
        Field = 5,
        Variable = 6,
        Class = 7,
        Interface = 8,
        Module = 9,
        Property = 10,
        Unit = 11,
        Value = 12,
        Enum = 13,
        Keyword = 14,
        Snippet = 15,
        Color = 16,
        File = 17,
        Reference = 18,
        Folder = 19,
        EnumMember = 20,
        Constant = 21,
        Struct = 22,
        Event = 23,
        Operator = 24,
        TypeParameter = 25,
    }
}

wire_enum! {
    /// Whether insert text is plain or a snippet.
    pub enum InsertTextFormat: integer {
        PlainText = 1,
        /// Text with tab stops such as `$1` and `${2:name}`.
        Snippet = 2,
    }
}

wire_enum! {
    pub enum CompletionTriggerKind: integer {
        Invoked = 1,
        TriggerCharacter = 2,
        TriggerForIncompleteCompletions = 3,
    }
}

wire_record! {
    pub struct CompletionContext {
        trigger_kind: CompletionTriggerKind = keys::TRIGGER_KIND, required;
        /// Set when `trigger_kind` is `TriggerCharacter`.
        trigger_character: Option<String> = keys::TRIGGER_CHARACTER, omitempty;
    }
}

wire_record! {
    pub struct CompletionParams {
        text_document: TextDocumentIdentifier = keys::TEXT_DOCUMENT, required;
        position: Position = keys::POSITION, required;
        context: Option<CompletionContext> = keys::CONTEXT, omitempty;
        work_done_token: Option<ProgressToken> = keys::WORK_DONE_TOKEN, omitempty;
        partial_result_token: Option<ProgressToken> = keys::PARTIAL_RESULT_TOKEN, omitempty;
    }
}

wire_record! {
    /// A completion proposal.
    pub struct CompletionItem {
        /// Text shown in the list; inserted when `insert_text` and `text_edit` are absent.
        label: String = keys::LABEL, required;
        kind: Option<CompletionItemKind> = keys::KIND, omitempty;
        detail: Option<String> = keys::DETAIL, omitempty;
        documentation: Option<Or2<String, MarkupContent>> = keys::DOCUMENTATION, omitempty;
        deprecated: Option<bool> = keys::DEPRECATED, omitempty;
        preselect: Option<bool> = keys::PRESELECT, omitempty;
        sort_text: Option<String> = keys::SORT_TEXT, omitempty;
        filter_text: Option<String> = keys::FILTER_TEXT, omitempty;
        insert_text: Option<String> = keys::INSERT_TEXT, omitempty;
        insert_text_format: Option<InsertTextFormat> = keys::INSERT_TEXT_FORMAT, omitempty;
        text_edit: Option<Or2<TextEdit, InsertReplaceEdit>> = keys::TEXT_EDIT, omitempty;
        /// Edits applied alongside the main edit, e.g. adding an import.
        additional_text_edits: Option<Vec<TextEdit>> = keys::ADDITIONAL_TEXT_EDITS, omitempty;
        commit_characters: Option<Vec<String>> = keys::COMMIT_CHARACTERS, omitempty;
        command: Option<Command> = keys::COMMAND, omitempty;
        data: Option<serde_json::Value> = keys::DATA, omitempty;
    }
}

wire_record! {
    /// A list of completion items that may still be incomplete.
    pub struct CompletionList {
        /// Further typing should recompute the list.
        is_incomplete: bool = keys::IS_INCOMPLETE, always;
        items: Vec<CompletionItem> = keys::ITEMS, always;
    }
}

/// Result of `textDocument/completion`: `CompletionItem[] | CompletionList`.
pub type CompletionResponse = Or2<Vec<CompletionItem>, CompletionList>;

impl Hover {
    pub fn markdown(value: impl Into<String>) -> Self {
        Self {
            contents: Or3::A(MarkupContent::markdown(value)),
            range: None,
        }
    }
}

impl CompletionItem {
    pub fn new(label: impl Into<String>, kind: CompletionItemKind) -> Self {
        Self {
            label: label.into(),
            kind: Some(kind),
            ..Self::default()
        }
    }
}

impl CompletionResponse {
    /// All items regardless of the response form.
    #[must_use]
    pub fn items(&self) -> &[CompletionItem] {
        match self {
            Or2::A(items) => items,
            Or2::B(list) => &list.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{standard, stream};

    const LOCATION: &str = r#"{"uri":"file:///a","range":{"start":{"line":0,"character":0},"end":{"line":0,"character":3}}}"#;
    const LINK: &str = r#"{"targetUri":"file:///b","targetRange":{"start":{"line":1,"character":0},"end":{"line":9,"character":1}},"targetSelectionRange":{"start":{"line":1,"character":3},"end":{"line":1,"character":7}}}"#;

    fn decode_both<T>(wire: &str) -> T
    where
        T: serde::de::DeserializeOwned + stream::StreamValue + PartialEq + std::fmt::Debug,
    {
        let value = stream::from_str::<T>(wire).unwrap();
        assert_eq!(standard::from_str::<T>(wire).unwrap(), value);
        value
    }

    #[test]
    fn single_location_or_sequence() {
        let single: Or2<Location, Vec<Location>> = decode_both(LOCATION);
        assert_eq!(single.as_a().map(|l| l.uri.as_str()), Some("file:///a"));

        let many: Or2<Location, Vec<Location>> = decode_both(&format!("[{LOCATION},{LOCATION}]"));
        assert_eq!(many.as_b().map(Vec::len), Some(2));
    }

    #[test]
    fn definition_response_alternatives() {
        let response: DefinitionResponse = decode_both(LOCATION);
        assert!(response.is_a());
        let response: DefinitionResponse = decode_both(&format!("[{LINK}]"));
        assert!(response.is_c());
        assert_eq!(DefinitionResponse::ALTERNATIVES, &["Location", "Location[]", "LocationLink[]"]);
    }

    #[test]
    fn empty_array_takes_first_sequence_alternative() {
        for _ in 0..3 {
            let response: DefinitionResponse = decode_both("[]");
            assert_eq!(response, DefinitionResponse::B(Vec::new()));
        }
    }

    #[test]
    fn null_definition_is_none() {
        let response: Option<DefinitionResponse> = decode_both("null");
        assert_eq!(response, None);
    }

    #[test]
    fn mixed_array_is_a_mismatch() {
        let wire = format!("[{LOCATION},{LINK}]");
        for err in [
            stream::from_str::<DefinitionResponse>(&wire).unwrap_err(),
            standard::from_str::<DefinitionResponse>(&wire).unwrap_err(),
        ] {
            assert!(err.is_type_mismatch());
            assert_eq!(
                err.to_string(),
                "root: array matched none of the alternatives (Location | Location[] | LocationLink[])"
            );
        }
    }

    #[test]
    fn hover_contents_forms() {
        let hover: Hover = decode_both(r#"{"contents":{"kind":"markdown","value":"**x**"}}"#);
        assert_eq!(hover, Hover::markdown("**x**"));

        let hover: Hover = decode_both(r#"{"contents":{"language":"rust","value":"fn x()"}}"#);
        let marked = hover.contents.into_b().unwrap();
        assert_eq!(marked.as_language_string().map(|l| l.language.as_str()), Some("rust"));

        let hover: Hover = decode_both(r#"{"contents":["plain",{"language":"c","value":"int"}]}"#);
        let list = hover.contents.into_c().unwrap();
        assert!(list[0].is_string());
        assert!(list[1].is_language_string());
    }

    #[test]
    fn named_union_reports_its_own_shape() {
        assert_eq!(HoverContents::ALTERNATIVES, &["MarkupContent", "MarkedString", "MarkedString[]"]);
        let err = stream::from_str::<Hover>(r#"{"contents":42}"#).unwrap_err();
        assert_eq!(err.path().to_string(), "root.contents");
        assert!(err.is_type_mismatch());

        let err = MarkedString::from(String::from("x")).into_language_string().unwrap_err();
        assert_eq!((err.requested, err.held), ("LanguageString", "string"));
    }

    #[test]
    fn completion_item_unions() {
        let item: CompletionItem = decode_both(
            r#"{"label":"push","kind":2,"documentation":"Appends an element.","textEdit":{"newText":"push","insert":{"start":{"line":0,"character":4},"end":{"line":0,"character":6}},"replace":{"start":{"line":0,"character":4},"end":{"line":0,"character":8}}}}"#,
        );
        assert_eq!(item.kind, Some(CompletionItemKind::Method));
        assert_eq!(item.documentation, Some(Or2::A("Appends an element.".into())));
        assert!(item.text_edit.as_ref().is_some_and(Or2::is_b));

        let item: CompletionItem =
            decode_both(r#"{"label":"len","documentation":{"kind":"plaintext","value":"Length."}}"#);
        assert_eq!(item.documentation, Some(Or2::B(MarkupContent::plain_text("Length."))));
    }

    #[test]
    fn completion_response_forms() {
        let response: CompletionResponse = decode_both(r#"[{"label":"a"},{"label":"b"}]"#);
        assert_eq!(response.items().len(), 2);

        let response: CompletionResponse = decode_both(r#"{"isIncomplete":true,"items":[{"label":"a"}]}"#);
        assert!(response.is_b());
        assert_eq!(response.items()[0].label, "a");

        let empty = CompletionResponse::B(CompletionList::default());
        assert_eq!(stream::to_vec(&empty).unwrap(), br#"{"isIncomplete":false,"items":[]}"#);
        assert_eq!(standard::to_vec(&empty).unwrap(), br#"{"isIncomplete":false,"items":[]}"#);
    }

    #[test]
    fn completion_item_builder() {
        let item = CompletionItem::new("Vec", CompletionItemKind::Struct);
        assert_eq!(stream::to_vec(&item).unwrap(), br#"{"label":"Vec","kind":22}"#);
    }

    #[test]
    fn reference_params_require_context() {
        let wire = r#"{"textDocument":{"uri":"file:///a"},"position":{"line":0,"character":0}}"#;
        for err in [
            stream::from_str::<ReferenceParams>(wire).unwrap_err(),
            standard::from_str::<ReferenceParams>(wire).unwrap_err(),
        ] {
            assert_eq!(err.kind_name(), "missing_field");
        }
        let params: ReferenceParams = decode_both(
            r#"{"textDocument":{"uri":"file:///a"},"position":{"line":0,"character":0},"context":{"includeDeclaration":true},"partialResultToken":1}"#,
        );
        assert!(params.context.include_declaration);
        assert_eq!(params.partial_result_token, Some(ProgressToken::A(1)));
    }
}
