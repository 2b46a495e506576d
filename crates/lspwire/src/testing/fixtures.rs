//! Populated protocol values for tests.
//!
//! Together the fixtures hold every alternative of every union used in the
//! protocol model at least once.

use lspwire_protocol::{
    ClientCapabilities, ClientInfo, CodeDescription, CompletionContext, CompletionItem,
    CompletionItemKind, CompletionList, CompletionOptions, CompletionParams, CompletionResponse,
    CompletionTriggerKind, DefaultBehavior, DefinitionParams, DefinitionResponse, Diagnostic,
    DiagnosticCode, DiagnosticRelatedInformation, DiagnosticSeverity, DiagnosticTag, Hover,
    HoverClientCapabilities, HoverOptions, HoverParams, InitializeParams, InitializeResult,
    InsertReplaceEdit, LanguageString, Location, LocationLink, MarkedString, MarkupContent,
    MarkupKind, Or2, Or3, PartialResultParams, Position, PrepareRenameResponse, ProgressParams,
    ProgressToken, PublishDiagnosticsParams, Range, RangeWithPlaceholder, RenameOptions,
    SaveOptions, ServerCapabilities, ServerInfo, SignatureHelpOptions,
    TextDocumentClientCapabilities, TextDocumentIdentifier, TextDocumentItem,
    TextDocumentPositionParams, TextDocumentSyncKind, TextDocumentSyncOptions, TextEdit,
    TraceValue, VersionedTextDocumentIdentifier, WorkDoneProgressReport, WorkspaceEdit,
    WorkspaceFolder,
};

pub fn range(line: u32, start: u32, end: u32) -> Range {
    Range::new(Position::new(line, start), Position::new(line, end))
}

pub fn location(uri: &str) -> Location {
    Location::new(uri, range(4, 8, 12))
}

pub fn location_link() -> LocationLink {
    LocationLink {
        origin_selection_range: Some(range(1, 0, 5)),
        target_uri: "file:///src/lib.rs".into(),
        target_range: Range::new(Position::new(10, 0), Position::new(20, 1)),
        target_selection_range: range(10, 7, 12),
    }
}

/// One definition response per alternative, in declaration order.
pub fn definition_responses() -> Vec<DefinitionResponse> {
    vec![
        Or3::A(location("file:///src/main.rs")),
        Or3::B(vec![location("file:///a.rs"), location("file:///b.rs")]),
        Or3::C(vec![location_link()]),
    ]
}

pub fn progress_tokens() -> Vec<ProgressToken> {
    vec![Or2::A(42), Or2::B("abc-123".into())]
}

pub fn progress(token: ProgressToken) -> ProgressParams {
    ProgressParams {
        token,
        value: serde_json::json!({"kind": "report", "percentage": 40}),
    }
}

pub fn hover_markup() -> Hover {
    Hover {
        contents: Or3::A(MarkupContent::markdown("```rust\nfn main()\n```")),
        range: Some(range(0, 3, 7)),
    }
}

pub fn hover_marked() -> Hover {
    Hover {
        contents: Or3::B(MarkedString::from(LanguageString {
            language: "rust".into(),
            value: "pub struct Pool<T>".into(),
        })),
        range: None,
    }
}

pub fn hover_marked_list() -> Hover {
    Hover {
        contents: Or3::C(vec![
            MarkedString::from("Returns the \"idle\" count.".to_owned()),
            MarkedString::from(LanguageString {
                language: "rust".into(),
                value: "fn idle(&self) -> usize".into(),
            }),
        ]),
        range: None,
    }
}

pub fn diagnostics() -> PublishDiagnosticsParams {
    PublishDiagnosticsParams {
        uri: "file:///src/main.rs".into(),
        version: Some(3),
        diagnostics: vec![
            Diagnostic::new(range(2, 4, 9), "mismatched types")
                .with_severity(DiagnosticSeverity::Error)
                .with_code(DiagnosticCode::B("E0308".into())),
            Diagnostic {
                tags: Some(vec![DiagnosticTag::Unnecessary]),
                source: Some("rustc".into()),
                ..Diagnostic::new(range(7, 0, 3), "unused variable: `x`")
                    .with_severity(DiagnosticSeverity::Warning)
                    .with_code(DiagnosticCode::A(26))
            },
        ],
    }
}

/// Server capabilities using the options-object form of every provider.
pub fn rich_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        position_encoding: Some("utf-16".into()),
        text_document_sync: Some(Or2::A(TextDocumentSyncOptions {
            open_close: Some(true),
            change: Some(TextDocumentSyncKind::Incremental),
            save: Some(Or2::B(SaveOptions {
                include_text: Some(true),
            })),
            ..TextDocumentSyncOptions::default()
        })),
        completion_provider: Some(CompletionOptions {
            trigger_characters: Some(vec![".".into(), "::".into()]),
            resolve_provider: Some(true),
            ..CompletionOptions::default()
        }),
        hover_provider: Some(Or2::B(HoverOptions {
            work_done_progress: Some(true),
        })),
        rename_provider: Some(Or2::B(RenameOptions {
            prepare_provider: Some(true),
            ..RenameOptions::default()
        })),
        experimental: Some(serde_json::json!({"inlayHints": {"enabled": true}})),
        ..ServerCapabilities::default()
    }
}

/// Server capabilities using the boolean or kind form of every provider.
pub fn plain_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(Or2::B(TextDocumentSyncKind::Full)),
        hover_provider: Some(Or2::A(true)),
        definition_provider: Some(Or2::A(true)),
        references_provider: Some(Or2::A(false)),
        rename_provider: Some(Or2::A(true)),
        ..ServerCapabilities::default()
    }
}

pub fn initialize_params() -> InitializeParams {
    InitializeParams {
        process_id: Some(1234),
        client_info: Some(ClientInfo {
            name: "editor".into(),
            version: Some("2.0".into()),
        }),
        root_uri: Some("file:///work".into()),
        capabilities: ClientCapabilities {
            text_document: Some(TextDocumentClientCapabilities {
                hover: Some(HoverClientCapabilities {
                    content_format: Some(vec![MarkupKind::Markdown]),
                    ..HoverClientCapabilities::default()
                }),
            }),
            experimental: None,
        },
        trace: Some(TraceValue::Messages),
        workspace_folders: Some(vec![WorkspaceFolder {
            uri: "file:///work".into(),
            name: "work".into(),
        }]),
        work_done_token: Some(Or2::A(9)),
        ..InitializeParams::default()
    }
}

pub fn initialize_result() -> InitializeResult {
    InitializeResult {
        capabilities: rich_capabilities(),
        server_info: Some(ServerInfo::new("lspwire-test", "0.1.0")),
    }
}

pub fn completion_items() -> Vec<CompletionItem> {
    vec![
        CompletionItem {
            documentation: Some(Or2::A("Appends an element.".into())),
            text_edit: Some(Or2::A(TextEdit::new(range(3, 4, 6), "push"))),
            ..CompletionItem::new("push", CompletionItemKind::Method)
        },
        CompletionItem {
            documentation: Some(Or2::B(MarkupContent::markdown("Returns the **length**."))),
            text_edit: Some(Or2::B(InsertReplaceEdit {
                new_text: "len".into(),
                insert: range(3, 4, 6),
                replace: range(3, 4, 9),
            })),
            data: Some(serde_json::json!([1, 2])),
            ..CompletionItem::new("len", CompletionItemKind::Method)
        },
    ]
}

pub fn completion_responses() -> Vec<CompletionResponse> {
    vec![
        Or2::A(completion_items()),
        Or2::B(CompletionList {
            is_incomplete: true,
            items: completion_items(),
        }),
    ]
}

pub fn workspace_edit() -> WorkspaceEdit {
    let mut edit = WorkspaceEdit::default();
    edit.push("file:///src/lib.rs", TextEdit::new(range(1, 4, 9), "total"));
    edit.push("file:///src/lib.rs", TextEdit::new(range(8, 12, 17), "total"));
    edit.push("file:///src/main.rs", TextEdit::new(range(2, 0, 5), "total"));
    edit
}

pub fn prepare_rename_responses() -> Vec<PrepareRenameResponse> {
    vec![
        PrepareRenameResponse::from(range(5, 4, 9)),
        PrepareRenameResponse::from(RangeWithPlaceholder {
            range: range(5, 4, 9),
            placeholder: "count".into(),
        }),
        PrepareRenameResponse::from(DefaultBehavior {
            default_behavior: true,
        }),
    ]
}

// ============================================================================
// Document and request parameters
// ============================================================================

pub fn text_document_item() -> TextDocumentItem {
    TextDocumentItem {
        uri: "file:///src/pool.rs".into(),
        language_id: "rust".into(),
        version: 12,
        text: "fn main() {\n    println!(\"\\u{1f980}\");\n}\n".into(),
    }
}

pub fn versioned_identifier() -> VersionedTextDocumentIdentifier {
    VersionedTextDocumentIdentifier {
        uri: "file:///src/pool.rs".into(),
        version: -1,
    }
}

pub fn position_params() -> TextDocumentPositionParams {
    TextDocumentPositionParams {
        text_document: TextDocumentIdentifier::new("file:///src/pool.rs"),
        position: Position::new(41, 17),
    }
}

pub fn hover_params() -> HoverParams {
    HoverParams {
        text_document: TextDocumentIdentifier::new("file:///src/pool.rs"),
        position: Position::new(3, 9),
        work_done_token: Some(Or2::B("hover-1".into())),
    }
}

pub fn definition_params() -> DefinitionParams {
    DefinitionParams {
        text_document: TextDocumentIdentifier::new("file:///src/lib.rs"),
        position: Position::new(0, 0),
        work_done_token: Some(Or2::A(7)),
        partial_result_token: Some(Or2::B("partial-7".into())),
    }
}

pub fn completion_context() -> CompletionContext {
    CompletionContext {
        trigger_kind: CompletionTriggerKind::TriggerCharacter,
        trigger_character: Some(".".into()),
    }
}

/// Completion requests with and without a context.
pub fn completion_params() -> Vec<CompletionParams> {
    vec![
        CompletionParams {
            text_document: TextDocumentIdentifier::new("file:///src/main.rs"),
            position: Position::new(9, 12),
            context: Some(completion_context()),
            work_done_token: None,
            partial_result_token: Some(Or2::A(3)),
        },
        CompletionParams {
            text_document: TextDocumentIdentifier::new("file:///src/main.rs"),
            position: Position::new(9, 4),
            ..CompletionParams::default()
        },
    ]
}

pub fn signature_help_options() -> SignatureHelpOptions {
    SignatureHelpOptions {
        work_done_progress: Some(false),
        trigger_characters: Some(vec!["(".into(), ",".into()]),
        retrigger_characters: Some(Vec::new()),
    }
}

pub fn partial_result_params() -> PartialResultParams {
    PartialResultParams {
        partial_result_token: Some(Or2::B("results-2".into())),
    }
}

pub fn code_description() -> CodeDescription {
    CodeDescription {
        href: "https://doc.rust-lang.org/error_codes/E0308.html".into(),
    }
}

pub fn related_information() -> DiagnosticRelatedInformation {
    DiagnosticRelatedInformation {
        location: location("file:///src/types.rs"),
        message: "expected due to this".into(),
    }
}

/// A diagnostic that carries every optional member.
pub fn detailed_diagnostic() -> Diagnostic {
    Diagnostic {
        code_description: Some(code_description()),
        related_information: Some(vec![related_information()]),
        ..Diagnostic::new(range(2, 4, 9), "mismatched types")
            .with_severity(DiagnosticSeverity::Error)
            .with_code(DiagnosticCode::B("E0308".into()))
    }
}

pub fn progress_report() -> WorkDoneProgressReport {
    WorkDoneProgressReport::new()
        .with_percentage(40)
        .with_message("indexing 4/10 crates")
}
