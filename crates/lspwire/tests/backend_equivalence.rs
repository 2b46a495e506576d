//! Both codec backends must agree on every protocol value.
//!
//! Covers:
//! - Round trips under every encoder/decoder pairing
//! - Byte-identical encodings
//! - Identical decodes of hand-written payloads, including unknown keys,
//!   whitespace and member reordering
//! - Identical failures: same kind, same path

use lspwire::testing::{
    assert_backends_agree, assert_decode_agrees, assert_decode_fails_alike, assert_round_trip,
    fixtures,
};
use lspwire::{
    Backend, Codec, CodecConfig, CompletionItem, DefinitionResponse, Diagnostic, Hover,
    InitializeParams, InitializeResult, Location, Or2, Position, PublishDiagnosticsParams,
    ServerCapabilities, TextDocumentSyncKind, WorkDoneProgressReport, WorkspaceEdit,
};

// ============================================================================
// Round Trips
// ============================================================================

#[test]
fn test_round_trip_every_union_alternative() {
    for response in fixtures::definition_responses() {
        assert_round_trip(&response);
    }
    for token in fixtures::progress_tokens() {
        assert_round_trip(&fixtures::progress(token));
    }
    for response in fixtures::completion_responses() {
        assert_round_trip(&response);
    }
    for response in fixtures::prepare_rename_responses() {
        assert_round_trip(&response);
    }
    assert_round_trip(&fixtures::hover_markup());
    assert_round_trip(&fixtures::hover_marked());
    assert_round_trip(&fixtures::hover_marked_list());
}

#[test]
fn test_round_trip_nested_records() {
    assert_round_trip(&fixtures::diagnostics());
    assert_round_trip(&fixtures::rich_capabilities());
    assert_round_trip(&fixtures::plain_capabilities());
    assert_round_trip(&fixtures::initialize_params());
    assert_round_trip(&fixtures::initialize_result());
    assert_round_trip(&fixtures::workspace_edit());
}

#[test]
fn test_round_trip_request_parameters() {
    assert_round_trip(&fixtures::text_document_item());
    assert_round_trip(&fixtures::versioned_identifier());
    assert_round_trip(&fixtures::position_params());
    assert_round_trip(&fixtures::hover_params());
    assert_round_trip(&fixtures::definition_params());
    assert_round_trip(&fixtures::completion_context());
    for params in fixtures::completion_params() {
        assert_round_trip(&params);
    }
    assert_round_trip(&fixtures::partial_result_params());
}

#[test]
fn test_round_trip_diagnostic_details() {
    assert_round_trip(&fixtures::code_description());
    assert_round_trip(&fixtures::related_information());
    assert_round_trip(&fixtures::detailed_diagnostic());
}

#[test]
fn test_round_trip_options_and_progress() {
    assert_round_trip(&fixtures::signature_help_options());
    assert_round_trip(&fixtures::progress_report());
    assert_round_trip(&WorkDoneProgressReport::new());
}

#[test]
fn test_round_trip_defaults() {
    assert_round_trip(&ServerCapabilities::default());
    assert_round_trip(&InitializeParams::default());
    assert_round_trip(&PublishDiagnosticsParams::default());
    assert_round_trip(&Hover::default());
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_encodings_are_byte_identical() {
    assert_backends_agree(&fixtures::diagnostics());
    assert_backends_agree(&fixtures::initialize_result());
    assert_backends_agree(&fixtures::workspace_edit());
    for response in fixtures::completion_responses() {
        assert_backends_agree(&response);
    }
}

#[test]
fn test_request_parameter_encodings_are_byte_identical() {
    assert_backends_agree(&fixtures::text_document_item());
    assert_backends_agree(&fixtures::versioned_identifier());
    assert_backends_agree(&fixtures::position_params());
    assert_backends_agree(&fixtures::hover_params());
    assert_backends_agree(&fixtures::definition_params());
    assert_backends_agree(&fixtures::completion_context());
    for params in fixtures::completion_params() {
        assert_backends_agree(&params);
    }
    assert_backends_agree(&fixtures::partial_result_params());
    assert_backends_agree(&fixtures::signature_help_options());
    assert_backends_agree(&fixtures::detailed_diagnostic());

    let wire = assert_backends_agree(&fixtures::progress_report());
    assert_eq!(wire, br#"{"kind":"report","message":"indexing 4/10 crates","percentage":40}"#);
}

#[test]
fn test_string_escaping_matches() {
    let diagnostic = Diagnostic::new(
        fixtures::range(0, 0, 1),
        "tab\there, quote \" backslash \\ newline\n unicode \u{1f980} control \u{1}",
    );
    let wire = assert_backends_agree(&diagnostic);
    let back: Diagnostic = serde_json::from_slice(&wire).unwrap();
    assert_eq!(back, diagnostic);
}

#[test]
fn test_key_order_follows_declaration() {
    let wire = assert_backends_agree(&fixtures::location("file:///x"));
    let text = String::from_utf8(wire).unwrap();
    assert!(text.find("\"uri\"").unwrap() < text.find("\"range\"").unwrap());
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_tolerates_whitespace_and_unknown_keys() {
    let wire = r#"
        {
            "range": { "end": { "character": 9, "line": 2 }, "start": { "line": 2, "character": 4 } },
            "x-vendor": { "anything": [ null, true, 1.5, "s" ] },
            "message": "m",
            "severity": 1
        }
    "#;
    let diagnostic: Diagnostic = assert_decode_agrees(wire);
    assert_eq!(diagnostic.range.start, Position::new(2, 4));
}

#[test]
fn test_decode_null_optional_members() {
    let item: CompletionItem =
        assert_decode_agrees(r#"{"label":"x","kind":null,"documentation":null,"textEdit":null}"#);
    assert_eq!(item, CompletionItem { label: "x".into(), ..CompletionItem::default() });
}

#[test]
fn test_decode_large_payload() {
    let locations: Vec<String> = (0..500)
        .map(|i| {
            format!(
                r#"{{"uri":"file:///f{i}.rs","range":{{"start":{{"line":{i},"character":0}},"end":{{"line":{i},"character":1}}}}}}"#
            )
        })
        .collect();
    let wire = format!("[{}]", locations.join(","));
    let decoded: Vec<Location> = assert_decode_agrees(&wire);
    assert_eq!(decoded.len(), 500);
    assert_eq!(decoded[499].range.start.line, 499);
}

// ============================================================================
// Repeated keys
// ============================================================================

#[test]
fn test_repeated_key_keeps_last_value() {
    let position: Position = assert_decode_agrees(r#"{"line":"x","line":1,"character":0}"#);
    assert_eq!(position, Position::new(1, 0));

    let position: Position = assert_decode_agrees(r#"{"line":3,"character":4,"line":5}"#);
    assert_eq!(position, Position::new(5, 4));
}

#[test]
fn test_repeated_key_inside_union_keeps_last_value() {
    let wire = r#"{"uri":7,"uri":"file:///a","range":{"start":{"line":0,"character":0},"end":{"line":0,"character":1}}}"#;
    let response: DefinitionResponse = assert_decode_agrees(wire);
    assert_eq!(response.into_a().unwrap().uri.as_str(), "file:///a");
}

#[test]
fn test_repeated_map_key_keeps_last_value() {
    let wire = r#"{"changes":{"file:///a.rs":[1],"file:///b.rs":[],"file:///a.rs":[]}}"#;
    let edit: WorkspaceEdit = assert_decode_agrees(wire);
    assert_eq!(edit.edit_count(), 0);
    assert_eq!(edit.changes.map(|changes| changes.len()), Some(2));
}

#[test]
fn test_invalid_last_value_fails_alike() {
    let err = assert_decode_fails_alike::<Position>(r#"{"line":1,"line":"x","character":0}"#);
    assert_eq!(err.path().to_string(), "root.line");
    assert!(err.is_unexpected_kind());
}

#[test]
fn test_repeated_key_is_checked_at_first_position() {
    // `line` is first seen before `character`, so it is decoded first.
    let err = assert_decode_fails_alike::<Position>(r#"{"line":"x","character":true,"line":"y"}"#);
    assert_eq!(err.path().to_string(), "root.line");

    let err = assert_decode_fails_alike::<Position>(r#"{"line":"x","character":true,"line":2}"#);
    assert_eq!(err.path().to_string(), "root.character");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_failures_match_across_backends() {
    let cases = [
        r#"{"processId":"x","rootUri":null,"capabilities":{}}"#,
        r#"{"processId":null,"rootUri":7,"capabilities":{}}"#,
        r#"{"processId":null,"rootUri":null,"capabilities":[]}"#,
        r#"{"processId":null,"rootUri":null,"capabilities":{},"trace":"loud"}"#,
        r#"{"processId":null,"rootUri":null,"capabilities":{},"workDoneToken":1.5}"#,
        r#"{"processId":null,"rootUri":null,"capabilities":{},"workspaceFolders":[{"uri":"u"}]}"#,
        r#"{"processId":null,"rootUri":null}"#,
        r#"[]"#,
    ];
    for wire in cases {
        assert_decode_fails_alike::<InitializeParams>(wire);
    }
}

#[test]
fn test_failure_paths_are_precise() {
    let err = assert_decode_fails_alike::<InitializeResult>(
        r#"{"capabilities":{"textDocumentSync":{"change":1,"save":"yes"}}}"#,
    );
    assert_eq!(err.path().to_string(), "root.capabilities.textDocumentSync");
    assert!(err.is_type_mismatch());

    let err = assert_decode_fails_alike::<PublishDiagnosticsParams>(
        r#"{"uri":"u","diagnostics":[{"range":{"start":{"line":0,"character":0},"end":{"line":-1,"character":0}},"message":""}]}"#,
    );
    assert_eq!(err.path().to_string(), "root.diagnostics[0].range.end.line");
    assert_eq!(err.kind_name(), "invalid_value");
}

#[test]
fn test_malformed_input_fails_alike() {
    for wire in [r#"{"line":1,"#, r#"{"line":1 "character":2}"#, "", "nul"] {
        let err = assert_decode_fails_alike::<Position>(wire);
        assert!(err.is_malformed(), "{wire}: {err}");
    }
}

#[test]
fn test_trailing_garbage_is_malformed() {
    let err = assert_decode_fails_alike::<Position>(r#"{"line":1,"character":2} x"#);
    assert!(err.is_malformed());
}

// ============================================================================
// Codec dispatch
// ============================================================================

#[test]
fn test_codec_backends_interoperate() {
    let standard = Codec::with_backend(Backend::Standard);
    let streaming = Codec::with_backend(Backend::Streaming);
    let caps = fixtures::rich_capabilities();

    let bytes = standard.encode(&caps).unwrap();
    let decoded: ServerCapabilities = streaming.decode(&bytes).unwrap();
    assert_eq!(decoded, caps);
    assert_eq!(decoded.sync_kind(), TextDocumentSyncKind::Incremental);
}

#[test]
fn test_cross_check_returns_selected_backend_result() {
    let codec = Codec::new(CodecConfig::new().with_cross_check(true));
    let hover: Hover = codec.decode(br#"{"contents":"plain"}"#).unwrap();
    assert_eq!(hover.contents.as_b().and_then(|m| m.as_string()).map(String::as_str), Some("plain"));
    assert!(codec.decode::<Hover>(br#"{"contents":true}"#).is_err());
}

#[test]
fn test_codec_decode_into_reuses_instance() {
    for backend in [Backend::Standard, Backend::Streaming] {
        let codec = Codec::with_backend(backend);
        let mut token = Or2::<i32, String>::B(String::with_capacity(64));
        codec.decode_into(&mut token, br#""work-1""#).unwrap();
        assert_eq!(token, Or2::B("work-1".into()));

        assert!(codec.decode_into(&mut token, b"false").is_err());
        assert_eq!(token, Or2::default(), "{backend} left a partial value");
    }
}
