//! Server capabilities announced in the `initialize` response.
//!
//! Most providers are `boolean | Options`: `true` enables the feature with
//! default options, an object enables it with the given options.

use crate::keys;
use crate::record::{wire_enum, wire_record};
use crate::union::Or2;

wire_enum! {
    /// How the client syncs document changes to the server.
    pub enum TextDocumentSyncKind: integer {
        /// Documents are not synced.
        None = 0,
        /// Every change sends the full content.
        Full = 1,
        /// Changes are sent as incremental edits.
        Incremental = 2,
    }
}

wire_record! {
    pub struct WorkDoneProgressOptions {
        work_done_progress: Option<bool> = keys::WORK_DONE_PROGRESS, omitempty;
    }
}

wire_record! {
    /// Options for `textDocument/didSave`.
    pub struct SaveOptions {
        /// Whether the client includes the content on save.
        include_text: Option<bool> = keys::INCLUDE_TEXT, omitempty;
    }
}

wire_record! {
    pub struct TextDocumentSyncOptions {
        open_close: Option<bool> = keys::OPEN_CLOSE, omitempty;
        change: Option<TextDocumentSyncKind> = keys::CHANGE, omitempty;
        will_save: Option<bool> = keys::WILL_SAVE, omitempty;
        will_save_wait_until: Option<bool> = keys::WILL_SAVE_WAIT_UNTIL, omitempty;
        save: Option<Or2<bool, SaveOptions>> = keys::SAVE, omitempty;
    }
}

wire_record! {
    pub struct HoverOptions {
        work_done_progress: Option<bool> = keys::WORK_DONE_PROGRESS, omitempty;
    }
}

wire_record! {
    /// Completion provider options.
    pub struct CompletionOptions {
        work_done_progress: Option<bool> = keys::WORK_DONE_PROGRESS, omitempty;
        /// Characters that trigger completion automatically.
        trigger_characters: Option<Vec<String>> = keys::TRIGGER_CHARACTERS, omitempty;
        /// Characters that commit any completion item.
        all_commit_characters: Option<Vec<String>> = keys::ALL_COMMIT_CHARACTERS, omitempty;
        /// Whether the server resolves additional item details lazily.
        resolve_provider: Option<bool> = keys::RESOLVE_PROVIDER, omitempty;
    }
}

wire_record! {
    pub struct SignatureHelpOptions {
        work_done_progress: Option<bool> = keys::WORK_DONE_PROGRESS, omitempty;
        trigger_characters: Option<Vec<String>> = keys::TRIGGER_CHARACTERS, omitempty;
        retrigger_characters: Option<Vec<String>> = keys::RETRIGGER_CHARACTERS, omitempty;
    }
}

wire_record! {
    pub struct DefinitionOptions {
        work_done_progress: Option<bool> = keys::WORK_DONE_PROGRESS, omitempty;
    }
}

wire_record! {
    pub struct ReferenceOptions {
        work_done_progress: Option<bool> = keys::WORK_DONE_PROGRESS, omitempty;
    }
}

wire_record! {
    pub struct RenameOptions {
        work_done_progress: Option<bool> = keys::WORK_DONE_PROGRESS, omitempty;
        /// Whether the server supports `textDocument/prepareRename`.
        prepare_provider: Option<bool> = keys::PREPARE_PROVIDER, omitempty;
    }
}

wire_record! {
    /// Capabilities the server provides.
    pub struct ServerCapabilities {
        /// Position encoding chosen by the server, e.g. `utf-16`.
        position_encoding: Option<String> = keys::POSITION_ENCODING, omitempty;
        text_document_sync: Option<Or2<TextDocumentSyncOptions, TextDocumentSyncKind>> = keys::TEXT_DOCUMENT_SYNC, omitempty;
        completion_provider: Option<CompletionOptions> = keys::COMPLETION_PROVIDER, omitempty;
        hover_provider: Option<Or2<bool, HoverOptions>> = keys::HOVER_PROVIDER, omitempty;
        signature_help_provider: Option<SignatureHelpOptions> = keys::SIGNATURE_HELP_PROVIDER, omitempty;
        definition_provider: Option<Or2<bool, DefinitionOptions>> = keys::DEFINITION_PROVIDER, omitempty;
        references_provider: Option<Or2<bool, ReferenceOptions>> = keys::REFERENCES_PROVIDER, omitempty;
        rename_provider: Option<Or2<bool, RenameOptions>> = keys::RENAME_PROVIDER, omitempty;
        /// Experimental server capabilities.
        experimental: Option<serde_json::Value> = keys::EXPERIMENTAL, omitempty;
    }
}

impl ServerCapabilities {
    /// Returns true when the server answers hover requests.
    #[must_use]
    pub fn supports_hover(&self) -> bool {
        match &self.hover_provider {
            Some(Or2::A(enabled)) => *enabled,
            Some(Or2::B(_)) => true,
            None => false,
        }
    }

    /// Returns the effective sync kind, whichever way it was announced.
    #[must_use]
    pub fn sync_kind(&self) -> TextDocumentSyncKind {
        match &self.text_document_sync {
            Some(Or2::A(options)) => options.change.unwrap_or(TextDocumentSyncKind::None),
            Some(Or2::B(kind)) => *kind,
            None => TextDocumentSyncKind::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{standard, stream};

    type CompletionProvider = Or2<bool, CompletionOptions>;

    #[test]
    fn boolean_or_options_resolution() {
        for backend_decode in [
            stream::from_slice::<CompletionProvider> as fn(&[u8]) -> _,
            standard::from_slice::<CompletionProvider>,
        ] {
            assert_eq!(backend_decode(b"true").unwrap(), CompletionProvider::A(true));
            let options = backend_decode(br#"{"resolveProvider":true}"#).unwrap();
            assert_eq!(
                options.into_b().unwrap(),
                CompletionOptions {
                    resolve_provider: Some(true),
                    ..CompletionOptions::default()
                }
            );
        }
    }

    #[test]
    fn default_options_are_omitted() {
        let caps = ServerCapabilities::default();
        assert_eq!(stream::to_vec(&caps).unwrap(), b"{}");
        assert_eq!(standard::to_vec(&caps).unwrap(), b"{}");
    }

    #[test]
    fn only_set_sub_fields_are_emitted() {
        let caps = ServerCapabilities {
            completion_provider: Some(CompletionOptions {
                trigger_characters: Some(vec![".".into()]),
                ..CompletionOptions::default()
            }),
            ..ServerCapabilities::default()
        };
        let expected = br#"{"completionProvider":{"triggerCharacters":["."]}}"#;
        assert_eq!(stream::to_vec(&caps).unwrap(), expected);
        assert_eq!(standard::to_vec(&caps).unwrap(), expected);
    }

    #[test]
    fn present_but_default_options_still_emit_the_key() {
        let caps = ServerCapabilities {
            completion_provider: Some(CompletionOptions::default()),
            ..ServerCapabilities::default()
        };
        assert_eq!(stream::to_vec(&caps).unwrap(), br#"{"completionProvider":{}}"#);
    }

    #[test]
    fn sync_accepts_kind_or_options() {
        let caps: ServerCapabilities = stream::from_slice(br#"{"textDocumentSync":2}"#).unwrap();
        assert_eq!(caps.sync_kind(), TextDocumentSyncKind::Incremental);

        let wire = br#"{"textDocumentSync":{"openClose":true,"change":1,"save":{"includeText":false}}}"#;
        let caps: ServerCapabilities = standard::from_slice(wire).unwrap();
        assert_eq!(caps.sync_kind(), TextDocumentSyncKind::Full);
        let save = caps.text_document_sync.as_ref().and_then(Or2::as_a).and_then(|o| o.save.clone());
        assert_eq!(
            save,
            Some(Or2::B(SaveOptions {
                include_text: Some(false)
            }))
        );
        assert_eq!(stream::to_vec(&caps).unwrap(), wire);
    }

    #[test]
    fn unknown_sync_kind_mismatches_every_alternative() {
        let wire = br#"{"textDocumentSync":7}"#;
        for err in [
            stream::from_slice::<ServerCapabilities>(wire).unwrap_err(),
            standard::from_slice::<ServerCapabilities>(wire).unwrap_err(),
        ] {
            assert!(err.is_type_mismatch(), "{err}");
            assert_eq!(err.path().to_string(), "root.textDocumentSync");
        }
    }

    #[test]
    fn hover_provider_forms() {
        let caps: ServerCapabilities = stream::from_slice(br#"{"hoverProvider":false}"#).unwrap();
        assert!(!caps.supports_hover());
        let caps: ServerCapabilities = stream::from_slice(br#"{"hoverProvider":{}}"#).unwrap();
        assert!(caps.supports_hover());
        assert_eq!(caps.hover_provider, Some(Or2::B(HoverOptions::default())));
    }

    #[test]
    fn provider_of_wrong_kind_reports_alternatives() {
        let wire = br#"{"renameProvider":"yes"}"#;
        let err = stream::from_slice::<ServerCapabilities>(wire).unwrap_err();
        assert_eq!(
            err.to_string(),
            standard::from_slice::<ServerCapabilities>(wire).unwrap_err().to_string()
        );
        assert_eq!(err.path().to_string(), "root.renameProvider");
    }
}
