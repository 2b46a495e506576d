//! Wire key table.
//!
//! Every object key the protocol model reads or writes is declared here
//! exactly once. Record definitions refer to these constants, so both
//! codec backends, the encoder and the decoder all spell a key the same
//! way. Incoming keys are interned against the table without allocating.

use serde::de::{self, Deserialize, Deserializer, Visitor};
use std::fmt;

macro_rules! key_table {
    ($( $name:ident = $wire:literal, )*) => {
        $(
            #[doc = concat!("`", $wire, "`")]
            pub const $name: &str = $wire;
        )*

        /// Every key in the table, in declaration order.
        pub const ALL: &[&str] = &[$($name),*];

        /// Maps a wire key onto its table constant.
        ///
        /// Returns `None` for keys the protocol model does not know.
        #[must_use]
        pub fn intern(wire: &str) -> Option<&'static str> {
            match wire {
                $( $wire => Some($name), )*
                _ => None,
            }
        }
    };
}

key_table! {
    ADDITIONAL_TEXT_EDITS = "additionalTextEdits",
    ALL_COMMIT_CHARACTERS = "allCommitCharacters",
    ARGUMENTS = "arguments",
    CANCELLABLE = "cancellable",
    CAPABILITIES = "capabilities",
    CHANGE = "change",
    CHANGES = "changes",
    CHARACTER = "character",
    CLIENT_INFO = "clientInfo",
    CODE = "code",
    CODE_DESCRIPTION = "codeDescription",
    COMMAND = "command",
    COMMIT_CHARACTERS = "commitCharacters",
    COMPLETION_PROVIDER = "completionProvider",
    CONTENT_FORMAT = "contentFormat",
    CONTENTS = "contents",
    CONTEXT = "context",
    DATA = "data",
    DEFAULT_BEHAVIOR = "defaultBehavior",
    DEFINITION_PROVIDER = "definitionProvider",
    DEPRECATED = "deprecated",
    DETAIL = "detail",
    DIAGNOSTICS = "diagnostics",
    DOCUMENTATION = "documentation",
    DYNAMIC_REGISTRATION = "dynamicRegistration",
    END = "end",
    EXPERIMENTAL = "experimental",
    FILTER_TEXT = "filterText",
    HOVER = "hover",
    HOVER_PROVIDER = "hoverProvider",
    HREF = "href",
    INCLUDE_DECLARATION = "includeDeclaration",
    INCLUDE_TEXT = "includeText",
    INITIALIZATION_OPTIONS = "initializationOptions",
    INSERT = "insert",
    INSERT_TEXT = "insertText",
    INSERT_TEXT_FORMAT = "insertTextFormat",
    IS_INCOMPLETE = "isIncomplete",
    ITEMS = "items",
    KIND = "kind",
    LABEL = "label",
    LANGUAGE = "language",
    LANGUAGE_ID = "languageId",
    LINE = "line",
    LOCALE = "locale",
    LOCATION = "location",
    MESSAGE = "message",
    NAME = "name",
    NEW_NAME = "newName",
    NEW_TEXT = "newText",
    OPEN_CLOSE = "openClose",
    ORIGIN_SELECTION_RANGE = "originSelectionRange",
    PARTIAL_RESULT_TOKEN = "partialResultToken",
    PERCENTAGE = "percentage",
    PLACEHOLDER = "placeholder",
    POSITION = "position",
    POSITION_ENCODING = "positionEncoding",
    PREPARE_PROVIDER = "prepareProvider",
    PRESELECT = "preselect",
    PROCESS_ID = "processId",
    RANGE = "range",
    REFERENCES_PROVIDER = "referencesProvider",
    RELATED_INFORMATION = "relatedInformation",
    RENAME_PROVIDER = "renameProvider",
    REPLACE = "replace",
    RESOLVE_PROVIDER = "resolveProvider",
    RETRIGGER_CHARACTERS = "retriggerCharacters",
    ROOT_URI = "rootUri",
    SAVE = "save",
    SERVER_INFO = "serverInfo",
    SEVERITY = "severity",
    SIGNATURE_HELP_PROVIDER = "signatureHelpProvider",
    SORT_TEXT = "sortText",
    SOURCE = "source",
    START = "start",
    TAGS = "tags",
    TARGET_RANGE = "targetRange",
    TARGET_SELECTION_RANGE = "targetSelectionRange",
    TARGET_URI = "targetUri",
    TEXT = "text",
    TEXT_DOCUMENT = "textDocument",
    TEXT_DOCUMENT_SYNC = "textDocumentSync",
    TEXT_EDIT = "textEdit",
    TITLE = "title",
    TOKEN = "token",
    TRACE = "trace",
    TRIGGER_CHARACTER = "triggerCharacter",
    TRIGGER_CHARACTERS = "triggerCharacters",
    TRIGGER_KIND = "triggerKind",
    URI = "uri",
    VALUE = "value",
    VERSION = "version",
    WILL_SAVE = "willSave",
    WILL_SAVE_WAIT_UNTIL = "willSaveWaitUntil",
    WORK_DONE_PROGRESS = "workDoneProgress",
    WORK_DONE_TOKEN = "workDoneToken",
    WORKSPACE_FOLDERS = "workspaceFolders",
}

/// An object key read off the wire, resolved against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireKey(Option<&'static str>);

impl WireKey {
    /// Returns the table constant, or `None` for an unknown key.
    #[must_use]
    pub fn known(self) -> Option<&'static str> {
        self.0
    }
}

impl<'de> Deserialize<'de> for WireKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = WireKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<WireKey, E> {
                Ok(WireKey(intern(v)))
            }
        }

        deserializer.deserialize_identifier(KeyVisitor)
    }
}
