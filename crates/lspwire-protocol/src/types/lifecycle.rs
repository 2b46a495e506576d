//! The `initialize` handshake.

use super::basic::MarkupKind;
use super::capabilities::ServerCapabilities;
use super::progress::ProgressToken;
use crate::keys;
use crate::record::{wire_enum, wire_record};
use crate::uri::DocumentUri;

wire_enum! {
    /// Verbosity of `$/logTrace` notifications.
    pub enum TraceValue: string {
        Off = "off",
        Messages = "messages",
        Verbose = "verbose",
    }
}

wire_record! {
    /// Information about the client.
    pub struct ClientInfo {
        name: String = keys::NAME, required;
        version: Option<String> = keys::VERSION, omitempty;
    }
}

wire_record! {
    /// Information about the server.
    pub struct ServerInfo {
        name: String = keys::NAME, required;
        version: Option<String> = keys::VERSION, omitempty;
    }
}

wire_record! {
    pub struct WorkspaceFolder {
        uri: DocumentUri = keys::URI, required;
        /// Name used to refer to the folder in the UI.
        name: String = keys::NAME, required;
    }
}

wire_record! {
    pub struct HoverClientCapabilities {
        dynamic_registration: Option<bool> = keys::DYNAMIC_REGISTRATION, omitempty;
        /// Content formats the client supports, in order of preference.
        content_format: Option<Vec<MarkupKind>> = keys::CONTENT_FORMAT, omitempty;
    }
}

wire_record! {
    pub struct TextDocumentClientCapabilities {
        hover: Option<HoverClientCapabilities> = keys::HOVER, omitempty;
    }
}

wire_record! {
    /// Capabilities the client provides.
    pub struct ClientCapabilities {
        text_document: Option<TextDocumentClientCapabilities> = keys::TEXT_DOCUMENT, omitempty;
        experimental: Option<serde_json::Value> = keys::EXPERIMENTAL, omitempty;
    }
}

wire_record! {
    /// Parameters of the `initialize` request.
    pub struct InitializeParams {
        /// Process id of the parent process; `null` when it has none.
        process_id: Option<i32> = keys::PROCESS_ID, always;
        client_info: Option<ClientInfo> = keys::CLIENT_INFO, omitempty;
        /// Locale of the client UI, e.g. `en-us`.
        locale: Option<String> = keys::LOCALE, omitempty;
        /// Root of the workspace; `null` when no folder is open.
        root_uri: Option<DocumentUri> = keys::ROOT_URI, always;
        initialization_options: Option<serde_json::Value> = keys::INITIALIZATION_OPTIONS, omitempty;
        capabilities: ClientCapabilities = keys::CAPABILITIES, required;
        trace: Option<TraceValue> = keys::TRACE, omitempty;
        workspace_folders: Option<Vec<WorkspaceFolder>> = keys::WORKSPACE_FOLDERS, omitempty;
        work_done_token: Option<ProgressToken> = keys::WORK_DONE_TOKEN, omitempty;
    }
}

wire_record! {
    /// Result of the `initialize` request.
    pub struct InitializeResult {
        capabilities: ServerCapabilities = keys::CAPABILITIES, required;
        server_info: Option<ServerInfo> = keys::SERVER_INFO, omitempty;
    }
}

impl ServerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{standard, stream, Or2};

    #[test]
    fn null_members_are_always_written() {
        let params = InitializeParams::default();
        let expected = br#"{"processId":null,"rootUri":null,"capabilities":{}}"#;
        assert_eq!(stream::to_vec(&params).unwrap(), expected);
        assert_eq!(standard::to_vec(&params).unwrap(), expected);
    }

    #[test]
    fn capabilities_are_required() {
        let wire = br#"{"processId":1,"rootUri":null}"#;
        for err in [
            stream::from_slice::<InitializeParams>(wire).unwrap_err(),
            standard::from_slice::<InitializeParams>(wire).unwrap_err(),
        ] {
            assert_eq!(err.kind_name(), "missing_field");
            assert!(err.path().is_root());
        }
    }

    #[test]
    fn full_handshake_decodes_alike() {
        let wire = br#"{"processId":4242,"clientInfo":{"name":"editor","version":"1.2"},"rootUri":"file:///work","capabilities":{"textDocument":{"hover":{"contentFormat":["markdown","plaintext"]}}},"trace":"verbose","workspaceFolders":[{"uri":"file:///work","name":"work"}],"workDoneToken":"init"}"#;
        let params: InitializeParams = stream::from_slice(wire).unwrap();
        assert_eq!(params.process_id, Some(4242));
        assert_eq!(params.root_uri.as_ref().map(DocumentUri::as_str), Some("file:///work"));
        assert_eq!(params.trace, Some(TraceValue::Verbose));
        assert_eq!(params.work_done_token, Some(Or2::B("init".into())));
        let formats = params
            .capabilities
            .text_document
            .as_ref()
            .and_then(|td| td.hover.as_ref())
            .and_then(|h| h.content_format.clone());
        assert_eq!(formats, Some(vec![MarkupKind::Markdown, MarkupKind::PlainText]));

        assert_eq!(standard::from_slice::<InitializeParams>(wire).unwrap(), params);
        assert_eq!(stream::to_vec(&params).unwrap(), wire);
    }

    #[test]
    fn negative_process_id_is_accepted() {
        let params: InitializeParams = standard::from_slice(br#"{"processId":-1,"rootUri":null,"capabilities":{}}"#).unwrap();
        assert_eq!(params.process_id, Some(-1));
    }

    #[test]
    fn initialize_result() {
        let result = InitializeResult {
            server_info: Some(ServerInfo::new("lsp", "0.1.0")),
            ..InitializeResult::default()
        };
        let expected = br#"{"capabilities":{},"serverInfo":{"name":"lsp","version":"0.1.0"}}"#;
        assert_eq!(stream::to_vec(&result).unwrap(), expected);
        assert_eq!(standard::from_slice::<InitializeResult>(expected).unwrap(), result);
    }
}
