//! Workspace edits and rename.

use std::collections::BTreeMap;

use super::basic::{Position, Range, TextDocumentIdentifier, TextEdit};
use super::progress::ProgressToken;
use crate::keys;
use crate::record::wire_record;
use crate::union::wire_union;
use crate::uri::DocumentUri;

wire_record! {
    /// Changes to many resources.
    pub struct WorkspaceEdit {
        /// Edits keyed by document.
        changes: Option<BTreeMap<DocumentUri, Vec<TextEdit>>> = keys::CHANGES, omitempty;
    }
}

wire_record! {
    pub struct RenameParams {
        text_document: TextDocumentIdentifier = keys::TEXT_DOCUMENT, required;
        position: Position = keys::POSITION, required;
        /// New name of the symbol; must be a valid identifier.
        new_name: String = keys::NEW_NAME, required;
        work_done_token: Option<ProgressToken> = keys::WORK_DONE_TOKEN, omitempty;
    }
}

wire_record! {
    pub struct RangeWithPlaceholder {
        range: Range = keys::RANGE, required;
        placeholder: String = keys::PLACEHOLDER, required;
    }
}

wire_record! {
    pub struct DefaultBehavior {
        default_behavior: bool = keys::DEFAULT_BEHAVIOR, required;
    }
}

wire_union! {
    /// Result of `textDocument/prepareRename`.
    pub enum PrepareRenameResponse {
        Range(Range) => (is_range, as_range, into_range),
        RangeWithPlaceholder(RangeWithPlaceholder) => (is_range_with_placeholder, as_range_with_placeholder, into_range_with_placeholder),
        DefaultBehavior(DefaultBehavior) => (is_default_behavior, as_default_behavior, into_default_behavior),
    }
}

impl WorkspaceEdit {
    /// Appends `edit` to the edits for `uri`.
    pub fn push(&mut self, uri: impl Into<DocumentUri>, edit: TextEdit) {
        self.changes
            .get_or_insert_with(BTreeMap::new)
            .entry(uri.into())
            .or_default()
            .push(edit);
    }

    /// Number of edits across all documents.
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.changes.as_ref().map_or(0, |changes| changes.values().map(Vec::len).sum())
    }
}
