//! # Editor State
//!
//! The whole editor state and the closed set of actions that change it.
//!
//! [`EditorState::reduce`] is a pure transition: it never fails, never reads
//! anything but the previous state and the action, and treats actions it does
//! not recognise as no-ops. The only outside input is the fresh id drawn for a
//! new document.

use crate::document::{child_path, Component, Document};
use pagecraft_evaluator::DataListConfig;
use pagecraft_parser::new_prefixed_id;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_DEVICE_WIDTH: u32 = 1024;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum EditorMode {
    #[default]
    Design,
    Data,
    Animation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// Scale the device frame down to the available width
    #[default]
    Fit,
    Scroll,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum LeftTab {
    Home,
    #[default]
    Pages,
    Components,
    Publish,
    Chat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub device_width: u32,
    pub view_mode: ViewMode,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            device_width: DEFAULT_DEVICE_WIDTH,
            view_mode: ViewMode::Fit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub documents: Vec<Document>,
    pub components: Vec<Component>,
    pub selected_document_id: Option<String>,
    pub selected_node_id: Option<String>,
    pub editor_mode: EditorMode,
    pub viewport: Viewport,
    pub left_tab: LeftTab,
}

/// Everything that can change the editor state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Switching documents always drops the node selection
    #[serde(rename_all = "camelCase")]
    SelectDocument { document_id: Option<String> },

    #[serde(rename_all = "camelCase")]
    SelectNode { node_id: Option<String> },

    SetEditorMode { mode: EditorMode },

    SetViewMode { mode: ViewMode },

    SetDeviceWidth { width: u32 },

    SetLeftTab { tab: LeftTab },

    #[serde(rename_all = "camelCase")]
    UpdateDocumentMarkup { document_id: String, html: String },

    #[serde(rename_all = "camelCase")]
    UpdateDocumentPath { document_id: String, path: String },

    #[serde(rename_all = "camelCase")]
    BindField {
        document_id: String,
        node_id: String,
        field_id: String,
    },

    #[serde(rename_all = "camelCase")]
    UnbindField { document_id: String, node_id: String },

    #[serde(rename_all = "camelCase")]
    SetDataList {
        document_id: String,
        config: DataListConfig,
    },

    /// Also clears every binding on the document
    #[serde(rename_all = "camelCase")]
    RemoveDataList { document_id: String },

    #[serde(rename_all = "camelCase")]
    AddDocument { name: String, parent_id: Option<String> },

    #[serde(rename_all = "camelCase")]
    DeleteDocument { document_id: String },

    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectDocument { .. } => "SELECT_DOCUMENT",
            Action::SelectNode { .. } => "SELECT_NODE",
            Action::SetEditorMode { .. } => "SET_EDITOR_MODE",
            Action::SetViewMode { .. } => "SET_VIEW_MODE",
            Action::SetDeviceWidth { .. } => "SET_DEVICE_WIDTH",
            Action::SetLeftTab { .. } => "SET_LEFT_TAB",
            Action::UpdateDocumentMarkup { .. } => "UPDATE_DOCUMENT_MARKUP",
            Action::UpdateDocumentPath { .. } => "UPDATE_DOCUMENT_PATH",
            Action::BindField { .. } => "BIND_FIELD",
            Action::UnbindField { .. } => "UNBIND_FIELD",
            Action::SetDataList { .. } => "SET_DATA_LIST",
            Action::RemoveDataList { .. } => "REMOVE_DATA_LIST",
            Action::AddDocument { .. } => "ADD_DOCUMENT",
            Action::DeleteDocument { .. } => "DELETE_DOCUMENT",
            Action::Unknown => "UNKNOWN",
        }
    }
}

impl EditorState {
    pub fn new(documents: Vec<Document>, components: Vec<Component>) -> Self {
        Self {
            documents,
            components,
            ..Self::default()
        }
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn selected_document(&self) -> Option<&Document> {
        self.selected_document_id
            .as_deref()
            .and_then(|id| self.document(id))
    }

    /// Compute the state that follows `action`
    pub fn reduce(&self, action: &Action) -> EditorState {
        let mut next = self.clone();
        match action {
            Action::SelectDocument { document_id } => {
                next.selected_document_id = document_id.clone();
                next.selected_node_id = None;
            }

            Action::SelectNode { node_id } => {
                next.selected_node_id = node_id.clone();
            }

            Action::SetEditorMode { mode } => next.editor_mode = *mode,

            Action::SetViewMode { mode } => next.viewport.view_mode = *mode,

            Action::SetDeviceWidth { width } => next.viewport.device_width = *width,

            Action::SetLeftTab { tab } => next.left_tab = *tab,

            Action::UpdateDocumentMarkup { document_id, html } => {
                next.update_document(document_id, |doc| doc.html = html.clone());
            }

            Action::UpdateDocumentPath { document_id, path } => {
                next.update_document(document_id, |doc| doc.path = path.clone());
            }

            Action::BindField {
                document_id,
                node_id,
                field_id,
            } => {
                next.update_document(document_id, |doc| {
                    doc.bindings.insert(node_id.clone(), field_id.clone());
                });
            }

            Action::UnbindField {
                document_id,
                node_id,
            } => {
                next.update_document(document_id, |doc| {
                    doc.bindings.remove(node_id);
                });
            }

            Action::SetDataList {
                document_id,
                config,
            } => {
                next.update_document(document_id, |doc| {
                    doc.data_list_config = Some(config.clone());
                });
            }

            Action::RemoveDataList { document_id } => {
                next.update_document(document_id, |doc| {
                    doc.data_list_config = None;
                    doc.bindings.clear();
                });
            }

            Action::AddDocument { name, parent_id } => {
                let parent = parent_id.as_deref().and_then(|id| self.document(id));
                let document = new_document(name, parent_id.clone(), child_path(parent, name));
                info!(id = %document.id, path = %document.path, "Added document");
                next.documents.push(document);
            }

            Action::DeleteDocument { document_id } => {
                next.documents.retain(|doc| doc.id != *document_id);
                if next.selected_document_id.as_deref() == Some(document_id.as_str()) {
                    next.selected_document_id = None;
                }
            }

            Action::Unknown => {
                debug!("Ignoring unknown action");
            }
        }
        next
    }

    fn update_document(&mut self, id: &str, update: impl FnOnce(&mut Document)) {
        match self.documents.iter_mut().find(|doc| doc.id == id) {
            Some(doc) => update(doc),
            None => debug!(document = id, "Action targets unknown document"),
        }
    }
}

fn new_document(name: &str, parent_id: Option<String>, path: String) -> Document {
    let html = format!(
        r#"<main data-node-id="{}" class="p-8"><section data-node-id="{}" class="space-y-4"></section></main>"#,
        new_prefixed_id("main"),
        new_prefixed_id("section"),
    );
    Document {
        parent_id,
        ..Document::new(new_prefixed_id("page"), name, path, html)
    }
}

/// Owner of the current state; every change goes through [`EditorStore::dispatch`]
#[derive(Debug, Clone, Default)]
pub struct EditorStore {
    state: EditorState,
}

impl EditorStore {
    pub fn new(state: EditorState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn into_state(self) -> EditorState {
        self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(action = action.name(), "Dispatch");
        self.state = self.state.reduce(&action);
    }
}
