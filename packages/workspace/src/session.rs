//! # Edit Session
//!
//! Wires the store to the parser, mutator, expander and preview for the
//! selected document.
//!
//! ```text
//! Document.html ──parse──▶ tree (panels)
//!       ▲                    │ Mutation
//!       └──UPDATE_DOCUMENT_MARKUP◀── mutator
//! Document.html ──expand──▶ preview markup ──PreviewHost──▶ surface
//! ```

use crate::document::Document;
use crate::error::{WorkspaceError, WorkspaceResult};
use crate::preview::{preview_channel, PreviewHost, PreviewSurface};
use crate::state::{Action, EditorState, EditorStore};
use pagecraft_editor::{
    try_apply, EditorError, MovePosition, Mutation, MutationError, MutationResult,
};
use pagecraft_evaluator::{DataListConfig, DataSourceRegistry, TemplateExpander};
use pagecraft_parser::{can_bind_field, find_node_by_id, parse, IDGenerator, Node};
use tracing::{debug, info};

pub struct EditSession {
    store: EditorStore,
    sources: DataSourceRegistry,
    ids: IDGenerator,
    preview: Option<PreviewHost>,
}

impl EditSession {
    pub fn new(state: EditorState, sources: DataSourceRegistry) -> Self {
        Self {
            store: EditorStore::new(state),
            sources,
            ids: IDGenerator::random(),
            preview: None,
        }
    }

    /// Use `ids` for every id the session creates
    pub fn with_ids(mut self, ids: IDGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn state(&self) -> &EditorState {
        self.store.state()
    }

    pub fn sources(&self) -> &DataSourceRegistry {
        &self.sources
    }

    pub fn into_state(self) -> EditorState {
        self.store.into_state()
    }

    pub fn dispatch(&mut self, action: Action) {
        self.store.dispatch(action);
    }

    pub fn selected_document(&self) -> WorkspaceResult<&Document> {
        self.state()
            .selected_document()
            .ok_or(WorkspaceError::NoDocumentSelected)
    }

    pub fn select_document(&mut self, id: &str) -> WorkspaceResult<()> {
        if self.state().document(id).is_none() {
            return Err(WorkspaceError::DocumentNotFound(id.to_string()));
        }
        self.dispatch(Action::SelectDocument {
            document_id: Some(id.to_string()),
        });
        Ok(())
    }

    /// Node tree of the selected document.
    ///
    /// Ids assigned while parsing are written back so they stay stable.
    pub fn tree(&mut self) -> WorkspaceResult<Vec<Node>> {
        let doc = self.selected_document()?;
        let output = parse(&doc.html);
        if output.html != doc.html {
            let document_id = doc.id.clone();
            debug!(document = %document_id, "Persisting canonical markup");
            self.dispatch(Action::UpdateDocumentMarkup {
                document_id,
                html: output.html,
            });
        }
        Ok(output.nodes)
    }

    /// Apply a mutation to the selected document
    pub fn apply_mutation(&mut self, mutation: &Mutation) -> WorkspaceResult<MutationResult> {
        let doc = self
            .store
            .state()
            .selected_document()
            .ok_or(WorkspaceError::NoDocumentSelected)?;
        let document_id = doc.id.clone();
        let (html, result) = try_apply(&doc.html, mutation, &mut self.ids)?;

        self.dispatch(Action::UpdateDocumentMarkup {
            document_id: document_id.clone(),
            html,
        });
        if matches!(mutation, Mutation::DeleteNode { .. }) {
            self.reconcile(&document_id);
        }
        Ok(result)
    }

    pub fn move_node(
        &mut self,
        source_id: &str,
        target_id: &str,
        position: MovePosition,
    ) -> WorkspaceResult<()> {
        self.apply_mutation(&Mutation::MoveNode {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
            position,
        })
        .map(|_| ())
    }

    /// Drop selection, bindings and data list config pointing at removed nodes
    fn reconcile(&mut self, document_id: &str) {
        let Some(doc) = self.state().document(document_id) else {
            return;
        };
        let tree = parse(&doc.html).nodes;
        let exists = |id: &str| find_node_by_id(&tree, id).is_some();

        let stale_bindings: Vec<String> = doc
            .bindings
            .keys()
            .filter(|id| !exists(id))
            .cloned()
            .collect();
        let stale_list = doc
            .data_list_config
            .as_ref()
            .map_or(false, |config| !exists(&config.element_id));
        let stale_selection = self
            .state()
            .selected_node_id
            .as_deref()
            .map_or(false, |id| !exists(id));

        if stale_list {
            info!(document = document_id, "Data list element removed, clearing config");
            self.dispatch(Action::RemoveDataList {
                document_id: document_id.to_string(),
            });
        } else {
            for node_id in stale_bindings {
                self.dispatch(Action::UnbindField {
                    document_id: document_id.to_string(),
                    node_id,
                });
            }
        }
        if stale_selection {
            self.dispatch(Action::SelectNode { node_id: None });
        }
    }

    /// Bind a leaf node of the selected document to a data field
    pub fn bind_field(&mut self, node_id: &str, field_id: &str) -> WorkspaceResult<()> {
        let tree = self.tree()?;
        let node = find_node_by_id(&tree, node_id)
            .ok_or_else(|| WorkspaceError::NodeNotFound(node_id.to_string()))?;
        if !can_bind_field(node) {
            return Err(WorkspaceError::NotBindable {
                node_id: node_id.to_string(),
                tag: node.tag.clone(),
            });
        }

        let document_id = self.selected_document()?.id.clone();
        self.dispatch(Action::BindField {
            document_id,
            node_id: node_id.to_string(),
            field_id: field_id.to_string(),
        });
        Ok(())
    }

    pub fn unbind_field(&mut self, node_id: &str) -> WorkspaceResult<()> {
        let document_id = self.selected_document()?.id.clone();
        self.dispatch(Action::UnbindField {
            document_id,
            node_id: node_id.to_string(),
        });
        Ok(())
    }

    /// Turn an element's content into a template bound to `config.source_id`.
    ///
    /// Moving the list to another element first unwraps the old template and
    /// drops its bindings.
    pub fn set_data_list(&mut self, config: DataListConfig) -> WorkspaceResult<()> {
        let moved = self
            .selected_document()?
            .data_list_config
            .as_ref()
            .map_or(false, |current| current.element_id != config.element_id);
        if moved {
            self.remove_data_list()?;
        }

        self.apply_mutation(&Mutation::AttachTemplate {
            element_id: config.element_id.clone(),
            source_id: config.source_id.clone(),
        })?;

        let document_id = self.selected_document()?.id.clone();
        self.dispatch(Action::SetDataList {
            document_id,
            config,
        });
        Ok(())
    }

    /// Unwrap the data list template and clear the config and all bindings
    pub fn remove_data_list(&mut self) -> WorkspaceResult<()> {
        let doc = self.selected_document()?;
        let document_id = doc.id.clone();

        if let Some(config) = doc.data_list_config.clone() {
            let detach = Mutation::DetachTemplate {
                element_id: config.element_id,
            };
            match self.apply_mutation(&detach) {
                Ok(_) => {}
                // An empty or missing template has nothing to unwrap
                Err(WorkspaceError::Editor(EditorError::Mutation(
                    MutationError::NoTemplate(_) | MutationError::NodeNotFound(_),
                ))) => {}
                Err(error) => return Err(error),
            }
        }

        self.dispatch(Action::RemoveDataList { document_id });
        Ok(())
    }

    /// Preview markup of the selected document with templates expanded
    pub fn preview_html(&self) -> String {
        match self.state().selected_document() {
            Some(doc) => TemplateExpander::new(&self.sources).expand(
                &doc.html,
                &doc.bindings,
                doc.data_list_config.as_ref(),
            ),
            None => String::new(),
        }
    }

    /// Open a preview surface.
    ///
    /// Returns the first-paint document and the surface end, which reports
    /// `load` as soon as it is opened.
    pub fn connect_preview(&mut self) -> (String, PreviewSurface) {
        let html = self.preview_html();
        let (host_link, surface_link) = preview_channel();

        let mut host = PreviewHost::new(host_link);
        host.sync(&html, self.state().selected_node_id.as_deref());
        let document = host.first_paint(&html);
        self.preview = Some(host);

        let surface = PreviewSurface::open(surface_link, &html);
        (document, surface)
    }

    /// Push the current preview markup and selection; returns messages sent
    pub fn sync_preview(&mut self) -> usize {
        let html = self.preview_html();
        let selection = self.state().selected_node_id.clone();
        match self.preview.as_mut() {
            Some(host) => host.sync(&html, selection.as_deref()),
            None => 0,
        }
    }

    /// Feed surface messages back into the store, then resync
    pub fn pump_preview(&mut self) -> usize {
        let selected = match self.preview.as_mut() {
            Some(host) => host.pump(),
            None => return 0,
        };
        for id in selected {
            self.dispatch(Action::SelectNode { node_id: Some(id) });
        }
        self.sync_preview()
    }

    /// Send a class-only change straight to the preview
    pub fn set_class(&mut self, node_id: &str, class_name: &str) -> WorkspaceResult<()> {
        self.apply_mutation(&Mutation::SetClass {
            node_id: node_id.to_string(),
            class_name: class_name.to_string(),
        })?;
        if let Some(host) = self.preview.as_mut() {
            host.update_class(node_id, class_name);
        }
        Ok(())
    }
}
