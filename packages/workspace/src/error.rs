use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid site file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("No document selected")]
    NoDocumentSelected,

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("<{tag}> node {node_id} cannot be bound to a field")]
    NotBindable { node_id: String, tag: String },

    #[error("Edit rejected: {0}")]
    Editor(#[from] pagecraft_editor::EditorError),

    #[error("Data source error: {0}")]
    DataSource(#[from] pagecraft_evaluator::DataSourceError),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
