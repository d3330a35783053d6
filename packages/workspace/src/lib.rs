//! # Pagecraft Workspace
//!
//! Everything above a single page's markup: the site's documents, the
//! editor state store, the preview connection and the [`EditSession`] that
//! ties them together.
//!
//! ```rust,ignore
//! use pagecraft_workspace::{initial_state, EditSession};
//! use pagecraft_evaluator::DataSourceRegistry;
//!
//! let mut session = EditSession::new(initial_state(), DataSourceRegistry::builtin());
//! let tree = session.tree()?;
//! session.move_node(&tree[0].children[2].id, &tree[0].children[0].id, MovePosition::Before)?;
//! ```

pub mod document;
pub mod error;
pub mod preview;
pub mod seed;
pub mod session;
pub mod state;

pub use document::{child_path, Component, Document, Site};
pub use error::{WorkspaceError, WorkspaceResult};
pub use preview::{
    build_preview_document, preview_channel, HostMessage, Link, PreviewHost, PreviewSurface,
    SurfaceMessage, SELECTED_CLASS,
};
pub use seed::{initial_state, seed_components, seed_documents};
pub use session::EditSession;
pub use state::{
    Action, EditorMode, EditorState, EditorStore, LeftTab, ViewMode, Viewport,
    DEFAULT_DEVICE_WIDTH,
};
