//! # Pagecraft Editor
//!
//! Structural editing of page markup.
//!
//! ```text
//! markup ──parse──▶ fragment ──Mutation::apply──▶ fragment ──serialize──▶ markup'
//! ```
//!
//! Markup is the source of truth; the parsed fragment only lives for the
//! duration of one edit.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{move_node, MovePosition};
//!
//! let html = move_node(&page.html, "hero", "footer", MovePosition::Before);
//! ```

mod errors;
mod markup;
mod mutations;

pub use errors::EditorError;
pub use markup::{apply_to_markup, move_node, try_apply};
pub use mutations::{
    InsertPosition, MovePosition, Mutation, MutationError, MutationResult,
    PLACEHOLDER_IMAGE_ALT, PLACEHOLDER_IMAGE_SRC,
};
