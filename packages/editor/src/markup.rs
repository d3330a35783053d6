//! String-level entry points.
//!
//! Each call re-parses the markup, edits the parsed fragment by stable id and
//! serializes it again, so a successful edit always returns canonical markup
//! with every id materialized. Rejected edits return the input untouched.

use crate::errors::EditorError;
use crate::mutations::{MovePosition, Mutation, MutationResult};
use pagecraft_parser::{parse_with_ids, serialize, IDGenerator};
use tracing::debug;

/// Apply a mutation to markup, reporting why it was rejected
pub fn try_apply(
    markup: &str,
    mutation: &Mutation,
    ids: &mut IDGenerator,
) -> Result<(String, MutationResult), EditorError> {
    let mut fragment = parse_with_ids(markup, ids)?;
    let result = mutation.apply_with(&mut fragment, ids)?;
    Ok((serialize(&fragment), result))
}

/// Apply a mutation, returning the input unchanged if it is rejected
pub fn apply_to_markup(markup: &str, mutation: &Mutation) -> String {
    match try_apply(markup, mutation, &mut IDGenerator::random()) {
        Ok((html, _)) => html,
        Err(error) => {
            debug!(%error, node = mutation.node_id(), "Mutation rejected");
            markup.to_string()
        }
    }
}

/// Move `source_id` before, after or inside `target_id`.
///
/// Unknown ids, self-moves and moves into the source's own subtree are
/// no-ops.
pub fn move_node(markup: &str, source_id: &str, target_id: &str, position: MovePosition) -> String {
    apply_to_markup(
        markup,
        &Mutation::MoveNode {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
            position,
        },
    )
}
