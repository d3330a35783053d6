//! Read-only lookups over a [`Node`] tree.
//!
//! Ids are expected to be unique; when they are not, every lookup resolves to
//! the first match in depth-first pre-order.

use crate::node::Node;

/// Find the node carrying `id`
pub fn find_node_by_id<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node_by_id(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Chain of nodes from a root down to `id`, inclusive. Empty when not found.
pub fn ancestor_path<'a>(nodes: &'a [Node], id: &str) -> Vec<&'a Node> {
    let mut path = Vec::new();
    collect_path(nodes, id, &mut path);
    path
}

fn collect_path<'a>(nodes: &'a [Node], id: &str, path: &mut Vec<&'a Node>) -> bool {
    for node in nodes {
        path.push(node);
        if node.id == id || collect_path(&node.children, id, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// Whether `descendant_id` lies in the subtree of `ancestor_id`.
///
/// A node counts as its own descendant; an unknown ancestor has none.
pub fn is_descendant_of(nodes: &[Node], descendant_id: &str, ancestor_id: &str) -> bool {
    match find_node_by_id(nodes, ancestor_id) {
        Some(ancestor) => {
            ancestor.id == descendant_id
                || find_node_by_id(&ancestor.children, descendant_id).is_some()
        }
        None => false,
    }
}
