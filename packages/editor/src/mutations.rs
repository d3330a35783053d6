//! # Structural Mutations
//!
//! Edits on a parsed fragment, addressed by stable node id.
//!
//! ## Mutation Semantics
//!
//! ### Move
//! - Relocates a subtree before, after or inside a target
//! - Rejected if either node is missing, if source and target are the same
//!   node, or if the target lies inside the source (cycle)
//! - `inside` appends as last child and is rejected for void targets
//!
//! ### ChangeTag
//! - Replaces the tag in place, keeping attributes and children verbatim
//! - Template nodes are never retagged
//!
//! ### InsertElement
//! - Creates an empty element with a fresh id as last child or next sibling
//! - `img` is seeded with a placeholder `src` and `alt`
//!
//! ### DeleteNode
//! - Removes the node and all descendants. Bindings pointing into the removed
//!   subtree are left for the document layer to reconcile.
//!
//! Every mutation is validated before anything is touched, so a rejected
//! mutation leaves the fragment exactly as it was.

use pagecraft_parser::{
    can_have_children, is_editable_tag, Content, Element, Fragment, IDGenerator, NodePath,
    DATA_SOURCE_ATTR, NODE_ID_ATTR,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder image used for freshly inserted `img` elements
pub const PLACEHOLDER_IMAGE_SRC: &str = "https://picsum.photos/200/100";
pub const PLACEHOLDER_IMAGE_ALT: &str = "Image";

/// Where a moved node lands relative to its target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MovePosition {
    Before,
    After,
    Inside,
}

impl std::str::FromStr for MovePosition {
    type Err = MutationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "before" => Ok(MovePosition::Before),
            "after" => Ok(MovePosition::After),
            "inside" => Ok(MovePosition::Inside),
            other => Err(MutationError::InvalidPosition(other.to_string())),
        }
    }
}

/// Where a new element is created relative to the reference node
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum InsertPosition {
    /// Last child of the reference node
    Child,
    /// Immediately after the reference node
    Sibling,
}

/// Structural and content edits on a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Mutation {
    #[serde(rename_all = "camelCase")]
    MoveNode {
        source_id: String,
        target_id: String,
        position: MovePosition,
    },

    #[serde(rename_all = "camelCase")]
    ChangeTag { node_id: String, new_tag: String },

    #[serde(rename_all = "camelCase")]
    InsertElement {
        node_id: String,
        position: InsertPosition,
        tag: String,
    },

    #[serde(rename_all = "camelCase")]
    DeleteNode { node_id: String },

    /// Replace the whole class list
    #[serde(rename_all = "camelCase")]
    SetClass { node_id: String, class_name: String },

    /// Replace all children with a single text node
    #[serde(rename_all = "camelCase")]
    SetText { node_id: String, text: String },

    #[serde(rename_all = "camelCase")]
    SetAttribute {
        node_id: String,
        name: String,
        value: String,
    },

    /// Wrap an element's content in a data-bound template
    #[serde(rename_all = "camelCase")]
    AttachTemplate { element_id: String, source_id: String },

    /// Replace an element's template with the template's first element
    #[serde(rename_all = "camelCase")]
    DetachTemplate { element_id: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Cannot move a node relative to itself: {0}")]
    SelfMove(String),

    #[error("Would create cycle: {target} is inside {moved}")]
    CycleDetected { moved: String, target: String },

    #[error("<{0}> cannot have children")]
    CannotHaveChildren(String),

    #[error("Template nodes cannot be retagged")]
    TemplateRetag,

    #[error("Invalid tag name: {0:?}")]
    InvalidTag(String),

    #[error("<{0}> does not keep its content when reparsed")]
    UnsupportedTag(String),

    #[error("Invalid attribute name: {0:?}")]
    InvalidAttribute(String),

    #[error("Invalid position: {0:?}")]
    InvalidPosition(String),

    #[error("No template to detach under {0}")]
    NoTemplate(String),
}

/// Result of applying a mutation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationResult {
    /// Id of the element the mutation created, if any
    pub created_id: Option<String>,
}

impl Mutation {
    /// Apply with fresh ids drawn from a random generator
    pub fn apply(&self, fragment: &mut Fragment) -> Result<MutationResult, MutationError> {
        self.apply_with(fragment, &mut IDGenerator::random())
    }

    /// Apply mutation to the fragment with validation
    pub fn apply_with(
        &self,
        fragment: &mut Fragment,
        ids: &mut IDGenerator,
    ) -> Result<MutationResult, MutationError> {
        self.validate(fragment)?;

        match self {
            Mutation::MoveNode {
                source_id,
                target_id,
                position,
            } => Self::apply_move(fragment, source_id, target_id, *position),

            Mutation::ChangeTag { node_id, new_tag } => {
                let element = find_mut(fragment, node_id)?;
                element.tag = new_tag.to_ascii_lowercase();
                Ok(MutationResult::default())
            }

            Mutation::InsertElement {
                node_id,
                position,
                tag,
            } => Self::apply_insert(fragment, node_id, *position, tag, ids),

            Mutation::DeleteNode { node_id } => {
                let path = path_of(fragment, node_id)?;
                fragment.take_element(&path);
                Ok(MutationResult::default())
            }

            Mutation::SetClass {
                node_id,
                class_name,
            } => {
                let element = find_mut(fragment, node_id)?;
                if class_name.trim().is_empty() {
                    element.remove_attr("class");
                } else {
                    element.set_attr("class", class_name.trim());
                }
                Ok(MutationResult::default())
            }

            Mutation::SetText { node_id, text } => {
                find_mut(fragment, node_id)?.set_text(text.as_str());
                Ok(MutationResult::default())
            }

            Mutation::SetAttribute {
                node_id,
                name,
                value,
            } => {
                find_mut(fragment, node_id)?.set_attr(name.as_str(), value.as_str());
                Ok(MutationResult::default())
            }

            Mutation::AttachTemplate {
                element_id,
                source_id,
            } => Self::apply_attach_template(fragment, element_id, source_id, ids),

            Mutation::DetachTemplate { element_id } => {
                Self::apply_detach_template(fragment, element_id)
            }
        }
    }

    fn apply_move(
        fragment: &mut Fragment,
        source_id: &str,
        target_id: &str,
        position: MovePosition,
    ) -> Result<MutationResult, MutationError> {
        let source_path = path_of(fragment, source_id)?;
        let moved = fragment
            .take_element(&source_path)
            .ok_or_else(|| MutationError::NodeNotFound(source_id.to_string()))?;

        // Paths shift once the source is detached
        let target_path = path_of(fragment, target_id)?;
        match position {
            MovePosition::Inside => {
                find_mut(fragment, target_id)?
                    .children
                    .push(Content::Element(moved));
            }
            MovePosition::Before | MovePosition::After => {
                let offset = if position == MovePosition::After { 1 } else { 0 };
                insert_sibling(fragment, &target_path, offset, moved)?;
            }
        }
        Ok(MutationResult::default())
    }

    fn apply_insert(
        fragment: &mut Fragment,
        node_id: &str,
        position: InsertPosition,
        tag: &str,
        ids: &mut IDGenerator,
    ) -> Result<MutationResult, MutationError> {
        let tag = tag.to_ascii_lowercase();
        let new_id = ids.new_id();
        let mut element = Element::new(tag.as_str()).with_attr(NODE_ID_ATTR, new_id.as_str());
        if tag == "img" {
            element.set_attr("src", PLACEHOLDER_IMAGE_SRC);
            element.set_attr("alt", PLACEHOLDER_IMAGE_ALT);
        }

        match position {
            InsertPosition::Child => {
                find_mut(fragment, node_id)?
                    .children
                    .push(Content::Element(element));
            }
            InsertPosition::Sibling => {
                let path = path_of(fragment, node_id)?;
                insert_sibling(fragment, &path, 1, element)?;
            }
        }

        Ok(MutationResult {
            created_id: Some(new_id),
        })
    }

    fn apply_attach_template(
        fragment: &mut Fragment,
        element_id: &str,
        source_id: &str,
        ids: &mut IDGenerator,
    ) -> Result<MutationResult, MutationError> {
        let element = find_mut(fragment, element_id)?;

        let existing = element
            .children
            .iter_mut()
            .filter_map(Content::as_element_mut)
            .find(|child| child.is_template());
        if let Some(template) = existing {
            template.set_attr(DATA_SOURCE_ATTR, source_id);
            return Ok(MutationResult::default());
        }

        let template_id = ids.new_id();
        let mut template = Element::new("template")
            .with_attr(DATA_SOURCE_ATTR, source_id)
            .with_attr(NODE_ID_ATTR, template_id.as_str());
        template.children = std::mem::take(&mut element.children);
        element.children.push(Content::Element(template));

        Ok(MutationResult {
            created_id: Some(template_id),
        })
    }

    fn apply_detach_template(
        fragment: &mut Fragment,
        element_id: &str,
    ) -> Result<MutationResult, MutationError> {
        let element = find_mut(fragment, element_id)?;

        let index = element
            .children
            .iter()
            .position(|child| matches!(child, Content::Element(e) if e.is_template()))
            .ok_or_else(|| MutationError::NoTemplate(element_id.to_string()))?;
        let replacement = element.children[index]
            .as_element()
            .and_then(|template| template.elements().next())
            .cloned()
            .ok_or_else(|| MutationError::NoTemplate(element_id.to_string()))?;

        element.children[index] = Content::Element(replacement);
        Ok(MutationResult::default())
    }

    /// Validate without applying
    pub fn validate(&self, fragment: &Fragment) -> Result<(), MutationError> {
        match self {
            Mutation::MoveNode {
                source_id,
                target_id,
                position,
            } => {
                if source_id == target_id {
                    return Err(MutationError::SelfMove(source_id.clone()));
                }
                let source_path = path_of(fragment, source_id)?;
                let target_path = path_of(fragment, target_id)?;

                if target_path.starts_with(&source_path) {
                    return Err(MutationError::CycleDetected {
                        moved: source_id.clone(),
                        target: target_id.clone(),
                    });
                }

                if *position == MovePosition::Inside {
                    require_children(find(fragment, target_id)?)?;
                }
                Ok(())
            }

            Mutation::ChangeTag { node_id, new_tag } => {
                let element = find(fragment, node_id)?;
                if element.is_template() {
                    return Err(MutationError::TemplateRetag);
                }
                validate_tag(new_tag)?;
                if !can_have_children(new_tag) && !element.children.is_empty() {
                    return Err(MutationError::CannotHaveChildren(new_tag.to_ascii_lowercase()));
                }
                Ok(())
            }

            Mutation::InsertElement {
                node_id,
                position,
                tag,
            } => {
                validate_tag(tag)?;
                let reference = find(fragment, node_id)?;
                if *position == InsertPosition::Child {
                    require_children(reference)?;
                }
                Ok(())
            }

            Mutation::DeleteNode { node_id } => find(fragment, node_id).map(|_| ()),

            Mutation::SetClass { node_id, .. } => find(fragment, node_id).map(|_| ()),

            Mutation::SetText { node_id, .. } => require_children(find(fragment, node_id)?),

            Mutation::SetAttribute { node_id, name, .. } => {
                find(fragment, node_id)?;
                validate_attribute(name)
            }

            Mutation::AttachTemplate { element_id, .. } => {
                require_children(find(fragment, element_id)?)
            }

            Mutation::DetachTemplate { element_id } => {
                let element = find(fragment, element_id)?;
                let has_content = element
                    .elements()
                    .find(|child| child.is_template())
                    .map(Element::has_element_children)
                    .unwrap_or(false);
                if has_content {
                    Ok(())
                } else {
                    Err(MutationError::NoTemplate(element_id.clone()))
                }
            }
        }
    }

    /// Id of the node this mutation primarily touches
    pub fn node_id(&self) -> &str {
        match self {
            Mutation::MoveNode { source_id, .. } => source_id,
            Mutation::ChangeTag { node_id, .. }
            | Mutation::InsertElement { node_id, .. }
            | Mutation::DeleteNode { node_id }
            | Mutation::SetClass { node_id, .. }
            | Mutation::SetText { node_id, .. }
            | Mutation::SetAttribute { node_id, .. } => node_id,
            Mutation::AttachTemplate { element_id, .. }
            | Mutation::DetachTemplate { element_id } => element_id,
        }
    }
}

fn path_of(fragment: &Fragment, id: &str) -> Result<NodePath, MutationError> {
    fragment
        .path_of(id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))
}

fn find<'a>(fragment: &'a Fragment, id: &str) -> Result<&'a Element, MutationError> {
    fragment
        .find_element(id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))
}

fn find_mut<'a>(fragment: &'a mut Fragment, id: &str) -> Result<&'a mut Element, MutationError> {
    fragment
        .find_element_mut(id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))
}

fn require_children(element: &Element) -> Result<(), MutationError> {
    if can_have_children(&element.tag) {
        Ok(())
    } else {
        Err(MutationError::CannotHaveChildren(element.tag.clone()))
    }
}

fn insert_sibling(
    fragment: &mut Fragment,
    path: &[usize],
    offset: usize,
    element: Element,
) -> Result<(), MutationError> {
    let (index, parent) = path
        .split_last()
        .ok_or_else(|| MutationError::NodeNotFound(String::new()))?;
    let siblings = fragment
        .children_at_mut(parent)
        .ok_or_else(|| MutationError::NodeNotFound(String::new()))?;
    let at = (index + offset).min(siblings.len());
    siblings.insert(at, Content::Element(element));
    Ok(())
}

fn validate_tag(tag: &str) -> Result<(), MutationError> {
    let mut chars = tag.chars();
    let valid = chars.next().map_or(false, |c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid {
        return Err(MutationError::InvalidTag(tag.to_string()));
    }
    if !is_editable_tag(tag) {
        return Err(MutationError::UnsupportedTag(tag.to_ascii_lowercase()));
    }
    Ok(())
}

fn validate_attribute(name: &str) -> Result<(), MutationError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| !c.is_whitespace() && !matches!(c, '"' | '\'' | '>' | '/' | '=' | '<'));
    if valid {
        Ok(())
    } else {
        Err(MutationError::InvalidAttribute(name.to_string()))
    }
}
