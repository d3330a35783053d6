//! # Node view
//!
//! The element-only tree handed to the editor panels. It is derived from the
//! markup on demand and never edited in place: edits go through the
//! mutator, which produces new markup that is parsed again.
//!
//! ```rust,ignore
//! let output = pagecraft_parser::parse(r#"<main><h1 data-node-id="a">Hi</h1></main>"#);
//! // persist output.html, not the input: it now carries every id
//! ```

use crate::ast::{Attribute, Content, Element, Fragment, NODE_ID_ATTR};
use crate::error::ParseResult;
use crate::id_generator::IDGenerator;
use crate::parser::parse_fragment;
use crate::serializer::serialize;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// One markup element with a stable id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
    pub text_content: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        let id = id.into();
        let mut attributes = IndexMap::new();
        attributes.insert(NODE_ID_ATTR.to_string(), id.clone());
        Self {
            id,
            tag: tag.into(),
            attributes,
            children: Vec::new(),
            text_content: None,
        }
    }

    /// Build the view of an element whose id has already been materialized
    pub fn from_element(element: &Element) -> Self {
        Self {
            id: element.id().unwrap_or_default().to_string(),
            tag: element.tag.clone(),
            attributes: element
                .attributes
                .iter()
                .map(|attr| (attr.name.clone(), attr.value.clone()))
                .collect(),
            children: element.elements().map(Node::from_element).collect(),
            text_content: element.text_content().map(str::to_string),
        }
    }

    pub fn from_fragment(fragment: &Fragment) -> Vec<Node> {
        fragment.elements().map(Node::from_element).collect()
    }

    /// Convert back to an AST element (text content becomes the only child)
    pub fn to_element(&self) -> Element {
        let mut element = Element::new(self.tag.as_str());
        element.attributes = self
            .attributes
            .iter()
            .map(|(name, value)| Attribute {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();
        if element.id() != Some(self.id.as_str()) && !self.id.is_empty() {
            element.set_attr(NODE_ID_ATTR, self.id.as_str());
        }

        if self.children.is_empty() {
            if let Some(text) = &self.text_content {
                element.children.push(Content::Text(text.clone()));
            }
        } else {
            element.children = self
                .children
                .iter()
                .map(|child| Content::Element(child.to_element()))
                .collect();
        }
        element
    }
}

/// Parsed tree plus the canonical markup carrying every id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutput {
    pub nodes: Vec<Node>,
    pub html: String,
}

/// Parse markup, reusing existing ids and assigning fresh ones where missing.
///
/// Markup the parser refuses (see [`crate::parser::MAX_DEPTH`]) yields an
/// empty tree and the input unchanged.
#[instrument(skip(markup), fields(len = markup.len()))]
pub fn parse(markup: &str) -> ParseOutput {
    parse_with_generator(markup, &mut IDGenerator::random())
}

/// [`parse`] with an explicit id source
pub fn parse_with_generator(markup: &str, ids: &mut IDGenerator) -> ParseOutput {
    match parse_with_ids(markup, ids) {
        Ok(fragment) => ParseOutput {
            nodes: Node::from_fragment(&fragment),
            html: serialize(&fragment),
        },
        Err(error) => {
            warn!(%error, "Markup could not be parsed, returning it unchanged");
            ParseOutput {
                nodes: Vec::new(),
                html: markup.to_string(),
            }
        }
    }
}

/// Parse to the full AST and materialize missing ids
pub fn parse_with_ids(markup: &str, ids: &mut IDGenerator) -> ParseResult<Fragment> {
    let mut fragment = parse_fragment(markup)?;
    let assigned = ids.assign_missing(&mut fragment);
    if assigned > 0 {
        debug!(assigned, "Assigned fresh node ids");
    }
    Ok(fragment)
}

/// Render a node tree back to markup
pub fn serialize_nodes(nodes: &[Node]) -> String {
    let fragment = Fragment::new(
        nodes
            .iter()
            .map(|node| Content::Element(node.to_element()))
            .collect(),
    );
    serialize(&fragment)
}
