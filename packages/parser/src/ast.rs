//! # Markup AST
//!
//! Full-fidelity representation of a parsed fragment. Unlike [`crate::Node`],
//! which only exposes elements, the AST keeps text and comments so that
//! mixed content survives a parse → edit → serialize round trip.
//!
//! `template` elements hold their deferred content as ordinary children; the
//! serializer writes it back between the template tags, which is exactly how
//! a template's content serializes.

use crate::tags;

/// Attribute carrying a node's stable identity
pub const NODE_ID_ATTR: &str = "data-node-id";

/// Attribute naming the data source a `template` is bound to
pub const DATA_SOURCE_ATTR: &str = "data-source";

/// Index path from the fragment root to an element (indices into `children`)
pub type NodePath = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Content {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Content::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Content::Element(element) => Some(element),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Content>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: Content) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|attr| attr.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    /// Stable id, if present and non-empty
    pub fn id(&self) -> Option<&str> {
        self.attr(NODE_ID_ATTR).filter(|id| !id.is_empty())
    }

    pub fn is_void(&self) -> bool {
        tags::is_void(&self.tag)
    }

    pub fn is_template(&self) -> bool {
        self.tag == "template"
    }

    /// Element children, skipping text and comments
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Content::as_element)
    }

    pub fn has_element_children(&self) -> bool {
        self.elements().next().is_some()
    }

    /// Text of the element when its only child is a single text node.
    ///
    /// Templates never report text: their content is deferred.
    pub fn text_content(&self) -> Option<&str> {
        if self.is_template() {
            return None;
        }
        match self.children.as_slice() {
            [Content::Text(text)] => Some(text.as_str()),
            _ => None,
        }
    }

    /// Replace all children with a single text node
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Content::Text(text));
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|value| value.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let value = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attr("class", value);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let remaining = self
            .attr("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if remaining.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", remaining);
        }
    }

    /// Visit this element and every descendant element, depth-first.
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Content::Element(element) = child {
                element.visit_mut(f);
            }
        }
    }
}

/// A parsed sequence of sibling nodes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub children: Vec<Content>,
}

impl Fragment {
    pub fn new(children: Vec<Content>) -> Self {
        Self { children }
    }

    /// Root-level elements
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Content::as_element)
    }

    /// Path to the first element (document order) carrying `id`
    pub fn path_of(&self, id: &str) -> Option<NodePath> {
        let mut path = Vec::new();
        if path_in(&self.children, id, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    pub fn element_at(&self, path: &[usize]) -> Option<&Element> {
        let (first, rest) = path.split_first()?;
        let mut element = self.children.get(*first)?.as_element()?;
        for index in rest {
            element = element.children.get(*index)?.as_element()?;
        }
        Some(element)
    }

    pub fn element_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let (first, rest) = path.split_first()?;
        let mut element = self.children.get_mut(*first)?.as_element_mut()?;
        for index in rest {
            element = element.children.get_mut(*index)?.as_element_mut()?;
        }
        Some(element)
    }

    /// Children list of the element at `parent` (the root list for an empty path)
    pub fn children_at_mut(&mut self, parent: &[usize]) -> Option<&mut Vec<Content>> {
        if parent.is_empty() {
            Some(&mut self.children)
        } else {
            self.element_at_mut(parent).map(|element| &mut element.children)
        }
    }

    pub fn find_element(&self, id: &str) -> Option<&Element> {
        let path = self.path_of(id)?;
        self.element_at(&path)
    }

    pub fn find_element_mut(&mut self, id: &str) -> Option<&mut Element> {
        let path = self.path_of(id)?;
        self.element_at_mut(&path)
    }

    /// Detach the element at `path` together with its subtree
    pub fn take_element(&mut self, path: &[usize]) -> Option<Element> {
        let (index, parent) = path.split_last()?;
        let siblings = self.children_at_mut(parent)?;
        if !matches!(siblings.get(*index), Some(Content::Element(_))) {
            return None;
        }
        match siblings.remove(*index) {
            Content::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Visit every element in document order
    pub fn visit_elements_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        for child in &mut self.children {
            if let Content::Element(element) = child {
                element.visit_mut(f);
            }
        }
    }
}

fn path_in(children: &[Content], id: &str, path: &mut NodePath) -> bool {
    for (index, child) in children.iter().enumerate() {
        if let Content::Element(element) = child {
            path.push(index);
            if element.id() == Some(id) || path_in(&element.children, id, path) {
                return true;
            }
            path.pop();
        }
    }
    false
}
