//! Tag capability tables

use crate::node::Node;

/// Elements that can never hold children
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Text and image elements that may carry a data binding
pub const BINDABLE_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "span", "a", "img", "strong", "em", "b", "i", "small",
    "label",
];

/// Elements whose content is taken verbatim up to the matching end tag
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Wrappers dropped when a fragment is parsed in body context
const DOCUMENT_WRAPPERS: &[&str] = &["html", "head", "body"];

/// Start tags that implicitly close an open `<p>`
const PARAGRAPH_CLOSERS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "menu",
    "nav", "ol", "p", "pre", "section", "table", "ul",
];

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Whether an element with this tag may be a drop target for "inside" placement
pub fn can_have_children(tag: &str) -> bool {
    !is_void(&tag.to_ascii_lowercase())
}

pub fn is_bindable_tag(tag: &str) -> bool {
    BINDABLE_TAGS.contains(&tag)
}

/// A node is bindable when its tag is text/image capable and it has no element children.
pub fn can_bind_field(node: &Node) -> bool {
    is_bindable_tag(&node.tag) && node.children.is_empty()
}

/// Tags whose bound value goes into `src` instead of text content
pub fn is_image_tag(tag: &str) -> bool {
    tag == "img"
}

pub fn is_document_wrapper(tag: &str) -> bool {
    DOCUMENT_WRAPPERS.contains(&tag)
}

/// Whether an edit may produce this tag.
///
/// Raw-text elements reparse their children as text and document wrappers are
/// dropped, so either would lose element ids on the next parse.
pub fn is_editable_tag(tag: &str) -> bool {
    let tag = tag.to_ascii_lowercase();
    !is_raw_text(&tag) && !is_unescaped_text_parent(&tag) && !is_document_wrapper(&tag)
}

pub(crate) fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// Raw text elements whose content still has character references decoded
pub(crate) fn is_escapable_raw_text(tag: &str) -> bool {
    matches!(tag, "textarea" | "title")
}

/// Children of these elements are serialized without escaping
pub(crate) fn is_unescaped_text_parent(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext")
}

pub(crate) fn closes_paragraph(tag: &str) -> bool {
    PARAGRAPH_CLOSERS.contains(&tag)
}

/// Whether opening `next` closes an open `current` sibling
pub(crate) fn closes_sibling(current: &str, next: &str) -> bool {
    match current {
        "li" => next == "li",
        "dt" | "dd" => matches!(next, "dt" | "dd"),
        "option" => next == "option",
        "tr" => next == "tr",
        "td" | "th" => matches!(next, "td" | "th" | "tr"),
        _ => false,
    }
}
