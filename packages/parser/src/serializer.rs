use crate::ast::{Content, Element, Fragment};
use crate::entities::{escape_attribute, escape_text};
use crate::tags;

/// Serializer converts the markup AST back to a string
///
/// Output follows fragment serialization rules: attributes are always
/// double-quoted, void elements have no end tag, and text inside raw-text
/// elements is written verbatim. Whitespace is preserved as parsed.
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    pub fn serialize(mut self, fragment: &Fragment) -> String {
        for child in &fragment.children {
            self.write_content(child, None);
        }
        self.output
    }

    fn write_content(&mut self, content: &Content, parent: Option<&str>) {
        match content {
            Content::Element(element) => self.write_element(element),
            Content::Text(text) => {
                if parent.map(tags::is_unescaped_text_parent).unwrap_or(false) {
                    self.output.push_str(text);
                } else {
                    self.output.push_str(&escape_text(text));
                }
            }
            Content::Comment(body) => {
                self.output.push_str("<!--");
                self.output.push_str(body);
                self.output.push_str("-->");
            }
        }
    }

    fn write_element(&mut self, element: &Element) {
        self.output.push('<');
        self.output.push_str(&element.tag);
        for attr in &element.attributes {
            self.output.push(' ');
            self.output.push_str(&attr.name);
            self.output.push_str("=\"");
            self.output.push_str(&escape_attribute(&attr.value));
            self.output.push('"');
        }
        self.output.push('>');

        if element.is_void() {
            return;
        }

        for child in &element.children {
            self.write_content(child, Some(element.tag.as_str()));
        }

        self.output.push_str("</");
        self.output.push_str(&element.tag);
        self.output.push('>');
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a fragment to markup
pub fn serialize(fragment: &Fragment) -> String {
    Serializer::new().serialize(fragment)
}

/// Serialize a single element (outer markup)
pub fn serialize_element(element: &Element) -> String {
    let mut serializer = Serializer::new();
    serializer.write_element(element);
    serializer.output
}
