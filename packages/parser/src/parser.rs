//! Lenient tree builder for markup fragments
//!
//! The fragment is parsed as if it were the content of `<body>`. Recovery
//! follows the usual browser leniency for the cases editors actually produce:
//! void elements never take children, unmatched end tags are dropped, open
//! elements are closed at end of input, and a handful of implied end tags
//! (`p`, `li`, table cells, ...) are honoured.

use crate::ast::{Attribute, Content, Element, Fragment};
use crate::entities::decode_entities;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Declaration, StartTag, Token};
use crate::tags;
use logos::{Lexer, Logos};
use tracing::debug;

/// Deepest element nesting the parser accepts
pub const MAX_DEPTH: usize = 512;

/// Parser for markup fragments
pub struct Parser<'src> {
    lexer: Lexer<'src, Token<'src>>,
    open: Vec<Element>,
    root: Vec<Content>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Token::lexer(source),
            open: Vec::new(),
            root: Vec::new(),
        }
    }

    /// Parse the whole source into a fragment
    pub fn parse(mut self) -> ParseResult<Fragment> {
        while let Some(result) = self.lexer.next() {
            match result {
                Ok(Token::StartTag(tag)) => self.start_tag(tag)?,
                Ok(Token::EndTag(name)) => self.end_tag(name),
                Ok(Token::Text(text)) => self.append(Content::Text(decode_entities(text).into_owned())),
                Ok(Token::Lt) => self.append(Content::Text("<".to_string())),
                Ok(Token::Declaration(Declaration::Comment(body))) => {
                    self.append(Content::Comment(body.to_string()))
                }
                Ok(Token::Declaration(Declaration::Doctype)) => {}
                Err(()) => {
                    debug!(span = ?self.lexer.span(), "Dropping unterminated tag");
                }
            }
        }

        while !self.open.is_empty() {
            self.close_current();
        }

        Ok(Fragment::new(self.root))
    }

    fn start_tag(&mut self, tag: StartTag<'src>) -> ParseResult<()> {
        let name = tag.name.to_ascii_lowercase();

        // Fragment is parsed in body context: document wrappers are dropped
        if tags::is_document_wrapper(&name) {
            return Ok(());
        }

        self.close_implied(&name);

        let mut element = Element::new(name.as_str());
        for (attr_name, value) in tag.attributes {
            // First occurrence wins
            if element.attr(&attr_name).is_none() {
                element.attributes.push(Attribute {
                    name: attr_name,
                    value: decode_entities(value).into_owned(),
                });
            }
        }

        if tags::is_void(&name) {
            self.append(Content::Element(element));
            return Ok(());
        }

        if self.open.len() >= MAX_DEPTH {
            return Err(ParseError::nesting_too_deep(MAX_DEPTH, self.lexer.span().start));
        }

        if tags::is_raw_text(&name) {
            let raw = self.take_raw_text(&name);
            let text = if tags::is_escapable_raw_text(&name) {
                decode_entities(raw).into_owned()
            } else {
                raw.to_string()
            };
            if !text.is_empty() {
                element.children.push(Content::Text(text));
            }
        }

        self.open.push(element);
        Ok(())
    }

    fn end_tag(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();

        match self.open.iter().rposition(|element| element.tag == name) {
            Some(index) => {
                while self.open.len() > index {
                    self.close_current();
                }
            }
            None => debug!(tag = %name, "Ignoring unmatched end tag"),
        }
    }

    /// Close an open element that the incoming start tag implicitly ends
    fn close_implied(&mut self, next: &str) {
        let closes = match self.open.last() {
            Some(current) => {
                (current.tag == "p" && tags::closes_paragraph(next))
                    || tags::closes_sibling(&current.tag, next)
            }
            None => false,
        };
        if closes {
            self.close_current();
        }
    }

    /// Consume everything up to `</name` as raw text
    fn take_raw_text(&mut self, name: &str) -> &'src str {
        let rest = self.lexer.remainder();
        let needle = format!("</{}", name);
        let end = rest
            .to_ascii_lowercase()
            .find(&needle)
            .unwrap_or(rest.len());
        self.lexer.bump(end);
        &rest[..end]
    }

    fn close_current(&mut self) {
        if let Some(element) = self.open.pop() {
            self.append(Content::Element(element));
        }
    }

    /// Append to the innermost open element, merging adjacent text nodes
    fn append(&mut self, content: Content) {
        let children = match self.open.last_mut() {
            Some(element) => &mut element.children,
            None => &mut self.root,
        };

        if let Content::Text(text) = &content {
            if let Some(Content::Text(previous)) = children.last_mut() {
                previous.push_str(text);
                return;
            }
        }

        children.push(content);
    }
}

/// Parse a markup fragment without touching ids
pub fn parse_fragment(source: &str) -> ParseResult<Fragment> {
    Parser::new(source).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NODE_ID_ATTR;

    #[test]
    fn test_parse_nested_elements() {
        let fragment = parse_fragment(r#"<main data-node-id="m"><h1 data-node-id="a">Hi</h1></main>"#).unwrap();

        let main = fragment.elements().next().unwrap();
        assert_eq!(main.tag, "main");
        assert_eq!(main.attr(NODE_ID_ATTR), Some("m"));

        let h1 = main.elements().next().unwrap();
        assert_eq!(h1.tag, "h1");
        assert_eq!(h1.text_content(), Some("Hi"));
    }

    #[test]
    fn test_void_elements_never_take_children() {
        let fragment = parse_fragment("<div><img src=a.png><span>x</span><br/></div>").unwrap();

        let div = fragment.elements().next().unwrap();
        let tags: Vec<_> = div.elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["img", "span", "br"]);
        assert!(div.elements().all(|e| !e.is_void() || e.children.is_empty()));
    }

    #[test]
    fn test_unclosed_and_unmatched_tags() {
        let fragment = parse_fragment("<div><p>one</span><section>two").unwrap();

        let div = fragment.elements().next().unwrap();
        let p = div.elements().next().unwrap();
        assert_eq!(p.tag, "p");
        assert_eq!(p.text_content(), Some("one"));

        // <section> closed the open paragraph and became its sibling
        let section = div.elements().nth(1).unwrap();
        assert_eq!(section.tag, "section");
        assert_eq!(section.text_content(), Some("two"));
    }

    #[test]
    fn test_implied_list_item_end() {
        let fragment = parse_fragment("<ul><li>a<li>b</ul>").unwrap();

        let ul = fragment.elements().next().unwrap();
        assert_eq!(ul.elements().count(), 2);
    }

    #[test]
    fn test_raw_text_elements() {
        let fragment = parse_fragment("<style>.a > .b { color: red }</style><p>x</p>").unwrap();

        let style = fragment.elements().next().unwrap();
        assert_eq!(style.text_content(), Some(".a > .b { color: red }"));
        assert_eq!(fragment.elements().count(), 2);
    }

    #[test]
    fn test_template_content_is_children() {
        let fragment = parse_fragment(r#"<div><template data-source="posts"><h3>T</h3></template></div>"#).unwrap();

        let template = fragment.elements().next().unwrap().elements().next().unwrap();
        assert!(template.is_template());
        assert_eq!(template.elements().next().map(|e| e.tag.as_str()), Some("h3"));
        assert_eq!(template.text_content(), None);
    }

    #[test]
    fn test_document_wrappers_are_dropped() {
        let fragment = parse_fragment("<!DOCTYPE html><html><body><p>x</p></body></html>").unwrap();

        let tags: Vec<_> = fragment.elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["p"]);
    }

    #[test]
    fn test_nesting_limit() {
        let source = "<div>".repeat(MAX_DEPTH + 1);

        let result = parse_fragment(&source);
        assert!(matches!(result, Err(ParseError::NestingTooDeep { .. })));
    }

    #[test]
    fn test_entities_are_decoded() {
        let fragment = parse_fragment(r#"<p title="a &amp; b">&copy; 2024</p>"#).unwrap();

        let p = fragment.elements().next().unwrap();
        assert_eq!(p.attr("title"), Some("a & b"));
        assert_eq!(p.text_content(), Some("© 2024"));
    }
}
