//! Lexer for markup fragments using logos
//!
//! Logos splits the source into tags, text and declarations. Attributes are
//! scanned by hand inside the start-tag callback since quoted values may
//! legally contain `>`.

use logos::{Lexer, Logos};

/// Token types for markup
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'src> {
    /// `<!-- ... -->` or `<!DOCTYPE ...>`
    #[token("<!", lex_declaration)]
    Declaration(Declaration<'src>),

    #[regex(r"<[a-zA-Z][a-zA-Z0-9-]*", lex_start_tag)]
    StartTag(StartTag<'src>),

    #[regex(r"</[a-zA-Z][^>]*>", lex_end_tag)]
    EndTag(&'src str),

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),

    /// A `<` that does not open anything. Kept as text.
    #[token("<")]
    Lt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration<'src> {
    Comment(&'src str),
    Doctype,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartTag<'src> {
    /// Tag name as written (not yet lowercased)
    pub name: &'src str,

    /// Attributes in source order; names lowercased, values still encoded
    pub attributes: Vec<(String, &'src str)>,

    pub self_closing: bool,
}

fn lex_declaration<'src>(lex: &mut Lexer<'src, Token<'src>>) -> Declaration<'src> {
    let rest = lex.remainder();

    if let Some(body) = rest.strip_prefix("--") {
        return match body.find("-->") {
            Some(end) => {
                lex.bump(2 + end + 3);
                Declaration::Comment(&body[..end])
            }
            None => {
                lex.bump(rest.len());
                Declaration::Comment(body)
            }
        };
    }

    let end = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
    lex.bump(end);
    Declaration::Doctype
}

fn lex_start_tag<'src>(lex: &mut Lexer<'src, Token<'src>>) -> Option<StartTag<'src>> {
    let name = &lex.slice()[1..];
    let rest = lex.remainder();

    match scan_attributes(rest) {
        Some(scan) => {
            lex.bump(scan.consumed);
            Some(StartTag {
                name,
                attributes: scan.attributes,
                self_closing: scan.self_closing,
            })
        }
        None => {
            // Unterminated tag: swallow the rest of the input
            lex.bump(rest.len());
            None
        }
    }
}

fn lex_end_tag<'src>(lex: &mut Lexer<'src, Token<'src>>) -> &'src str {
    let inner = &lex.slice()[2..];
    let end = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(inner.len());
    &inner[..end]
}

struct AttributeScan<'src> {
    attributes: Vec<(String, &'src str)>,
    self_closing: bool,
    consumed: usize,
}

/// Scan attributes up to and including the closing `>`.
///
/// Returns `None` when the input ends before the tag is closed.
fn scan_attributes(input: &str) -> Option<AttributeScan<'_>> {
    let bytes = input.as_bytes();
    let mut attributes = Vec::new();
    let mut pos = 0;

    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        match bytes.get(pos)? {
            b'>' => {
                return Some(AttributeScan {
                    attributes,
                    self_closing: false,
                    consumed: pos + 1,
                });
            }
            b'/' => {
                if bytes.get(pos + 1) == Some(&b'>') {
                    return Some(AttributeScan {
                        attributes,
                        self_closing: true,
                        consumed: pos + 2,
                    });
                }
                pos += 1;
                continue;
            }
            _ => {}
        }

        let name_start = pos;
        pos += 1;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && !matches!(bytes[pos], b'/' | b'>' | b'=')
        {
            pos += 1;
        }
        let name = input[name_start..pos].to_ascii_lowercase();

        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        if bytes.get(pos) != Some(&b'=') {
            attributes.push((name, ""));
            continue;
        }
        pos += 1;

        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        let value = match bytes.get(pos)? {
            quote @ (b'"' | b'\'') => {
                let value_start = pos + 1;
                let len = input[value_start..].find(*quote as char)?;
                pos = value_start + len + 1;
                &input[value_start..value_start + len]
            }
            _ => {
                let value_start = pos;
                while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'>' {
                    pos += 1;
                }
                &input[value_start..pos]
            }
        };

        attributes.push((name, value));
    }
}

/// Lex markup into tokens with spans
pub fn lex(source: &str) -> impl Iterator<Item = (Result<Token<'_>, ()>, std::ops::Range<usize>)> + '_ {
    Token::lexer(source).spanned()
}
