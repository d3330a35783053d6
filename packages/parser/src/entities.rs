//! Character reference decoding and escaping

use std::borrow::Cow;

/// Decode character references (`&amp;`, `&#169;`, `&#xA9;`, common named ones).
///
/// Unknown references are kept verbatim, the way browsers keep them.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        output.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match decode_reference(tail) {
            Some((ch, len)) => {
                output.push(ch);
                rest = &tail[len..];
            }
            None => {
                output.push('&');
                rest = &tail[1..];
            }
        }
    }

    output.push_str(rest);
    Cow::Owned(output)
}

/// Decode the reference at the start of `tail` (which begins with `&`).
/// Returns the character and the number of bytes consumed.
fn decode_reference(tail: &str) -> Option<(char, usize)> {
    // References longer than 32 bytes are left as text
    let window = &tail.as_bytes()[1..tail.len().min(33)];
    let semi = window.iter().position(|&b| b == b';')? + 1;

    let body = &tail[1..semi];
    let ch = match body.strip_prefix('#') {
        Some(number) => {
            let code = match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse::<u32>().ok()?,
            };
            char::from_u32(code)
                .filter(|c| *c != '\0')
                .unwrap_or('\u{FFFD}')
        }
        None => named_entity(body)?,
    };

    Some((ch, semi + 1))
}

fn named_entity(name: &str) -> Option<char> {
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{A0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "laquo" => '«',
        "raquo" => '»',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "times" => '×',
        "middot" => '·',
        "bull" => '•',
        "rarr" => '→',
        "larr" => '←',
        "yen" => '¥',
        "euro" => '€',
        _ => return None,
    };
    Some(ch)
}

/// Escape text content for serialization
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape(input, false)
}

/// Escape a double-quoted attribute value for serialization
pub fn escape_attribute(input: &str) -> Cow<'_, str> {
    escape(input, true)
}

fn escape(input: &str, attribute: bool) -> Cow<'_, str> {
    let needs_escape = input.chars().any(|c| match c {
        '&' | '\u{A0}' => true,
        '"' => attribute,
        '<' | '>' => !attribute,
        _ => false,
    });
    if !needs_escape {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{A0}' => output.push_str("&nbsp;"),
            '"' if attribute => output.push_str("&quot;"),
            '<' if !attribute => output.push_str("&lt;"),
            '>' if !attribute => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
    Cow::Owned(output)
}
