//! CSS selector evaluation over a document snapshot.
//!
//! Supports exactly the compound simple selectors the builders emit: `tag`,
//! `#id`, `.class`, `[attr]`, `[attr="value"]`, in any combination.
//! Combinators and pseudo-classes are not part of the emitted surface and
//! fail to parse, which per the query contract means zero matches.

use crate::snapshot::{Document, NodeId};
use crate::tree::DomTree;

#[derive(Debug, Clone, Default, PartialEq)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCheck>,
}

#[derive(Debug, Clone, PartialEq)]
enum AttrCheck {
    Has(String),
    Equals(String, String),
}

/// Matching nodes in document order. Malformed selectors match nothing.
pub fn query_all(doc: &Document, selector: &str) -> Vec<NodeId> {
    match parse(selector) {
        Some(sel) => doc.ids().filter(|&id| matches(doc, id, &sel)).collect(),
        None => Vec::new(),
    }
}

fn parse(input: &str) -> Option<SimpleSelector> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let chars: Vec<char> = input.chars().collect();
    let mut sel = SimpleSelector::default();
    let mut i = 0;

    if chars[0] == '*' {
        i += 1;
    } else if chars[0].is_ascii_alphabetic() {
        let (tag, next) = read_identifier(&chars, 0);
        sel.tag = Some(tag.to_ascii_lowercase());
        i = next;
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                let (id, next) = read_identifier(&chars, i + 1);
                if id.is_empty() {
                    return None;
                }
                sel.id = Some(id);
                i = next;
            }
            '.' => {
                let (class, next) = read_identifier(&chars, i + 1);
                if class.is_empty() {
                    return None;
                }
                sel.classes.push(class);
                i = next;
            }
            '[' => {
                let close = find_bracket_close(&chars, i + 1)?;
                let body: String = chars[i + 1..close].iter().collect();
                sel.attrs.push(parse_attr(&body)?);
                i = close + 1;
            }
            _ => return None,
        }
    }
    Some(sel)
}

/// Index of the closing `]`, skipping over quoted values so a `]` inside an
/// attribute value does not end the block early.
fn find_bracket_close(chars: &[char], start: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        match quote {
            Some(q) => {
                if c == '\\' {
                    i += 1;
                } else if c == q {
                    quote = None;
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                } else if c == ']' {
                    return Some(i);
                }
            }
        }
        i += 1;
    }
    None
}

fn parse_attr(body: &str) -> Option<AttrCheck> {
    match body.find('=') {
        None => {
            let name = body.trim();
            if name.is_empty() {
                return None;
            }
            Some(AttrCheck::Has(name.to_string()))
        }
        Some(eq) => {
            let name = body[..eq].trim();
            if name.is_empty() {
                return None;
            }
            let value = unquote(body[eq + 1..].trim());
            Some(AttrCheck::Equals(name.to_string(), value))
        }
    }
}

fn unquote(raw: &str) -> String {
    let mut chars = raw.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if (first == '"' || first == '\'') && raw.len() >= 2 && raw.ends_with(first) {
        let inner = &raw[1..raw.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut it = inner.chars();
        while let Some(c) = it.next() {
            if c == '\\' {
                if let Some(escaped) = it.next() {
                    out.push(escaped);
                }
            } else {
                out.push(c);
            }
        }
        out
    } else {
        raw.to_string()
    }
}

/// Read an identifier, undoing the escapes `css_identifier` produces: hex
/// escapes with an optional trailing space, and single-character backslash
/// escapes.
fn read_identifier(chars: &[char], start: usize) -> (String, usize) {
    let mut out = String::new();
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            i += 1;
            let hex_start = i;
            while i < chars.len() && chars[i].is_ascii_hexdigit() && i - hex_start < 6 {
                i += 1;
            }
            if i > hex_start {
                let hex: String = chars[hex_start..i].iter().collect();
                if let Ok(code) = u32::from_str_radix(&hex, 16)
                    && let Some(decoded) = char::from_u32(code)
                {
                    out.push(decoded);
                }
                if i < chars.len() && chars[i] == ' ' {
                    i += 1;
                }
            } else if i < chars.len() {
                out.push(chars[i]);
                i += 1;
            }
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
            i += 1;
        } else {
            break;
        }
    }
    (out, i)
}

fn matches(doc: &Document, id: NodeId, sel: &SimpleSelector) -> bool {
    if let Some(tag) = &sel.tag
        && doc.tag(id).as_deref() != Some(tag.as_str())
    {
        return false;
    }
    if let Some(want) = &sel.id
        && doc.attribute(id, "id").as_deref() != Some(want.as_str())
    {
        return false;
    }
    if !sel.classes.is_empty() {
        let have = doc.class_list(id);
        if !sel.classes.iter().all(|c| have.iter().any(|h| h == c)) {
            return false;
        }
    }
    sel.attrs.iter().all(|check| match check {
        AttrCheck::Has(name) => doc.attribute(id, name).is_some(),
        AttrCheck::Equals(name, value) => {
            doc.attribute(id, name).as_deref() == Some(value.as_str())
        }
    })
}
