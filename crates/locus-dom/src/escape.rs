//! Escaping for embedded literal values.
//!
//! Builders embed raw attribute values and text into CSS selectors and XPath
//! expressions. These helpers keep that safe when values carry quotes,
//! leading digits, or other metacharacters.

/// Escape a raw string for use as a CSS identifier (after `#` or `.`).
///
/// Covers the `CSS.escape` cases that occur in attribute values: a leading
/// digit becomes a hex escape, and ASCII outside `[a-zA-Z0-9_-]` is
/// backslash-escaped. Non-ASCII passes through untouched.
pub fn css_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for (i, ch) in raw.chars().enumerate() {
        if i == 0 && ch.is_ascii_digit() {
            out.push_str(&format!("\\{:x} ", ch as u32));
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii() {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}

/// Escape a raw string for embedding inside a double-quoted CSS attribute
/// value, `[attr="..."]`.
pub fn css_string(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render a raw string as an XPath string literal, choosing the quote style
/// so embedded quotes never break the expression. Values containing both
/// quote kinds come out as `concat(...)`.
pub fn xpath_literal(raw: &str) -> String {
    if !raw.contains('"') {
        return format!("\"{}\"", raw);
    }
    if !raw.contains('\'') {
        return format!("'{}'", raw);
    }
    // Both quote kinds present: split on double quotes and stitch the
    // quotes back in as single-quoted pieces.
    let mut pieces = Vec::new();
    for (i, part) in raw.split('"').enumerate() {
        if i > 0 {
            pieces.push("'\"'".to_string());
        }
        if !part.is_empty() {
            pieces.push(format!("\"{}\"", part));
        }
    }
    format!("concat({})", pieces.join(", "))
}
