//! Quoting for generated code strings.

/// Wrap a raw value as a quoted source literal, preferring double quotes and
/// switching to single quotes when the value itself contains a double quote.
/// Values mixing both quote kinds fall back to escaped double quotes.
pub(crate) fn code_literal(raw: &str) -> String {
    let escaped = raw.replace('\\', "\\\\");
    if !escaped.contains('"') {
        format!("\"{}\"", escaped)
    } else if !escaped.contains('\'') {
        format!("'{}'", escaped)
    } else {
        format!("\"{}\"", escaped.replace('"', "\\\""))
    }
}
