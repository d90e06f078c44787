//! Structural path construction.

use locus_dom::escape::xpath_literal;
use locus_dom::{DomTree, NodeId, Query};

/// Attributes tried for a strong relative path, strongest first.
const STRONG_ATTRS: [&str; 9] = [
    "data-testid",
    "data-test",
    "aria-label",
    "name",
    "title",
    "placeholder",
    "role",
    "type",
    "value",
];

/// Absolute ordinal path from the root to `id`, one `/tag[n]` segment per
/// level. `n` is 1-based and counts only preceding same-tag siblings, so
/// every segment pins exactly one node and the whole path round-trips to the
/// original node. Brittle to structural change, which is why it scores last.
pub fn indexed_path(tree: &dyn DomTree, id: NodeId) -> String {
    let mut segments = Vec::new();
    let mut current = Some(id);
    while let Some(node) = current {
        let Some(tag) = tree.tag(node) else { break };
        let mut index = 1;
        let mut sib = tree.previous_sibling(node);
        while let Some(prev) = sib {
            if tree.tag(prev).as_deref() == Some(tag.as_str()) {
                index += 1;
            }
            sib = tree.previous_sibling(prev);
        }
        segments.push(format!("/{}[{}]", tag, index));
        current = tree.parent(node);
    }
    segments.reverse();
    segments.concat()
}

/// Relative path anchored on a discriminating attribute, or on exact text as
/// a last resort. Each attribute expression is accepted only when it matches
/// exactly one node; the text expression additionally requires non-empty
/// text shorter than `max_text_len`. `None` when nothing pins the node.
pub fn strong_relative_path(
    tree: &dyn DomTree,
    id: NodeId,
    max_text_len: usize,
) -> Option<String> {
    let tag = tree.tag(id)?;

    for attr in STRONG_ATTRS {
        if let Some(value) = tree.attribute(id, attr)
            && !value.trim().is_empty()
        {
            let path = format!("//{}[@{}={}]", tag, attr, xpath_literal(&value));
            if tree.count(&Query::XPath(path.clone())) == 1 {
                return Some(path);
            }
        }
    }

    let text = tree.text(id);
    if !text.is_empty() && text.chars().count() < max_text_len {
        let path = format!("//{}[normalize-space()={}]", tag, xpath_literal(&text));
        if tree.count(&Query::XPath(path.clone())) == 1 {
            return Some(path);
        }
    }
    None
}
