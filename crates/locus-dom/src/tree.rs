//! The tree abstraction the resolver works against.
//!
//! Everything the engine needs from a markup tree goes through [`DomTree`]:
//! structural reads (tag, attributes, text, parent, siblings), the label
//! relation, and query evaluation. [`Document`] implements it over a
//! snapshot; any other backing store can implement the same trait and the
//! engine will not notice the difference.

use serde::{Deserialize, Serialize};

use crate::css;
use crate::snapshot::{Document, NodeId};
use crate::xpath;

/// A selector or path expression the tree can evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "expr", rename_all = "snake_case")]
pub enum Query {
    Css(String),
    XPath(String),
}

impl Query {
    pub fn expr(&self) -> &str {
        match self {
            Query::Css(s) | Query::XPath(s) => s,
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::Css(s) => write!(f, "css:{}", s),
            Query::XPath(s) => write!(f, "xpath:{}", s),
        }
    }
}

/// Collapse whitespace runs and trim the ends, the `normalize-space()`
/// behavior all text comparison goes through.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Read-only view of a markup tree.
///
/// All methods are blocking, side-effect-free reads. Query evaluation
/// tolerates malformed expressions by returning no matches rather than
/// failing.
pub trait DomTree {
    fn tag(&self, id: NodeId) -> Option<String>;

    fn attribute(&self, id: NodeId, name: &str) -> Option<String>;

    /// Attribute value when present and not blank. Blank values cannot
    /// anchor a locator and are treated as absent.
    fn non_empty_attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.attribute(id, name).filter(|v| !v.trim().is_empty())
    }

    /// Whitespace-separated class tokens in source order. Reading the raw
    /// attribute text keeps plain and namespaced class representations on
    /// one code path.
    fn class_list(&self, id: NodeId) -> Vec<String>;

    /// Normalized text: the node's own text plus descendant text in document
    /// order, whitespace collapsed and trimmed.
    fn text(&self, id: NodeId) -> String;

    fn parent(&self, id: NodeId) -> Option<NodeId>;

    fn previous_sibling(&self, id: NodeId) -> Option<NodeId>;

    /// Normalized text of the label associated with a control, if any.
    /// A label naming the node via its `for` attribute wins over an
    /// enclosing label element.
    fn label_text(&self, id: NodeId) -> Option<String>;

    fn node_count(&self) -> usize;

    /// Matching nodes in document order. Malformed queries match nothing.
    fn query_all(&self, query: &Query) -> Vec<NodeId>;

    fn count(&self, query: &Query) -> usize {
        self.query_all(query).len()
    }
}

impl DomTree for Document {
    fn tag(&self, id: NodeId) -> Option<String> {
        self.node(id).map(|n| n.tag.clone())
    }

    fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.node(id).and_then(|n| n.attrs.get(name).cloned())
    }

    fn class_list(&self, id: NodeId) -> Vec<String> {
        self.attribute(id, "class")
            .map(|raw| raw.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn text(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        collect_text(self, id, &mut parts);
        normalize_text(&parts.join(" "))
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == id)?;
        if pos == 0 { None } else { Some(siblings[pos - 1]) }
    }

    fn label_text(&self, id: NodeId) -> Option<String> {
        if let Some(own_id) = self.attribute(id, "id")
            && !own_id.is_empty()
        {
            for candidate in self.ids() {
                if self.tag(candidate).as_deref() == Some("label")
                    && self.attribute(candidate, "for").as_deref() == Some(own_id.as_str())
                {
                    let text = self.text(candidate);
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
        }

        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if self.tag(ancestor).as_deref() == Some("label") {
                let text = self.text(ancestor);
                if !text.is_empty() {
                    return Some(text);
                }
            }
            current = self.parent(ancestor);
        }
        None
    }

    fn node_count(&self) -> usize {
        self.len()
    }

    fn query_all(&self, query: &Query) -> Vec<NodeId> {
        match query {
            Query::Css(selector) => css::query_all(self, selector),
            Query::XPath(path) => xpath::query_all(self, path),
        }
    }
}

fn collect_text(doc: &Document, id: NodeId, parts: &mut Vec<String>) {
    if let Some(node) = doc.node(id) {
        if let Some(text) = &node.text {
            parts.push(text.clone());
        }
        for &child in &node.children {
            collect_text(doc, child, parts);
        }
    }
}
