//! Document snapshots.
//!
//! A snapshot is a capture of a rendered markup tree: nested nodes carrying
//! tag, attributes, and text, plus page metadata. Hosts serialize one as JSON
//! and hand it to the resolver; test fixtures build the same shape in code.
//! Parsing flattens the nesting into an arena so node identity is a plain
//! index and sibling/ancestor walks are cheap.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from snapshot parsing.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Snapshot root has an empty tag")]
    EmptyRoot,
}

/// Page-level metadata carried alongside the tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}

/// One node of the nested wire shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNode {
    pub tag: String,
    #[serde(default)]
    pub attrs: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawNode>,
}

/// The nested wire shape of a full snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub page: PageInfo,
    pub root: RawNode,
}

/// Identifies a node within one [`Document`]. Ids are assigned depth-first in
/// document order, root first, so a subtree always occupies a contiguous id
/// range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Arena storage for one node.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub text: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// A flattened document: every node in one arena, addressed by [`NodeId`].
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    page: PageInfo,
}

impl Document {
    /// Parse the nested JSON wire shape into an arena.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Flatten a nested snapshot, assigning ids depth-first from the root.
    pub fn from_raw(raw: RawSnapshot) -> Result<Self, SnapshotError> {
        if raw.root.tag.trim().is_empty() {
            return Err(SnapshotError::EmptyRoot);
        }
        let mut nodes = Vec::new();
        flatten(&raw.root, None, &mut nodes);
        Ok(Self {
            nodes,
            page: raw.page,
        })
    }

    pub fn page(&self) -> &PageInfo {
        &self.page
    }

    /// The root node. Always id 0.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        (id.0 as usize) < self.nodes.len()
    }

    /// Ids of all nodes in document order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Child ids in source order. Empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0 as usize)
    }
}

fn flatten(raw: &RawNode, parent: Option<NodeId>, nodes: &mut Vec<NodeData>) -> NodeId {
    let id = NodeId(nodes.len() as u32);
    nodes.push(NodeData {
        tag: raw.tag.trim().to_ascii_lowercase(),
        attrs: raw.attrs.clone(),
        text: raw.text.clone(),
        parent,
        children: Vec::with_capacity(raw.children.len()),
    });
    for child in &raw.children {
        let child_id = flatten(child, Some(id), nodes);
        nodes[id.0 as usize].children.push(child_id);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_in_document_order() {
        let json = r#"{
            "page": { "url": "https://example.com", "title": "Example" },
            "root": {
                "tag": "html",
                "children": [
                    { "tag": "body", "children": [
                        { "tag": "div", "children": [{ "tag": "span", "text": "a" }] },
                        { "tag": "p", "text": "b" }
                    ]}
                ]
            }
        }"#;
        let doc = Document::from_json(json).unwrap();

        assert_eq!(doc.len(), 5);
        assert_eq!(doc.page().url, "https://example.com");
        // depth-first: html, body, div, span, p
        let tags: Vec<_> = doc
            .ids()
            .map(|id| doc.node(id).unwrap().tag.clone())
            .collect();
        assert_eq!(tags, ["html", "body", "div", "span", "p"]);

        let body = NodeId(1);
        assert_eq!(doc.children(body), &[NodeId(2), NodeId(4)]);
        assert_eq!(doc.node(NodeId(3)).unwrap().parent, Some(NodeId(2)));
    }

    #[test]
    fn tags_are_lowercased() {
        let raw = RawSnapshot {
            page: PageInfo::default(),
            root: RawNode {
                tag: "DIV".to_string(),
                ..Default::default()
            },
        };
        let doc = Document::from_raw(raw).unwrap();
        assert_eq!(doc.node(doc.root()).unwrap().tag, "div");
    }

    #[test]
    fn empty_root_tag_is_rejected() {
        let raw = RawSnapshot {
            page: PageInfo::default(),
            root: RawNode {
                tag: "  ".to_string(),
                ..Default::default()
            },
        };
        assert!(matches!(
            Document::from_raw(raw),
            Err(SnapshotError::EmptyRoot)
        ));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let err = Document::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
    }
}
