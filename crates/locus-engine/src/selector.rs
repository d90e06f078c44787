//! CSS selector construction for a node.

use locus_dom::escape::css_identifier;
use locus_dom::{DomTree, NodeId};

/// Id selector when the node has one, otherwise tag plus every class token.
/// `None` when the node has neither. Uniqueness is the caller's problem;
/// validation happens against the tree separately.
pub fn css_selector(tree: &dyn DomTree, id: NodeId) -> Option<String> {
    if let Some(node_id) = tree.attribute(id, "id")
        && !node_id.trim().is_empty()
    {
        return Some(format!("#{}", css_identifier(node_id.trim())));
    }

    let tag = tree.tag(id)?;
    let classes = tree.class_list(id);
    if classes.is_empty() {
        return None;
    }
    let mut selector = tag;
    for class in &classes {
        selector.push('.');
        selector.push_str(&css_identifier(class));
    }
    Some(selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use locus_dom::{Document, PageInfo, RawNode, RawSnapshot};
    use std::collections::HashMap;

    fn single(attrs: &[(&str, &str)]) -> Document {
        Document::from_raw(RawSnapshot {
            page: PageInfo::default(),
            root: RawNode {
                tag: "button".to_string(),
                attrs: attrs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<HashMap<_, _>>(),
                text: None,
                children: vec![],
            },
        })
        .unwrap()
    }

    #[test]
    fn id_wins_over_classes() {
        let d = single(&[("id", "go"), ("class", "btn primary")]);
        assert_eq!(css_selector(&d, NodeId(0)).as_deref(), Some("#go"));
    }

    #[test]
    fn escapes_awkward_ids() {
        let d = single(&[("id", "1:step")]);
        assert_eq!(
            css_selector(&d, NodeId(0)).as_deref(),
            Some("#\\31 \\:step")
        );
    }

    #[test]
    fn compound_of_tag_and_all_classes() {
        let d = single(&[("class", "btn btn-primary")]);
        assert_eq!(
            css_selector(&d, NodeId(0)).as_deref(),
            Some("button.btn.btn-primary")
        );
    }

    #[test]
    fn none_without_id_or_class() {
        let d = single(&[("name", "go")]);
        assert_eq!(css_selector(&d, NodeId(0)), None);
        let blank = single(&[("id", "  ")]);
        assert_eq!(css_selector(&blank, NodeId(0)), None);
    }
}
