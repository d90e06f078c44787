//! Plain-text rendering of resolutions and snapshots.

use locus_dom::{Document, DomTree, NodeId};

use crate::candidate::LocatorPair;
use crate::resolve::{Classification, LegacyResolution, Resolution};

/// Render either resolution shape.
pub fn format_resolution(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Scored(pair) => format_pair(pair),
        Resolution::Legacy(legacy) => format_legacy(legacy),
    }
}

/// One line per dialect: the expression, then score and live match count.
pub fn format_pair(pair: &LocatorPair) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "fluent  {}  [score {}, matches {}]\n",
        pair.fluent.code, pair.fluent.score, pair.fluent.matches
    ));
    out.push_str(&format!(
        "classic {}  [score {}, matches {}]\n",
        pair.classic.code, pair.classic.score, pair.classic.matches
    ));
    out
}

/// The base locator with its classification, plus the fallback index and
/// structural path when the base was not unique.
pub fn format_legacy(legacy: &LegacyResolution) -> String {
    let mut out = format!("base {}", legacy.base);
    match legacy.classification {
        Classification::Unique => out.push_str(" (unique)\n"),
        Classification::Indexed => {
            out.push_str(&format!(" ({} matches)\n", legacy.match_count));
            if let Some(index) = legacy.index {
                out.push_str(&format!("index {}\n", index));
            }
            if let Some(path) = &legacy.path {
                out.push_str(&format!("path {}\n", path));
            }
        }
    }
    out
}

/// Indented outline of a whole snapshot, one `[id] tag` line per node, for
/// finding the node id to resolve. Leaf text and the attributes that usually
/// anchor a locator are shown inline.
pub fn format_outline(doc: &Document) -> String {
    let page = doc.page();
    let mut out = format!("@ {} \"{}\"\n", page.url, page.title);
    if !doc.is_empty() {
        push_node(doc, doc.root(), 0, &mut out);
    }
    out
}

fn push_node(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    let tag = doc.tag(id).unwrap_or_default();
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("[{}] {}", id, tag));
    for attr in ["id", "data-testid", "name", "role"] {
        if let Some(value) = doc.non_empty_attribute(id, attr) {
            out.push_str(&format!(" {}={}", attr, value));
        }
    }
    if doc.children(id).is_empty() {
        let text = doc.text(id);
        if !text.is_empty() {
            out.push_str(&format!(" \"{}\"", text));
        }
    }
    out.push('\n');
    for &child in doc.children(id) {
        push_node(doc, child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use locus_dom::{PageInfo, Query, RawNode, RawSnapshot};
    use std::collections::HashMap;

    fn el(tag: &str, attrs: &[(&str, &str)], text: Option<&str>, children: Vec<RawNode>) -> RawNode {
        RawNode {
            tag: tag.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
            text: text.map(str::to_string),
            children,
        }
    }

    #[test]
    fn pair_lists_both_dialects() {
        let pair = LocatorPair {
            fluent: Candidate::new("page.getByTestId(\"go\")", 1, 100),
            classic: Candidate::new("By.id(\"go\")", 1, 100),
        };
        let text = format_pair(&pair);
        assert_eq!(
            text,
            "fluent  page.getByTestId(\"go\")  [score 100, matches 1]\n\
             classic By.id(\"go\")  [score 100, matches 1]\n"
        );
    }

    #[test]
    fn unique_legacy_is_one_line() {
        let legacy = LegacyResolution {
            base: Query::Css("#go".into()),
            classification: Classification::Unique,
            match_count: 1,
            index: None,
            path: None,
        };
        assert_eq!(format_legacy(&legacy), "base css:#go (unique)\n");
    }

    #[test]
    fn indexed_legacy_shows_index_and_path() {
        let legacy = LegacyResolution {
            base: Query::Css("li.item".into()),
            classification: Classification::Indexed,
            match_count: 3,
            index: Some(1),
            path: Some("/ul[1]/li[2]".into()),
        };
        assert_eq!(
            format_legacy(&legacy),
            "base css:li.item (3 matches)\nindex 1\npath /ul[1]/li[2]\n"
        );
    }

    #[test]
    fn indexed_legacy_without_matches_omits_index() {
        let legacy = LegacyResolution {
            base: Query::Css("[data-testid=\"x\"]".into()),
            classification: Classification::Indexed,
            match_count: 0,
            index: None,
            path: Some("/body[1]/div[1]".into()),
        };
        let text = format_legacy(&legacy);
        assert!(text.contains("(0 matches)"));
        assert!(!text.contains("index"));
        assert!(text.contains("path /body[1]/div[1]"));
    }

    #[test]
    fn outline_indents_and_annotates() {
        let doc = Document::from_raw(RawSnapshot {
            page: PageInfo {
                url: "https://example.test".into(),
                title: "Fixture".into(),
            },
            root: el(
                "body",
                &[],
                None,
                vec![el(
                    "form",
                    &[("id", "login")],
                    None,
                    vec![el("button", &[("data-testid", "go")], Some("Go"), vec![])],
                )],
            ),
        })
        .unwrap();
        assert_eq!(
            format_outline(&doc),
            "@ https://example.test \"Fixture\"\n\
             [0] body\n\
             \x20 [1] form id=login\n\
             \x20   [2] button data-testid=go \"Go\"\n"
        );
    }
}
