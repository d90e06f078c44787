//! Candidate selection and the resolution entry points.

use locus_dom::escape::{css_identifier, css_string};
use locus_dom::{DomTree, NodeId, Query};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::candidate::{Candidate, Dialect, LocatorPair};
use crate::classic::classic_candidates;
use crate::config::LocusConfig;
use crate::fluent::fluent_candidates;
use crate::paths::indexed_path;

/// Errors from the resolution entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("No node {0} in this document")]
    NodeNotFound(NodeId),

    #[error("No {dialect} candidate for node {node}")]
    NoCandidates { dialect: Dialect, node: NodeId },
}

/// Which resolution model to run. Hosts select one per call; there is no
/// implicit mode state inside the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Full candidate generation in both dialects, best pick per dialect.
    #[default]
    Scored,
    /// One base locator with an index fallback, first matching attribute
    /// wins.
    Legacy,
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scored" => Ok(Strategy::Scored),
            "legacy" => Ok(Strategy::Legacy),
            other => Err(format!(
                "unknown strategy '{}', expected 'scored' or 'legacy'",
                other
            )),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Scored => write!(f, "scored"),
            Strategy::Legacy => write!(f, "legacy"),
        }
    }
}

/// How a legacy base locator relates to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Unique,
    Indexed,
}

/// Result of the legacy single-strategy resolver. `index` and `path` are
/// populated only for [`Classification::Indexed`]; `index` stays `None` when
/// the base matched nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyResolution {
    pub base: Query,
    pub classification: Classification,
    pub match_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Output of [`resolve`], tagged by the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Resolution {
    Scored(LocatorPair),
    Legacy(LegacyResolution),
}

/// Best candidate from a generated list.
///
/// Two tiers: if any candidate has exactly one live match, the
/// highest-scored of those wins; only when none does can a non-unique
/// candidate win. Ties keep the earliest-generated candidate. Uniqueness
/// dominates priority.
pub fn pick_best(candidates: &[Candidate]) -> Option<&Candidate> {
    best_of(candidates.iter().filter(|c| c.is_unique()))
        .or_else(|| best_of(candidates.iter()))
}

fn best_of<'a, I>(iter: I) -> Option<&'a Candidate>
where
    I: Iterator<Item = &'a Candidate>,
{
    let mut best: Option<&Candidate> = None;
    for candidate in iter {
        match best {
            Some(current) if current.score >= candidate.score => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Run the selected strategy for one node.
pub fn resolve(
    tree: &dyn DomTree,
    id: NodeId,
    strategy: Strategy,
    config: &LocusConfig,
) -> Result<Resolution, ResolveError> {
    match strategy {
        Strategy::Scored => Ok(Resolution::Scored(resolve_scored(tree, id, config)?)),
        Strategy::Legacy => Ok(Resolution::Legacy(resolve_legacy(tree, id)?)),
    }
}

/// Generate, validate, and select the best candidate in both dialects.
pub fn resolve_scored(
    tree: &dyn DomTree,
    id: NodeId,
    config: &LocusConfig,
) -> Result<LocatorPair, ResolveError> {
    ensure_node(tree, id)?;

    let fluent_all = fluent_candidates(tree, id, &config.weights.fluent);
    let classic_all = classic_candidates(
        tree,
        id,
        &config.weights.classic,
        config.resolver.max_text_len,
    );

    let fluent = pick_best(&fluent_all)
        .cloned()
        .ok_or(ResolveError::NoCandidates {
            dialect: Dialect::Fluent,
            node: id,
        })?;
    let classic = pick_best(&classic_all)
        .cloned()
        .ok_or(ResolveError::NoCandidates {
            dialect: Dialect::Classic,
            node: id,
        })?;

    debug!(node = %id, fluent = %fluent.code, classic = %classic.code, "resolved");
    Ok(LocatorPair { fluent, classic })
}

/// One base locator, classified by its live match count. The first matching
/// rule in a fixed attribute order wins; no alternatives are explored after
/// that, which is the point of this variant.
pub fn resolve_legacy(tree: &dyn DomTree, id: NodeId) -> Result<LegacyResolution, ResolveError> {
    ensure_node(tree, id)?;

    let base = legacy_base(tree, id);
    let matches = tree.query_all(&base);
    let match_count = matches.len();

    if match_count == 1 {
        debug!(node = %id, base = %base, "legacy base is unique");
        return Ok(LegacyResolution {
            base,
            classification: Classification::Unique,
            match_count,
            index: None,
            path: None,
        });
    }

    if match_count == 0 {
        warn!(node = %id, base = %base, "legacy base matched nothing");
    }
    Ok(LegacyResolution {
        base,
        classification: Classification::Indexed,
        match_count,
        index: matches.iter().position(|&n| n == id),
        path: Some(indexed_path(tree, id)),
    })
}

fn legacy_base(tree: &dyn DomTree, id: NodeId) -> Query {
    if let Some(test_id) = tree.non_empty_attribute(id, "data-testid") {
        return Query::Css(format!("[data-testid=\"{}\"]", css_string(&test_id)));
    }
    if let Some(aria) = tree.non_empty_attribute(id, "aria-label") {
        return Query::Css(format!("[aria-label=\"{}\"]", css_string(&aria)));
    }
    if let Some(node_id) = tree.non_empty_attribute(id, "id") {
        return Query::Css(format!("#{}", css_identifier(node_id.trim())));
    }
    let classes = tree.class_list(id);
    if classes.len() == 1
        && let Some(tag) = tree.tag(id)
    {
        return Query::Css(format!("{}.{}", tag, css_identifier(&classes[0])));
    }
    Query::XPath(indexed_path(tree, id))
}

fn ensure_node(tree: &dyn DomTree, id: NodeId) -> Result<(), ResolveError> {
    if tree.tag(id).is_none() {
        return Err(ResolveError::NodeNotFound(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use locus_dom::{Document, PageInfo, RawNode, RawSnapshot};
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

    fn doc(root: RawNode) -> Document {
        Document::from_raw(RawSnapshot {
            page: PageInfo::default(),
            root,
        })
        .unwrap()
    }

    fn cand(code: &str, matches: usize, score: i32) -> Candidate {
        Candidate::new(code, matches, score)
    }

    #[test]
    fn pick_best_returns_none_on_empty() {
        assert_eq!(pick_best(&[]), None);
    }

    #[test]
    fn unique_low_score_beats_ambiguous_high_score() {
        let candidates = vec![cand("ambiguous", 3, 100), cand("unique", 1, 30)];
        assert_eq!(pick_best(&candidates).map(|c| c.code.as_str()), Some("unique"));
    }

    #[test]
    fn highest_unique_wins_within_the_tier() {
        let candidates = vec![
            cand("low", 1, 80),
            cand("high", 1, 95),
            cand("ambiguous", 2, 100),
        ];
        assert_eq!(pick_best(&candidates).map(|c| c.code.as_str()), Some("high"));
    }

    #[test]
    fn ties_keep_generation_order() {
        let candidates = vec![cand("first", 1, 88), cand("second", 1, 88)];
        assert_eq!(pick_best(&candidates).map(|c| c.code.as_str()), Some("first"));
    }

    #[test]
    fn all_ambiguous_falls_back_to_highest_score() {
        let candidates = vec![cand("a", 2, 70), cand("b", 5, 90), cand("c", 0, 95)];
        assert_eq!(pick_best(&candidates).map(|c| c.code.as_str()), Some("c"));
    }

    #[test]
    fn legacy_prefers_test_id() {
        let d = doc(el(
            "body",
            &[],
            None,
            vec![el(
                "button",
                &[("data-testid", "go"), ("aria-label", "Go"), ("id", "btn")],
                None,
                vec![],
            )],
        ));
        let result = resolve_legacy(&d, NodeId(1)).unwrap();
        assert_eq!(result.base, Query::Css("[data-testid=\"go\"]".into()));
        assert_eq!(result.classification, Classification::Unique);
        assert_eq!(result.match_count, 1);
        assert_eq!(result.index, None);
        assert_eq!(result.path, None);
    }

    #[test]
    fn legacy_falls_through_missing_attributes() {
        let d = doc(el(
            "body",
            &[],
            None,
            vec![el("span", &[("aria-label", "Close")], None, vec![])],
        ));
        let result = resolve_legacy(&d, NodeId(1)).unwrap();
        assert_eq!(result.base, Query::Css("[aria-label=\"Close\"]".into()));

        let d = doc(el(
            "body",
            &[],
            None,
            vec![el("span", &[("id", "x")], None, vec![])],
        ));
        let result = resolve_legacy(&d, NodeId(1)).unwrap();
        assert_eq!(result.base, Query::Css("#x".into()));

        let d = doc(el(
            "body",
            &[],
            None,
            vec![el("span", &[("class", "badge")], None, vec![])],
        ));
        let result = resolve_legacy(&d, NodeId(1)).unwrap();
        assert_eq!(result.base, Query::Css("span.badge".into()));
    }

    #[test]
    fn legacy_multi_class_goes_structural() {
        let d = doc(el(
            "body",
            &[],
            None,
            vec![el("span", &[("class", "a b")], None, vec![])],
        ));
        let result = resolve_legacy(&d, NodeId(1)).unwrap();
        assert_eq!(result.base, Query::XPath("/body[1]/span[1]".into()));
        // The structural path pins one node, so this comes back unique.
        assert_eq!(result.classification, Classification::Unique);
    }

    #[test]
    fn legacy_duplicates_are_indexed() {
        let d = doc(el(
            "ul",
            &[],
            None,
            vec![
                el("li", &[("class", "item")], None, vec![]),
                el("li", &[("class", "item")], None, vec![]),
            ],
        ));
        let result = resolve_legacy(&d, NodeId(2)).unwrap();
        assert_eq!(result.base, Query::Css("li.item".into()));
        assert_eq!(result.classification, Classification::Indexed);
        assert_eq!(result.match_count, 2);
        assert_eq!(result.index, Some(1));
        assert_eq!(result.path.as_deref(), Some("/ul[1]/li[2]"));
    }

    #[test]
    fn missing_node_aborts_without_result() {
        let d = doc(el("body", &[], None, vec![]));
        assert_eq!(
            resolve_legacy(&d, NodeId(9)),
            Err(ResolveError::NodeNotFound(NodeId(9)))
        );
        assert!(matches!(
            resolve_scored(&d, NodeId(9), &LocusConfig::default()),
            Err(ResolveError::NodeNotFound(_))
        ));
    }

    #[test]
    fn resolve_dispatches_by_strategy() {
        let d = doc(el(
            "body",
            &[],
            None,
            vec![el("button", &[("data-testid", "go")], Some("Go"), vec![])],
        ));
        let config = LocusConfig::default();

        match resolve(&d, NodeId(1), Strategy::Scored, &config).unwrap() {
            Resolution::Scored(pair) => {
                assert_eq!(pair.fluent.code, "page.getByTestId(\"go\")");
                assert_eq!(pair.fluent.score, 100);
                assert_eq!(
                    pair.classic.code,
                    "By.cssSelector('[data-testid=\"go\"]')"
                );
                assert_eq!(pair.classic.score, 98);
            }
            other => panic!("expected scored resolution, got {:?}", other),
        }

        match resolve(&d, NodeId(1), Strategy::Legacy, &config).unwrap() {
            Resolution::Legacy(legacy) => {
                assert_eq!(legacy.classification, Classification::Unique);
            }
            other => panic!("expected legacy resolution, got {:?}", other),
        }
    }

    #[test]
    fn strategy_parses_from_str() {
        assert_eq!("scored".parse::<Strategy>(), Ok(Strategy::Scored));
        assert_eq!("legacy".parse::<Strategy>(), Ok(Strategy::Legacy));
        assert!("best".parse::<Strategy>().is_err());
    }
}
