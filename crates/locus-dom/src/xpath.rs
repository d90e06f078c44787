//! XPath evaluation over a document snapshot.
//!
//! Handles exactly the path shapes the resolver emits: absolute indexed
//! paths, descendant steps keyed on an attribute and/or normalized text, and
//! the label-to-following-input association path. Anything else fails to
//! parse and matches nothing, per the query contract.

use crate::snapshot::{Document, NodeId};
use crate::tree::DomTree;

const FOLLOWING_INPUT: &str = "]/following::input[1]";

#[derive(Debug, Clone, PartialEq)]
enum PathExpr {
    /// `/tag[i]/tag[j]/...` walked from the root.
    Absolute(Vec<IndexedStep>),
    /// `//tag[...]` over every node in document order. Tag `*` matches any.
    Descendant(DescendantStep),
    /// `//label[normalize-space()="t"]/following::input[1]`
    LabelFollowingInput(String),
}

#[derive(Debug, Clone, PartialEq)]
struct IndexedStep {
    tag: String,
    /// 1-based among same-tag siblings.
    index: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct DescendantStep {
    tag: Option<String>,
    attr: Option<(String, String)>,
    text: Option<String>,
}

/// Matching nodes in document order. Malformed paths match nothing.
pub fn query_all(doc: &Document, path: &str) -> Vec<NodeId> {
    match parse(path) {
        Some(expr) => evaluate(doc, &expr),
        None => Vec::new(),
    }
}

fn parse(path: &str) -> Option<PathExpr> {
    let path = path.trim();
    if let Some(rest) = path.strip_prefix("//") {
        return parse_descendant(rest);
    }
    if let Some(rest) = path.strip_prefix('/') {
        return parse_absolute(rest);
    }
    None
}

fn parse_absolute(rest: &str) -> Option<PathExpr> {
    let mut steps = Vec::new();
    for seg in rest.split('/') {
        let body = seg.strip_suffix(']')?;
        let open = body.find('[')?;
        let tag = &body[..open];
        let index: usize = body[open + 1..].parse().ok()?;
        if tag.is_empty() || index == 0 || !is_name(tag) {
            return None;
        }
        steps.push(IndexedStep {
            tag: tag.to_ascii_lowercase(),
            index,
        });
    }
    if steps.is_empty() {
        None
    } else {
        Some(PathExpr::Absolute(steps))
    }
}

fn parse_descendant(rest: &str) -> Option<PathExpr> {
    // Optional `/following::input[1]` tail, used by the label association
    // path and nothing else.
    let (step_src, following_input) = match rest.find(FOLLOWING_INPUT) {
        Some(pos) if pos + FOLLOWING_INPUT.len() == rest.len() => (&rest[..pos + 1], true),
        Some(_) => return None,
        None => (rest, false),
    };

    let open = step_src.find('[')?;
    let body = step_src.strip_suffix(']')?;
    let tag = match &step_src[..open] {
        "*" => None,
        t if is_name(t) => Some(t.to_ascii_lowercase()),
        _ => return None,
    };

    let mut step = DescendantStep {
        tag,
        ..Default::default()
    };
    let conditions = split_conditions(&body[open + 1..]);
    if conditions.is_empty() {
        return None;
    }
    for cond in &conditions {
        parse_condition(cond, &mut step)?;
    }

    if following_input {
        return match (step.tag.as_deref(), step.attr.is_none(), step.text) {
            (Some("label"), true, Some(text)) => Some(PathExpr::LabelFollowingInput(text)),
            _ => None,
        };
    }
    Some(PathExpr::Descendant(step))
}

fn is_name(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Split a predicate body on top-level ` and `, leaving quoted literals
/// intact.
fn split_conditions(body: &str) -> Vec<String> {
    let chars: Vec<char> = body.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
        } else if c == '"' || c == '\'' {
            quote = Some(c);
        } else if c == ' ' && chars[i..].len() >= 5 && chars[i..i + 5] == [' ', 'a', 'n', 'd', ' ']
        {
            parts.push(current.trim().to_string());
            current.clear();
            i += 5;
            continue;
        }
        current.push(c);
        i += 1;
    }
    let last = current.trim().to_string();
    if !last.is_empty() {
        parts.push(last);
    }
    parts
}

fn parse_condition(cond: &str, step: &mut DescendantStep) -> Option<()> {
    if let Some(rest) = cond.strip_prefix("normalize-space()=") {
        step.text = Some(parse_literal(rest)?);
        return Some(());
    }
    if let Some(rest) = cond.strip_prefix('@') {
        let eq = rest.find('=')?;
        let name = rest[..eq].trim();
        if name.is_empty() {
            return None;
        }
        let value = parse_literal(rest[eq + 1..].trim())?;
        step.attr = Some((name.to_string(), value));
        return Some(());
    }
    None
}

/// A plain single- or double-quoted literal. The `concat(...)` form only
/// arises for values mixing both quote kinds; it is not evaluated, which
/// degrades to zero matches as the contract allows.
fn parse_literal(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let first = raw.chars().next()?;
    if (first != '"' && first != '\'') || raw.len() < 2 || !raw.ends_with(first) {
        return None;
    }
    Some(raw[1..raw.len() - 1].to_string())
}

fn evaluate(doc: &Document, expr: &PathExpr) -> Vec<NodeId> {
    match expr {
        PathExpr::Absolute(steps) => evaluate_absolute(doc, steps),
        PathExpr::Descendant(step) => doc
            .ids()
            .filter(|&id| matches_step(doc, id, step))
            .collect(),
        PathExpr::LabelFollowingInput(text) => evaluate_label_input(doc, text),
    }
}

fn evaluate_absolute(doc: &Document, steps: &[IndexedStep]) -> Vec<NodeId> {
    let Some(first) = steps.first() else {
        return Vec::new();
    };
    // The root has no siblings, so its only valid index is 1.
    if first.index != 1 || doc.tag(doc.root()).as_deref() != Some(first.tag.as_str()) {
        return Vec::new();
    }
    let mut current = doc.root();
    for step in &steps[1..] {
        let next = doc
            .children(current)
            .iter()
            .filter(|&&c| doc.tag(c).as_deref() == Some(step.tag.as_str()))
            .nth(step.index - 1)
            .copied();
        match next {
            Some(child) => current = child,
            None => return Vec::new(),
        }
    }
    vec![current]
}

fn matches_step(doc: &Document, id: NodeId, step: &DescendantStep) -> bool {
    if let Some(tag) = &step.tag
        && doc.tag(id).as_deref() != Some(tag.as_str())
    {
        return false;
    }
    if let Some((name, value)) = &step.attr
        && doc.attribute(id, name).as_deref() != Some(value.as_str())
    {
        return false;
    }
    if let Some(text) = &step.text
        && doc.text(id) != *text
    {
        return false;
    }
    true
}

/// `following::input[1]`: the first input after the label in document order,
/// excluding the label's own descendants. Ids are assigned depth-first, so a
/// subtree is the contiguous range ending at its last descendant.
fn evaluate_label_input(doc: &Document, text: &str) -> Vec<NodeId> {
    let mut out = Vec::new();
    for id in doc.ids() {
        if doc.tag(id).as_deref() == Some("label") && doc.text(id) == text {
            let after = last_descendant(doc, id).0 + 1;
            let found = (after..doc.node_count() as u32)
                .map(NodeId)
                .find(|&n| doc.tag(n).as_deref() == Some("input"));
            if let Some(input) = found
                && !out.contains(&input)
            {
                out.push(input);
            }
        }
    }
    out
}

fn last_descendant(doc: &Document, id: NodeId) -> NodeId {
    match doc.children(id).last() {
        Some(&child) => last_descendant(doc, child),
        None => id,
    }
}
