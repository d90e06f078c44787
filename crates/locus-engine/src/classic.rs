//! Classic-dialect candidate generation.
//!
//! Expressions in the Selenium `By.*` style. Same policy as the fluent
//! generator with its own weights: attribute-backed candidates require a
//! unique live match, query-set candidates (link text, type+name, built
//! selector, href) keep their true count with the target in the match set,
//! the strong relative path is self-validated, and the absolute indexed path
//! closes the list as the unconditional last resort.

use locus_dom::escape::{css_identifier, css_string, xpath_literal};
use locus_dom::{DomTree, NodeId, Query};
use tracing::debug;

use crate::candidate::{Candidate, counted};
use crate::expr::code_literal;
use crate::paths::{indexed_path, strong_relative_path};
use crate::selector::css_selector;
use crate::weights::ClassicWeights;

pub fn by_id(value: &str) -> String {
    format!("By.id({})", code_literal(value))
}

pub fn by_name(value: &str) -> String {
    format!("By.name({})", code_literal(value))
}

pub fn by_link_text(text: &str) -> String {
    format!("By.linkText({})", code_literal(text))
}

pub fn by_css_selector(selector: &str) -> String {
    format!("By.cssSelector({})", code_literal(selector))
}

pub fn by_xpath(path: &str) -> String {
    format!("By.xpath({})", code_literal(path))
}

pub fn classic_candidates(
    tree: &dyn DomTree,
    id: NodeId,
    weights: &ClassicWeights,
    max_text_len: usize,
) -> Vec<Candidate> {
    let mut out = Vec::new();

    if let Some(node_id) = tree.non_empty_attribute(id, "id") {
        let selector = format!("#{}", css_identifier(node_id.trim()));
        if tree.count(&Query::Css(selector)) == 1 {
            out.push(Candidate::new(by_id(node_id.trim()), 1, weights.id));
        }
    }

    if let Some(test_id) = tree.non_empty_attribute(id, "data-testid") {
        let selector = format!("[data-testid=\"{}\"]", css_string(&test_id));
        if tree.count(&Query::Css(selector.clone())) == 1 {
            out.push(Candidate::new(
                by_css_selector(&selector),
                1,
                weights.test_id,
            ));
        }
    }

    if tree.tag(id).as_deref() == Some("input")
        && let Some(label) = tree.label_text(id)
    {
        let path = format!(
            "//label[normalize-space()={}]/following::input[1]",
            xpath_literal(&label)
        );
        // Unique is not enough here: the single match must be the target,
        // or the path would name a different input entirely.
        if tree.query_all(&Query::XPath(path.clone())) == [id] {
            out.push(Candidate::new(by_xpath(&path), 1, weights.label_input));
        }
    }

    if let Some(name) = tree.non_empty_attribute(id, "name")
        && unique_attr(tree, "name", &name)
    {
        out.push(Candidate::new(by_name(&name), 1, weights.name));
    }

    if let Some(placeholder) = tree.non_empty_attribute(id, "placeholder")
        && unique_attr(tree, "placeholder", &placeholder)
    {
        let selector = format!("[placeholder=\"{}\"]", css_string(&placeholder));
        out.push(Candidate::new(
            by_css_selector(&selector),
            1,
            weights.placeholder,
        ));
    }

    if let Some(title) = tree.non_empty_attribute(id, "title")
        && unique_attr(tree, "title", &title)
    {
        let selector = format!("[title=\"{}\"]", css_string(&title));
        out.push(Candidate::new(by_css_selector(&selector), 1, weights.title));
    }

    let text = tree.text(id);
    if tree.tag(id).as_deref() == Some("a") && !text.is_empty() {
        let query = Query::XPath(format!("//a[normalize-space()={}]", xpath_literal(&text)));
        if let Some(matches) = counted(tree, id, &query) {
            out.push(Candidate::new(
                by_link_text(&text),
                matches,
                weights.link_text,
            ));
        }
    }

    if tree.tag(id).as_deref() == Some("input")
        && let Some(input_type) = tree.non_empty_attribute(id, "type")
        && let Some(name) = tree.non_empty_attribute(id, "name")
    {
        let selector = format!(
            "input[type=\"{}\"][name=\"{}\"]",
            css_string(&input_type),
            css_string(&name)
        );
        if let Some(matches) = counted(tree, id, &Query::Css(selector.clone())) {
            out.push(Candidate::new(
                by_css_selector(&selector),
                matches,
                weights.type_name,
            ));
        }
    }

    if let Some(selector) = css_selector(tree, id)
        && let Some(matches) = counted(tree, id, &Query::Css(selector.clone()))
    {
        out.push(Candidate::new(
            by_css_selector(&selector),
            matches,
            weights.selector,
        ));
    }

    if let Some(path) = strong_relative_path(tree, id, max_text_len) {
        out.push(Candidate::new(by_xpath(&path), 1, weights.strong_path));
    }

    out.push(Candidate::new(
        by_xpath(&indexed_path(tree, id)),
        1,
        weights.indexed_path,
    ));

    if tree.tag(id).as_deref() == Some("a")
        && let Some(href) = tree.non_empty_attribute(id, "href")
    {
        let selector = format!("a[href=\"{}\"]", css_string(&href));
        if let Some(matches) = counted(tree, id, &Query::Css(selector.clone())) {
            out.push(Candidate::new(
                by_css_selector(&selector),
                matches,
                weights.href,
            ));
        }
    }

    debug!(node = %id, candidates = out.len(), "generated classic candidates");
    out
}

fn unique_attr(tree: &dyn DomTree, name: &str, value: &str) -> bool {
    let selector = format!("[{}=\"{}\"]", name, css_string(value));
    tree.count(&Query::Css(selector)) == 1
}
