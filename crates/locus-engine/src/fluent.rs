//! Fluent-dialect candidate generation.
//!
//! Expressions in the `page.getBy*` / `page.locator(...)` style. Every check
//! runs independently with no early exit. Attribute-backed candidates are
//! kept only when their backing query matches exactly one node; query-set
//! candidates (role+text, exact text, href, type+name, built selector) keep
//! their true count as long as the target is in the match set; and a final
//! fallback is always emitted so the resolver can never come back empty.

use locus_dom::escape::{css_identifier, css_string, xpath_literal};
use locus_dom::{DomTree, NodeId, Query};
use tracing::debug;

use crate::candidate::{Candidate, counted};
use crate::expr::code_literal;
use crate::selector::css_selector;
use crate::weights::FluentWeights;

pub fn get_by_test_id(value: &str) -> String {
    format!("page.getByTestId({})", code_literal(value))
}

pub fn get_by_label(value: &str) -> String {
    format!("page.getByLabel({})", code_literal(value))
}

pub fn get_by_placeholder(value: &str) -> String {
    format!("page.getByPlaceholder({})", code_literal(value))
}

pub fn get_by_alt_text(value: &str) -> String {
    format!("page.getByAltText({})", code_literal(value))
}

pub fn get_by_role(role: &str, name: &str) -> String {
    format!(
        "page.getByRole({}, {{ name: {} }})",
        code_literal(role),
        code_literal(name)
    )
}

pub fn get_by_text(text: &str) -> String {
    format!("page.getByText({}, {{ exact: true }})", code_literal(text))
}

pub fn locator(selector: &str) -> String {
    format!("page.locator({})", code_literal(selector))
}

pub fn locator_nth(selector: &str, index: usize) -> String {
    format!("page.locator({}).nth({})", code_literal(selector), index)
}

pub fn fluent_candidates(
    tree: &dyn DomTree,
    id: NodeId,
    weights: &FluentWeights,
) -> Vec<Candidate> {
    let mut out = Vec::new();

    if let Some(test_id) = tree.non_empty_attribute(id, "data-testid")
        && unique(tree, &attr_query("data-testid", &test_id))
    {
        out.push(Candidate::new(get_by_test_id(&test_id), 1, weights.test_id));
    }

    if let Some(node_id) = tree.non_empty_attribute(id, "id") {
        let selector = format!("#{}", css_identifier(node_id.trim()));
        if unique(tree, &Query::Css(selector.clone())) {
            out.push(Candidate::new(locator(&selector), 1, weights.id));
        }
    }

    if let Some(label) = tree.label_text(id) {
        let labels = Query::XPath(format!(
            "//label[normalize-space()={}]",
            xpath_literal(&label)
        ));
        if unique(tree, &labels) {
            out.push(Candidate::new(get_by_label(&label), 1, weights.label));
        }
    } else if let Some(aria) = tree.non_empty_attribute(id, "aria-label")
        && unique(tree, &attr_query("aria-label", &aria))
    {
        out.push(Candidate::new(get_by_label(&aria), 1, weights.label));
    }

    if let Some(placeholder) = tree.non_empty_attribute(id, "placeholder")
        && unique(tree, &attr_query("placeholder", &placeholder))
    {
        out.push(Candidate::new(
            get_by_placeholder(&placeholder),
            1,
            weights.placeholder,
        ));
    }

    if let Some(alt) = tree.non_empty_attribute(id, "alt")
        && unique(tree, &attr_query("alt", &alt))
    {
        out.push(Candidate::new(get_by_alt_text(&alt), 1, weights.alt_text));
    }

    let text = tree.text(id);

    if let Some(role) = tree.non_empty_attribute(id, "role")
        && !text.is_empty()
    {
        let query = Query::XPath(format!(
            "//*[@role={} and normalize-space()={}]",
            xpath_literal(&role),
            xpath_literal(&text)
        ));
        if let Some(matches) = counted(tree, id, &query) {
            out.push(Candidate::new(
                get_by_role(&role, &text),
                matches,
                weights.role_text,
            ));
        }
    }

    if !text.is_empty() {
        let query = Query::XPath(format!(
            "//*[normalize-space()={}]",
            xpath_literal(&text)
        ));
        if let Some(matches) = counted(tree, id, &query) {
            out.push(Candidate::new(get_by_text(&text), matches, weights.text));
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
                locator(&selector),
                matches,
                weights.type_name,
            ));
        }
    }

    let built = css_selector(tree, id);
    if let Some(selector) = &built {
        let all = tree.query_all(&Query::Css(selector.clone()));
        if let Some(position) = all.iter().position(|&n| n == id) {
            out.push(Candidate::new(locator(selector), all.len(), weights.selector));
            if all.len() > 1 {
                out.push(Candidate::new(
                    locator_nth(selector, position),
                    1,
                    weights.nth,
                ));
            }
        }
    }

    if tree.tag(id).as_deref() == Some("a")
        && let Some(href) = tree.non_empty_attribute(id, "href")
    {
        let selector = format!("a[href=\"{}\"]", css_string(&href));
        if let Some(matches) = counted(tree, id, &Query::Css(selector.clone())) {
            out.push(Candidate::new(locator(&selector), matches, weights.href));
        }
    }

    // Unconditional fallback: the built selector, or the bare tag as a last
    // resort. Match count 1 by construction so selection never comes back
    // empty-handed.
    let fallback = built.or_else(|| tree.tag(id)).unwrap_or_else(|| "*".to_string());
    out.push(Candidate::new(locator(&fallback), 1, weights.fallback));

    debug!(node = %id, candidates = out.len(), "generated fluent candidates");
    out
}

fn attr_query(name: &str, value: &str) -> Query {
    Query::Css(format!("[{}=\"{}\"]", name, css_string(value)))
}

fn unique(tree: &dyn DomTree, query: &Query) -> bool {
    tree.count(query) == 1
}
